//! Completion response wire types
//!
//! Covers both the chat completions shape (`choices[].message.content`)
//! and the legacy text completions shape (`choices[].text`), plus the
//! error envelope returned on non-success statuses.

use crate::Message;
use serde::Deserialize;

/// Common metadata shared between chat and text completions
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CompletionMeta {
    /// A unique identifier for the completion
    #[serde(default)]
    pub id: String,

    /// The object type
    #[serde(default)]
    pub object: String,

    /// Unix timestamp (in seconds) of when the response was created
    #[serde(default)]
    pub created: u64,

    /// The model used for the completion
    #[serde(default)]
    pub model: String,
}

/// A chat completion response
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Completion metadata
    #[serde(flatten)]
    pub meta: CompletionMeta,

    /// The list of completion choices
    pub choices: Vec<ChatChoice>,

    /// Token usage statistics
    pub usage: Option<Usage>,
}

impl ChatResponse {
    /// Get the content of the first choice
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|choice| choice.message.content.as_str())
    }

    /// Get the reason the model stopped generating
    pub fn reason(&self) -> Option<FinishReason> {
        self.choices.first().and_then(|choice| choice.finish_reason)
    }
}

/// A choice in a chat completion response
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// The index of this choice in the list
    #[serde(default)]
    pub index: u32,

    /// The generated message
    pub message: Message,

    /// The reason the model stopped generating
    pub finish_reason: Option<FinishReason>,
}

/// A legacy text completion response
#[derive(Debug, Clone, Deserialize)]
pub struct TextResponse {
    /// Completion metadata
    #[serde(flatten)]
    pub meta: CompletionMeta,

    /// The list of completion choices
    pub choices: Vec<TextChoice>,

    /// Token usage statistics
    pub usage: Option<Usage>,
}

impl TextResponse {
    /// Get the text of the first choice
    pub fn text(&self) -> Option<&str> {
        self.choices.first().map(|choice| choice.text.as_str())
    }
}

/// A choice in a legacy text completion response
#[derive(Debug, Clone, Deserialize)]
pub struct TextChoice {
    /// The generated text
    pub text: String,

    /// The index of this choice in the list
    #[serde(default)]
    pub index: u32,

    /// The reason the model stopped generating
    pub finish_reason: Option<FinishReason>,
}

/// The reason the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// The model finished naturally
    Stop,

    /// The model hit the max token limit
    Length,

    /// Content was filtered
    ContentFilter,

    /// Any reason this client does not model
    #[serde(other)]
    Other,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Deserialize, Default)]
pub struct Usage {
    /// Number of tokens in the prompt
    #[serde(default)]
    pub prompt_tokens: u32,

    /// Number of tokens in the completion
    #[serde(default)]
    pub completion_tokens: u32,

    /// Total number of tokens used
    #[serde(default)]
    pub total_tokens: u32,
}

/// The error envelope of a non-success response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// The error details
    pub error: ApiErrorDetail,
}

/// Error details reported by the API
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    /// Human readable message
    pub message: String,

    /// Error category, e.g. `invalid_request_error`
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}
