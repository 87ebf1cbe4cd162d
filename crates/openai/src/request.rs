//! Request bodies for the OpenAI endpoints

use crate::Model;
use llm::Message;
use serde::Serialize;

/// Token limit for legacy text completions.
const TEXT_MAX_TOKENS: usize = 256;

/// The request body for the chat completions endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// The model we are using
    pub model: Model,

    /// The messages to send to the API
    pub messages: Vec<Message>,

    /// The temperature to use for the response
    pub temperature: f32,
}

impl ChatRequest {
    /// Wrap a rendered prompt as a single user message
    pub fn new(model: Model, prompt: &str, temperature: f32) -> Self {
        Self {
            model,
            messages: vec![Message::user(prompt)],
            temperature,
        }
    }
}

/// The request body for the legacy text completions endpoint
#[derive(Debug, Clone, Serialize)]
pub struct TextRequest {
    /// The model we are using
    pub model: Model,

    /// The rendered prompt
    pub prompt: String,

    /// The temperature to use for the response
    pub temperature: f32,

    /// The maximum number of tokens to generate
    pub max_tokens: usize,
}

impl TextRequest {
    /// Create a text completion request
    pub fn new(model: Model, prompt: &str, temperature: f32) -> Self {
        Self {
            model,
            prompt: prompt.to_owned(),
            temperature,
            max_tokens: TEXT_MAX_TOKENS,
        }
    }
}
