//! OpenAI completion provider.
//!
//! Serves the fixed set of models the chat front end offers. Chat models
//! go through the chat completions endpoint with the prompt as a single
//! user message; the older davinci models go through the legacy text
//! completions endpoint.

use llm::{ChatResponse, Client, Completion, CompletionError, HttpProvider, TextResponse};
pub use model::{Model, UnknownModel};
pub use request::{ChatRequest, TextRequest};
use std::time::Duration;

mod model;
mod request;

/// OpenAI endpoint URLs.
pub mod endpoint {
    /// Default API base.
    pub const BASE: &str = "https://api.openai.com/v1";
    /// Chat completions path.
    pub const CHAT: &str = "/chat/completions";
    /// Legacy text completions path.
    pub const TEXT: &str = "/completions";
}

/// Sampling temperature used for every request.
pub const TEMPERATURE: f32 = 0.0;

/// An OpenAI completion provider bound to one model.
#[derive(Clone)]
pub struct OpenAI {
    http: HttpProvider,
    model: Model,
    temperature: f32,
}

impl OpenAI {
    /// Create a provider targeting the OpenAI API.
    ///
    /// Fails with [`CompletionError::MissingCredential`] on a blank key.
    pub fn new(client: Client, key: &str, model: Model) -> Result<Self, CompletionError> {
        Self::custom(client, key, model, endpoint::BASE)
    }

    /// Create a provider targeting an OpenAI-compatible API base.
    pub fn custom(
        client: Client,
        key: &str,
        model: Model,
        base_url: &str,
    ) -> Result<Self, CompletionError> {
        let path = if model.is_chat() {
            endpoint::CHAT
        } else {
            endpoint::TEXT
        };
        let url = format!("{}{path}", base_url.trim_end_matches('/'));
        Ok(Self {
            http: HttpProvider::bearer(client, key, &url)?,
            model,
            temperature: TEMPERATURE,
        })
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = self.http.with_timeout(timeout);
        self
    }

    /// The model this provider calls.
    pub fn model(&self) -> Model {
        self.model
    }

    /// The endpoint this provider posts to.
    pub fn endpoint(&self) -> &str {
        self.http.endpoint()
    }
}

impl Completion for OpenAI {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        tracing::debug!("completing with {} ({} prompt bytes)", self.model, prompt.len());
        let text = if self.model.is_chat() {
            let body = ChatRequest::new(self.model, prompt, self.temperature);
            let response: ChatResponse = self.http.send(&body).await?;
            response.content().map(str::to_owned)
        } else {
            let body = TextRequest::new(self.model, prompt, self.temperature);
            let response: TextResponse = self.http.send(&body).await?;
            response.text().map(str::to_owned)
        };

        text.ok_or(CompletionError::EmptyResponse)
    }
}
