//! Completion backend construction.
//!
//! The credential and model are chosen in the page, so the backend is
//! built per turn from the current settings rather than once at startup.

use llm::{Client, Completion, CompletionError};
use openai::{Model, OpenAI};
use std::time::Duration;

/// Builds a completion backend from the page settings.
pub trait Connector: Send + Sync + 'static {
    /// The backend produced.
    type Provider: Completion;

    /// Build a backend for `model` authenticated with `credential`.
    ///
    /// Fails with [`CompletionError::MissingCredential`] on a blank
    /// credential without touching the network.
    fn connect(&self, credential: &str, model: Model) -> Result<Self::Provider, CompletionError>;
}

/// Connects to the OpenAI API (or a compatible base URL).
#[derive(Clone)]
pub struct OpenAIConnector {
    client: Client,
    base_url: Option<String>,
    timeout: Duration,
}

impl OpenAIConnector {
    /// Create a connector sharing one HTTP client across turns.
    pub fn new(client: Client, base_url: Option<String>, timeout: Duration) -> Self {
        Self {
            client,
            base_url,
            timeout,
        }
    }
}

impl Connector for OpenAIConnector {
    type Provider = OpenAI;

    fn connect(&self, credential: &str, model: Model) -> Result<OpenAI, CompletionError> {
        let provider = match &self.base_url {
            Some(base) => OpenAI::custom(self.client.clone(), credential, model, base)?,
            None => OpenAI::new(self.client.clone(), credential, model)?,
        };
        Ok(provider.with_timeout(self.timeout))
    }
}
