//! Shared helpers for gateway tests.

#![allow(dead_code)]

use llm::{Completion, CompletionError, ScriptedProvider};
use memorybot_gateway::{ChatContext, Connector, Settings};
use openai::Model;
use std::time::Duration;

/// Connector handing out a scripted backend, enforcing the credential.
#[derive(Clone)]
pub struct ScriptedConnector(pub ScriptedProvider);

impl Connector for ScriptedConnector {
    type Provider = ScriptedProvider;

    fn connect(
        &self,
        credential: &str,
        _model: Model,
    ) -> Result<ScriptedProvider, CompletionError> {
        if credential.trim().is_empty() {
            return Err(CompletionError::MissingCredential);
        }
        Ok(self.0.clone())
    }
}

/// Backend that finds no entities and answers `re: <input>`.
pub fn echo() -> ScriptedProvider {
    ScriptedProvider::new(|prompt| {
        if prompt.contains("Extract all of the proper nouns") {
            return Ok("NONE".to_owned());
        }
        let input = prompt
            .rsplit("Human: ")
            .next()
            .and_then(|tail| tail.strip_suffix("\nYou:"))
            .unwrap_or_default();
        Ok(format!(" re: {input} "))
    })
}

/// Backend that never answers in time.
#[derive(Clone)]
pub struct Stalled;

impl Completion for Stalled {
    async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok("too late".to_owned())
    }
}

/// Connector for [`Stalled`].
pub struct StalledConnector;

impl Connector for StalledConnector {
    type Provider = Stalled;

    fn connect(&self, _credential: &str, _model: Model) -> Result<Stalled, CompletionError> {
        Ok(Stalled)
    }
}

/// Settings with a credential already entered.
pub fn settings() -> Settings {
    Settings {
        credential: "sk-test-1234".to_owned(),
        ..Settings::default()
    }
}

/// A context with a credential and a one minute timeout.
pub fn context() -> ChatContext {
    ChatContext::new(settings(), Duration::from_secs(60))
}
