//! Scripted completion backend for tests.
//!
//! Answers every prompt through a caller-supplied closure and records the
//! prompts it saw, so tests can exercise memory, chains and routes without
//! network access.

use crate::{Completion, CompletionError};
use parking_lot::Mutex;
use std::sync::Arc;

type Responder = dyn Fn(&str) -> Result<String, CompletionError> + Send + Sync;

/// A completion backend driven by a closure.
#[derive(Clone)]
pub struct ScriptedProvider {
    responder: Arc<Responder>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedProvider {
    /// Answer each prompt with the closure's result.
    pub fn new(
        responder: impl Fn(&str) -> Result<String, CompletionError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Arc::new(responder),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer every prompt with the same text.
    pub fn reply(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(move |_| Ok(text.clone()))
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    /// Number of prompts received so far.
    pub fn calls(&self) -> usize {
        self.prompts.lock().len()
    }
}

impl Completion for ScriptedProvider {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.prompts.lock().push(prompt.to_owned());
        (self.responder)(prompt)
    }
}
