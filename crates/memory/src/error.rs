//! Memory and chain errors.

use llm::CompletionError;

/// Why a memory step or a conversation turn failed.
#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    /// The completion backend failed.
    #[error(transparent)]
    Completion(#[from] CompletionError),

    /// A prompt template failed to render.
    #[error("failed to render prompt: {0}")]
    Prompt(#[from] minijinja::Error),
}

impl MemoryError {
    /// The underlying completion failure, if any.
    pub fn completion(&self) -> Option<&CompletionError> {
        match self {
            Self::Completion(e) => Some(e),
            Self::Prompt(_) => None,
        }
    }
}
