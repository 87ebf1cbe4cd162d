//! The completion backend abstraction

use crate::CompletionError;

/// A backend that turns a fully rendered prompt into generated text.
///
/// Memory extraction, entity summaries and the conversation reply all go
/// through this single call, so one implementation serves every prompt
/// the chat issues.
pub trait Completion: Clone + Send + Sync {
    /// Generate a completion for the prompt.
    fn complete(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, CompletionError>> + Send;
}
