//! The conversation chain: memory in, completion, memory out.

use crate::{Memory, MemoryError, PromptTemplate};
use llm::Completion;
use minijinja::context;

/// Runs one conversational turn against a completion backend.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    template: PromptTemplate,
}

impl Conversation {
    /// Use a custom conversation template.
    ///
    /// The template receives `entities`, `history` and `input`.
    pub fn new(template: PromptTemplate) -> Self {
        Self { template }
    }

    /// Produce a reply to `input`, updating `memory` with the turn.
    ///
    /// Nothing is saved to memory unless the completion succeeds.
    pub async fn run<P: Completion, M: Memory>(
        &self,
        provider: &P,
        memory: &mut M,
        input: &str,
    ) -> Result<String, MemoryError> {
        let loaded = memory.load(provider, input).await?;
        let prompt = self.template.render(context! {
            entities => loaded.entities_block(),
            history => loaded.history,
            input => input,
        })?;

        let output = provider.complete(&prompt).await?;
        let output = output.trim().to_owned();
        memory.save(provider, input, &output).await?;
        Ok(output)
    }
}
