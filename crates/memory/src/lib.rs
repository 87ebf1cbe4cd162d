//! Conversational entity memory for MemoryBot.
//!
//! Memory here is two things kept side by side: a store of short
//! summaries keyed by entity name (people, places, things the users talk
//! about), and a rolling buffer of the raw turns. Before each reply the
//! last `K` turns and the summaries of the entities named in the new input
//! are folded into the prompt; after each reply the summaries of those
//! entities are updated.
//!
//! Both steps ask the completion backend for help, so the [`Memory`]
//! trait is async and takes the backend by reference.
//!
//! # Example
//!
//! ```rust,ignore
//! use memorybot_memory::{Conversation, EntityMemory};
//!
//! let mut memory = EntityMemory::new(3);
//! let reply = Conversation::default()
//!     .run(&provider, &mut memory, "Alice lives in Paris.")
//!     .await?;
//! ```

pub use buffer::TurnBuffer;
pub use chain::Conversation;
pub use entity::{DEFAULT_WINDOW, EntityMemory, MIN_WINDOW};
pub use error::MemoryError;
pub use prompt::PromptTemplate;
pub use store::EntityStore;

use llm::Completion;
use serde::Serialize;

mod buffer;
mod chain;
mod entity;
mod error;
pub mod prompt;
mod store;

/// Memory folded into a single prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryContext {
    /// The recent turns, one `Human:`/`AI:` line each.
    pub history: String,
    /// Known summaries of the entities named in the input.
    pub entities: Vec<(String, String)>,
}

impl MemoryContext {
    /// Render entity summaries as `name: summary` lines.
    pub fn entities_block(&self) -> String {
        self.entities
            .iter()
            .map(|(name, summary)| format!("{name}: {summary}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A read-only copy of memory state for diagnostic display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MemorySnapshot {
    /// Entity summaries, in first-seen order.
    pub store: Vec<(String, String)>,
    /// Every buffered turn line, oldest first.
    pub buffer: Vec<String>,
}

/// The memory adapter contract used by the conversation chain.
pub trait Memory: Send {
    /// Gather the context for a new input.
    fn load<P: Completion>(
        &mut self,
        provider: &P,
        input: &str,
    ) -> impl Future<Output = Result<MemoryContext, MemoryError>> + Send;

    /// Record a completed turn and update what it taught us.
    fn save<P: Completion>(
        &mut self,
        provider: &P,
        input: &str,
        output: &str,
    ) -> impl Future<Output = Result<(), MemoryError>> + Send;

    /// Copy the current state for display.
    fn snapshot(&self) -> MemorySnapshot;

    /// Discard all accumulated state.
    fn reset(&mut self);
}
