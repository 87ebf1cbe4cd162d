//! Entity memory.

use crate::{
    EntityStore, Memory, MemoryContext, MemoryError, MemorySnapshot, PromptTemplate, TurnBuffer,
};
use llm::Completion;
use minijinja::context;

/// Default number of recent turns folded into each prompt.
pub const DEFAULT_WINDOW: usize = 3;

/// Smallest accepted window.
pub const MIN_WINDOW: usize = 3;

/// Marker the extraction prompt returns when nothing is worth noting.
const NO_ENTITIES: &str = "NONE";

/// Memory that tracks summaries of the entities the users mention.
#[derive(Debug, Clone)]
pub struct EntityMemory {
    store: EntityStore,
    buffer: TurnBuffer,
    window: usize,
    /// Entities extracted by the last `load`, summarized on `save`.
    pending: Vec<String>,
    extraction: PromptTemplate,
    summarization: PromptTemplate,
}

impl EntityMemory {
    /// Create an empty memory folding the last `window` turns into prompts.
    ///
    /// Windows below [`MIN_WINDOW`] are raised to it.
    pub fn new(window: usize) -> Self {
        Self {
            store: EntityStore::new(),
            buffer: TurnBuffer::new(),
            window: window.max(MIN_WINDOW),
            pending: Vec::new(),
            extraction: PromptTemplate::entity_extraction(),
            summarization: PromptTemplate::entity_summarization(),
        }
    }

    /// The current window.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Change the window for subsequent prompts.
    pub fn set_window(&mut self, window: usize) {
        self.window = window.max(MIN_WINDOW);
    }

    /// The entity summaries.
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// The buffered turns.
    pub fn buffer(&self) -> &TurnBuffer {
        &self.buffer
    }
}

impl Default for EntityMemory {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl Memory for EntityMemory {
    async fn load<P: Completion>(
        &mut self,
        provider: &P,
        input: &str,
    ) -> Result<MemoryContext, MemoryError> {
        let history = self.buffer.render(self.window);
        let prompt = self.extraction.render(context! {
            history => &history,
            input => input,
        })?;
        let output = provider.complete(&prompt).await?;
        self.pending = parse_entities(&output);
        tracing::debug!("extracted entities: {:?}", self.pending);

        let entities = self
            .pending
            .iter()
            .map(|name| {
                let summary = self.store.get(name).unwrap_or_default().to_owned();
                (name.clone(), summary)
            })
            .collect();
        Ok(MemoryContext { history, entities })
    }

    async fn save<P: Completion>(
        &mut self,
        provider: &P,
        input: &str,
        output: &str,
    ) -> Result<(), MemoryError> {
        // Nothing is committed until every summary call has succeeded.
        let mut buffer = self.buffer.clone();
        buffer.push_turn(input, output);
        let history = buffer.render(self.window);

        let mut updates = Vec::with_capacity(self.pending.len());
        for entity in &self.pending {
            let summary = self.store.get(entity).unwrap_or_default();
            let prompt = self.summarization.render(context! {
                history => &history,
                entity => entity,
                summary => summary,
                input => input,
            })?;
            let updated = provider.complete(&prompt).await?;
            tracing::debug!("updated summary of {entity}");
            updates.push(updated.trim().to_owned());
        }

        self.buffer = buffer;
        for (entity, summary) in std::mem::take(&mut self.pending).into_iter().zip(updates) {
            self.store.set(entity, summary);
        }
        Ok(())
    }

    fn snapshot(&self) -> MemorySnapshot {
        MemorySnapshot {
            store: self.store.entries().to_vec(),
            buffer: self.buffer.lines(),
        }
    }

    fn reset(&mut self) {
        self.store.clear();
        self.buffer.clear();
        self.pending.clear();
    }
}

/// Parse the extraction output into distinct entity names.
fn parse_entities(output: &str) -> Vec<String> {
    let output = output.trim();
    if output == NO_ENTITIES {
        return Vec::new();
    }

    let mut names: Vec<String> = Vec::new();
    for name in output.split(',').map(str::trim) {
        if name.is_empty() || name == NO_ENTITIES || names.iter().any(|n| n == name) {
            continue;
        }
        names.push(name.to_owned());
    }
    names
}
