//! Entity summary store.

/// Entity summaries backed by `Vec<(String, String)>`.
///
/// Keeps first-seen order so the diagnostic view is stable between
/// renders.
#[derive(Clone, Default, Debug)]
pub struct EntityStore {
    entries: Vec<(String, String)>,
}

impl EntityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the summary for an entity.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Get all entity/summary pairs.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Set (upsert) a summary. Returns the previous summary if the entity existed.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        if let Some(existing) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(std::mem::replace(&mut existing.1, value))
        } else {
            self.entries.push((key, value));
            None
        }
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
