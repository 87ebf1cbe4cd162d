//! Per-user slot state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity of a user slot.
///
/// Ids are handed out in increasing order and never reused, so removing
/// a slot never changes the identity of another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(u64);

impl SlotId {
    /// Wrap a raw id, e.g. one parsed from a request path.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw numeric id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single simulated user: turn history plus the in-progress draft.
///
/// `past` and `generated` are index-aligned; they only ever grow together
/// through [`UserSlot::push_turn`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserSlot {
    past: Vec<String>,
    generated: Vec<String>,
    draft: String,
}

impl UserSlot {
    /// Inputs submitted by this user, oldest first.
    pub fn past(&self) -> &[String] {
        &self.past
    }

    /// Replies generated for this user, index-aligned with [`past`](Self::past).
    pub fn generated(&self) -> &[String] {
        &self.generated
    }

    /// Current draft input.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the draft input.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Number of completed turns.
    pub fn turns(&self) -> usize {
        self.past.len()
    }

    /// Whether the slot has no completed turns.
    pub fn is_empty(&self) -> bool {
        self.past.is_empty()
    }

    /// Iterate `(input, output)` pairs in chronological order.
    pub fn history(&self) -> impl Iterator<Item = (&str, &str)> {
        self.past
            .iter()
            .zip(&self.generated)
            .map(|(input, output)| (input.as_str(), output.as_str()))
    }

    /// Append one completed turn.
    pub(crate) fn push_turn(&mut self, input: impl Into<String>, output: impl Into<String>) {
        self.past.push(input.into());
        self.generated.push(output.into());
    }

    /// Drop history and draft, keeping the slot itself.
    pub(crate) fn clear(&mut self) {
        self.past.clear();
        self.generated.clear();
        self.draft.clear();
    }
}
