//! Archived chat transcripts.

use crate::Roster;
use serde::Serialize;

/// A frozen transcript of one past chat.
///
/// Lines alternate `User N: ...` and `Bot N: ...`, slots in roster order,
/// turns in chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ArchivedSession(Vec<String>);

impl ArchivedSession {
    /// Flatten every slot with history into one transcript.
    ///
    /// Returns `None` when no slot has a completed turn.
    pub fn capture(roster: &Roster) -> Option<Self> {
        let mut lines = Vec::new();
        for (id, slot) in roster.iter() {
            if slot.past().is_empty() || slot.generated().is_empty() {
                continue;
            }
            for (input, output) in slot.history() {
                lines.push(format!("User {id}: {input}"));
                lines.push(format!("Bot {id}: {output}"));
            }
        }

        (!lines.is_empty()).then_some(Self(lines))
    }

    /// The transcript lines.
    pub fn lines(&self) -> &[String] {
        &self.0
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the transcript has no lines.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
