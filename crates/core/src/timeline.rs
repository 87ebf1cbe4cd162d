//! Combined conversation timeline.
//!
//! Merging is split from rendering. [`merge`] stamps one question and one
//! answer event per turn with a global counter, walking slots in roster
//! order and turns in chronological order, then sorts by stamp. No
//! per-turn wall-clock time is kept, so the result is each user's full
//! history in roster order, not a true interleave.
//!
//! [`render`] resolves events against the roster as it is *now*. Events
//! pointing at a slot or turn index that has since disappeared are
//! skipped.

use crate::{Roster, SlotId};
use serde::Serialize;

/// Whether an event refers to the user input or the generated reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The user's input.
    Question,
    /// The generated reply.
    Answer,
}

/// A reference to one side of one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineEvent {
    /// Slot the turn belongs to.
    pub slot: SlotId,
    /// Turn index within the slot.
    pub turn: usize,
    /// Question or answer.
    pub kind: EventKind,
    /// Global ordering stamp.
    pub stamp: u64,
}

/// A rendered timeline line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    /// Slot the line belongs to.
    pub slot: SlotId,
    /// Question or answer.
    pub kind: EventKind,
    /// Display text, already labelled.
    pub text: String,
}

/// Stamp every turn of every active slot and sort by stamp.
pub fn merge(roster: &Roster) -> Vec<TimelineEvent> {
    let mut events = Vec::new();
    let mut stamp = 0u64;
    for (slot, user) in roster.iter() {
        for turn in 0..user.generated().len() {
            for kind in [EventKind::Question, EventKind::Answer] {
                events.push(TimelineEvent {
                    slot,
                    turn,
                    kind,
                    stamp,
                });
                stamp += 1;
            }
        }
    }

    events.sort_by_key(|event| event.stamp);
    events
}

/// Resolve events into display lines, skipping stale references.
pub fn render(events: &[TimelineEvent], roster: &Roster) -> Vec<TimelineEntry> {
    events
        .iter()
        .filter_map(|event| {
            let user = roster.slot(event.slot)?;
            let text = match event.kind {
                EventKind::Question => {
                    format!("User {}: {}", event.slot, user.past().get(event.turn)?)
                }
                EventKind::Answer => format!(
                    "Bot (for User {}): {}",
                    event.slot,
                    user.generated().get(event.turn)?
                ),
            };
            Some(TimelineEntry {
                slot: event.slot,
                kind: event.kind,
                text,
            })
        })
        .collect()
}
