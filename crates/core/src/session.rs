//! The single-owner session context.

use crate::{ArchivedSession, Roster, SessionError, SlotId, TimelineEntry, UserSlot, timeline};
use serde::Serialize;

/// All chat bookkeeping for one running front end.
///
/// Owns the roster and the archive list. Memory state lives with the
/// memory adapter; callers reset it alongside [`Session::new_chat`].
#[derive(Debug, Default, Clone, Serialize)]
pub struct Session {
    roster: Roster,
    archives: Vec<ArchivedSession>,
}

impl Session {
    /// Create an empty session: no users, no archives.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Add a user slot.
    pub fn add_user(&mut self) -> SlotId {
        let id = self.roster.add_user();
        tracing::info!("added user {id}");
        id
    }

    /// Remove a user slot; unknown ids are ignored.
    pub fn remove_user(&mut self, id: SlotId) -> Option<UserSlot> {
        let removed = self.roster.remove_user(id);
        if removed.is_some() {
            tracing::info!("removed user {id}");
        }
        removed
    }

    /// Remove the most recently added user slot.
    pub fn remove_last_user(&mut self) -> Option<SlotId> {
        let removed = self.roster.remove_last();
        if let Some(id) = removed {
            tracing::info!("removed user {id}");
        }
        removed
    }

    /// Record a completed turn for a slot.
    pub fn record_turn(
        &mut self,
        id: SlotId,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.roster.try_slot_mut(id)?.push_turn(input, output);
        Ok(())
    }

    /// The slot's draft input.
    pub fn draft(&self, id: SlotId) -> Result<&str, SessionError> {
        self.roster.try_slot(id).map(UserSlot::draft)
    }

    /// Replace the slot's draft input.
    pub fn set_draft(&mut self, id: SlotId, text: impl Into<String>) -> Result<(), SessionError> {
        self.roster.try_slot_mut(id)?.set_draft(text);
        Ok(())
    }

    /// Merge and render the combined timeline for the current state.
    pub fn timeline(&self) -> Vec<TimelineEntry> {
        let events = timeline::merge(&self.roster);
        timeline::render(&events, &self.roster)
    }

    /// Archive the current histories and clear them.
    ///
    /// Slots with no turns contribute nothing; when no slot has turns no
    /// archive is created. Roster membership is untouched. Returns whether
    /// an archive entry was added.
    pub fn new_chat(&mut self) -> bool {
        let archived = match ArchivedSession::capture(&self.roster) {
            Some(archive) => {
                tracing::info!("archived chat with {} lines", archive.len());
                self.archives.push(archive);
                true
            }
            None => false,
        };

        self.roster.clear_histories();
        archived
    }

    /// Archived transcripts, oldest first.
    pub fn archives(&self) -> &[ArchivedSession] {
        &self.archives
    }

    /// Drop every archived transcript.
    pub fn clear_all_archives(&mut self) {
        self.archives.clear();
    }
}
