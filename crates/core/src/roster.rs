//! Ordered roster of active user slots.
//!
//! Slots are keyed by [`SlotId`]. Ids grow monotonically, so the map's
//! key order is also the order in which users were added.

use crate::{SessionError, SlotId, UserSlot};
use serde::Serialize;
use std::collections::BTreeMap;

/// The active user slots, in insertion order.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Roster {
    slots: BTreeMap<SlotId, UserSlot>,
    #[serde(skip)]
    next_id: u64,
}

impl Roster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new slot with empty history and draft.
    pub fn add_user(&mut self) -> SlotId {
        let id = SlotId::new(self.next_id);
        self.next_id += 1;
        self.slots.insert(id, UserSlot::default());
        id
    }

    /// Remove a slot if it is active. No other slot is affected.
    pub fn remove_user(&mut self, id: SlotId) -> Option<UserSlot> {
        self.slots.remove(&id)
    }

    /// Remove the most recently added slot.
    pub fn remove_last(&mut self) -> Option<SlotId> {
        self.slots.pop_last().map(|(id, _)| id)
    }

    /// Whether the slot is active.
    pub fn contains(&self, id: SlotId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Get an active slot.
    pub fn slot(&self, id: SlotId) -> Option<&UserSlot> {
        self.slots.get(&id)
    }

    /// Get an active slot, failing on unknown ids.
    pub fn try_slot(&self, id: SlotId) -> Result<&UserSlot, SessionError> {
        self.slots.get(&id).ok_or(SessionError::UnknownSlot(id))
    }

    /// Get an active slot mutably, failing on unknown ids.
    pub fn try_slot_mut(&mut self, id: SlotId) -> Result<&mut UserSlot, SessionError> {
        self.slots.get_mut(&id).ok_or(SessionError::UnknownSlot(id))
    }

    /// Active slot ids in roster order.
    pub fn ids(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.slots.keys().copied()
    }

    /// Active slots in roster order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &UserSlot)> {
        self.slots.iter().map(|(id, slot)| (*id, slot))
    }

    /// Clear every slot's history and draft; membership is kept.
    pub(crate) fn clear_histories(&mut self) {
        self.slots.values_mut().for_each(UserSlot::clear);
    }

    /// Number of active slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
