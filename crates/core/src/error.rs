//! Session errors.

use crate::SlotId;

/// Errors raised by session bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The slot id is not (or no longer) in the roster.
    #[error("unknown user slot {0}")]
    UnknownSlot(SlotId),
}
