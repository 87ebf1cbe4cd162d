//! Session bookkeeping for the MemoryBot chat front end.
//!
//! Tracks the active user slots, their turn histories and drafts, the
//! archived transcripts of past chats, and the merged timeline shown on
//! the page. Everything here is synchronous and free of I/O; the gateway
//! owns a single [`Session`] and threads it through every request.
//!
//! # Example
//!
//! ```rust
//! use memorybot_core::Session;
//!
//! let mut session = Session::new();
//! let alice = session.add_user();
//! session.record_turn(alice, "hi", "hello").unwrap();
//!
//! assert!(session.new_chat());
//! assert_eq!(session.archives()[0].lines(), ["User 0: hi", "Bot 0: hello"]);
//! ```

pub use archive::ArchivedSession;
pub use error::SessionError;
pub use roster::Roster;
pub use session::Session;
pub use slot::{SlotId, UserSlot};
pub use timeline::{EventKind, TimelineEntry, TimelineEvent};

pub mod archive;
mod error;
pub mod roster;
mod session;
mod slot;
pub mod timeline;
