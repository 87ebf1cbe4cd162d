//! The chat context shared by every request.
//!
//! Holds the session bookkeeping, the entity memory and the page settings
//! together, so one lock covers a whole turn.

use crate::{provider::Connector, utils::mask_credential};
use llm::CompletionError;
use mcore::{ArchivedSession, Session, SessionError, SlotId, TimelineEntry};
use memory::{Conversation, EntityMemory, Memory, MemoryError};
use openai::Model;
use serde::Serialize;
use std::time::Duration;

/// Settings chosen in the sidebar.
#[derive(Debug, Clone)]
pub struct Settings {
    /// API credential; empty until supplied.
    pub credential: String,
    /// Selected model.
    pub model: Model,
    /// Memory window K.
    pub window: usize,
    /// Show the entity store preview.
    pub preview_store: bool,
    /// Show the turn buffer preview.
    pub preview_buffer: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            credential: String::new(),
            model: Model::default(),
            window: memory::DEFAULT_WINDOW,
            preview_store: false,
            preview_buffer: false,
        }
    }
}

/// Why a chat operation did not complete.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// The slot does not exist.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The submitted text was blank.
    #[error("nothing to send")]
    EmptyInput,

    /// The backend could not be built or failed to answer.
    #[error(transparent)]
    Completion(#[from] CompletionError),

    /// Memory or prompt handling failed.
    #[error(transparent)]
    Memory(MemoryError),

    /// The turn took longer than the configured timeout.
    #[error("the reply took longer than {}s; try again", .0.as_secs())]
    TimedOut(Duration),
}

impl From<MemoryError> for ChatError {
    fn from(err: MemoryError) -> Self {
        match err {
            MemoryError::Completion(err) => Self::Completion(err),
            err => Self::Memory(err),
        }
    }
}

/// Session, memory and settings for the running front end.
pub struct ChatContext {
    session: Session,
    memory: EntityMemory,
    conversation: Conversation,
    settings: Settings,
    notice: Option<String>,
    timeout: Duration,
}

impl ChatContext {
    /// Create an empty context with no users.
    pub fn new(settings: Settings, timeout: Duration) -> Self {
        Self {
            session: Session::new(),
            memory: EntityMemory::new(settings.window),
            conversation: Conversation::default(),
            settings,
            notice: None,
            timeout,
        }
    }

    /// The session bookkeeping.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The entity memory.
    pub fn memory(&self) -> &EntityMemory {
        &self.memory
    }

    /// The current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The last failure notice, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Replace the settings, applying the window to memory at once.
    ///
    /// A blank credential keeps the current one.
    pub fn update_settings(&mut self, mut settings: Settings) {
        if settings.credential.trim().is_empty() {
            settings.credential = std::mem::take(&mut self.settings.credential);
        }
        settings.credential = settings.credential.trim().to_owned();
        self.memory.set_window(settings.window);
        settings.window = self.memory.window();
        tracing::info!(
            "settings updated: model {}, window {}",
            settings.model,
            settings.window
        );
        self.settings = settings;
    }

    /// Add a user slot.
    pub fn add_user(&mut self) -> SlotId {
        self.session.add_user()
    }

    /// Remove the most recently added user slot.
    pub fn remove_last_user(&mut self) -> Option<SlotId> {
        self.session.remove_last_user()
    }

    /// Remove a specific user slot.
    pub fn remove_user(&mut self, id: SlotId) -> Result<(), ChatError> {
        self.session
            .remove_user(id)
            .map(drop)
            .ok_or(ChatError::Session(SessionError::UnknownSlot(id)))
    }

    /// Archive the current chat, clear histories and reset memory.
    pub fn new_chat(&mut self) -> bool {
        let archived = self.session.new_chat();
        self.memory.reset();
        self.notice = None;
        archived
    }

    /// Drop every archived transcript.
    pub fn clear_archives(&mut self) {
        self.session.clear_all_archives();
        tracing::info!("cleared archives");
    }

    /// Submit `input` for slot `id` and record the reply.
    ///
    /// Blank input is ignored without touching the draft or the notice.
    /// Otherwise the input is kept as the slot's draft until the turn
    /// succeeds, and any failure is kept as the page notice.
    pub async fn submit<C: Connector>(
        &mut self,
        connector: &C,
        id: SlotId,
        input: &str,
    ) -> Result<String, ChatError> {
        self.session.draft(id)?;
        if input.trim().is_empty() {
            return Err(ChatError::EmptyInput);
        }

        self.session.set_draft(id, input)?;
        match self.run_turn(connector, id, input).await {
            Ok(reply) => {
                self.notice = None;
                Ok(reply)
            }
            Err(err) => {
                tracing::warn!("turn for user {id} failed: {err}");
                self.notice = Some(err.to_string());
                Err(err)
            }
        }
    }

    async fn run_turn<C: Connector>(
        &mut self,
        connector: &C,
        id: SlotId,
        input: &str,
    ) -> Result<String, ChatError> {
        let input = input.trim();
        let provider = connector.connect(&self.settings.credential, self.settings.model)?;
        let turn = self.conversation.run(&provider, &mut self.memory, input);
        let reply = tokio::time::timeout(self.timeout, turn)
            .await
            .map_err(|_| ChatError::TimedOut(self.timeout))??;

        self.session.record_turn(id, input, reply.as_str())?;
        self.session.set_draft(id, "")?;
        tracing::debug!("user {id} turn recorded");
        Ok(reply)
    }

    /// Copy everything the page shows.
    pub fn view(&self) -> PageView {
        let roster = self.session.roster();
        let snapshot = (self.settings.preview_store || self.settings.preview_buffer)
            .then(|| self.memory.snapshot());

        PageView {
            credential_set: !self.settings.credential.is_empty(),
            credential_hint: (!self.settings.credential.is_empty())
                .then(|| mask_credential(&self.settings.credential)),
            model: self.settings.model,
            models: Model::ALL.iter().map(|model| model.as_str()).collect(),
            window: self.settings.window,
            preview_store: self.settings.preview_store,
            preview_buffer: self.settings.preview_buffer,
            notice: self.notice.clone(),
            users: roster
                .iter()
                .map(|(id, slot)| UserView {
                    id,
                    draft: slot.draft().to_owned(),
                    turns: slot.turns(),
                })
                .collect(),
            timeline: self.session.timeline(),
            archives: self.session.archives().to_vec(),
            store: snapshot
                .as_ref()
                .filter(|_| self.settings.preview_store)
                .map(|snapshot| snapshot.store.clone()),
            buffer: snapshot
                .filter(|_| self.settings.preview_buffer)
                .map(|snapshot| snapshot.buffer),
        }
    }
}

/// Everything the page renders, also served as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    /// Whether a credential has been supplied.
    pub credential_set: bool,
    /// Masked credential for the placeholder.
    pub credential_hint: Option<String>,
    /// Selected model.
    pub model: Model,
    /// Selectable models, in menu order.
    pub models: Vec<&'static str>,
    /// Memory window K.
    pub window: usize,
    /// Whether the entity store preview is on.
    pub preview_store: bool,
    /// Whether the buffer preview is on.
    pub preview_buffer: bool,
    /// Last failure notice.
    pub notice: Option<String>,
    /// Active users in roster order.
    pub users: Vec<UserView>,
    /// Combined timeline.
    pub timeline: Vec<TimelineEntry>,
    /// Archived transcripts, oldest first.
    pub archives: Vec<ArchivedSession>,
    /// Entity store preview, when enabled.
    pub store: Option<Vec<(String, String)>>,
    /// Buffer preview, when enabled.
    pub buffer: Option<Vec<String>>,
}

/// One user's input form.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    /// Slot id.
    pub id: SlotId,
    /// Retained draft.
    pub draft: String,
    /// Completed turns.
    pub turns: usize,
}
