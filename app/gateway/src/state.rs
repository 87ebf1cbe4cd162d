//! Shared application state for the gateway server.

use crate::{chat::ChatContext, page::Page, provider::Connector};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared state available to all request handlers.
pub struct AppState<C: Connector> {
    /// The chat context; locked for the whole of each request.
    pub chat: Arc<Mutex<ChatContext>>,
    /// Builds the completion backend for each turn.
    pub connector: Arc<C>,
    /// Compiled page templates.
    pub page: Arc<Page>,
}

impl<C: Connector> AppState<C> {
    /// Wrap a context and connector for sharing across handlers.
    pub fn new(chat: ChatContext, connector: C) -> Result<Self, minijinja::Error> {
        Ok(Self {
            chat: Arc::new(Mutex::new(chat)),
            connector: Arc::new(connector),
            page: Arc::new(Page::new()?),
        })
    }
}

impl<C: Connector> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            chat: Arc::clone(&self.chat),
            connector: Arc::clone(&self.connector),
            page: Arc::clone(&self.page),
        }
    }
}
