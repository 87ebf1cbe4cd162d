//! MemoryBot gateway: configuration, CLI and the browser front end.
//!
//! Serves a single page where several simulated users chat with one
//! completion backend that remembers what it has been told. All users
//! share one [`ChatContext`]; requests are handled one at a time.

pub use chat::{ChatContext, ChatError, PageView, Settings, UserView};
pub use cli::{Cli, Command};
pub use config::MemoryBotConfig;
pub use provider::{Connector, OpenAIConnector};
pub use routes::router;
pub use serve::{ServeHandle, serve, serve_with_connector};
pub use state::AppState;

pub mod chat;
pub mod cli;
pub mod config;
pub mod page;
pub mod provider;
pub mod routes;
pub mod serve;
pub mod state;
pub mod utils;
