//! Completion client contract and shared HTTP transport.
//!
//! This crate provides the pieces every completion backend shares: the
//! [`Completion`] trait, the typed [`CompletionError`], the OpenAI-style
//! wire types in [`response`] and [`Message`], and [`HttpProvider`] for
//! JSON-over-HTTPS transport with a request timeout.

pub use error::CompletionError;
pub use http::{DEFAULT_TIMEOUT, HttpProvider};
pub use message::{Message, Role};
pub use provider::Completion;
pub use reqwest::{self, Client};
pub use response::{ChatResponse, FinishReason, TextResponse, Usage};
#[cfg(feature = "testing")]
pub use testing::ScriptedProvider;

mod error;
mod http;
mod message;
mod provider;
pub mod response;
#[cfg(feature = "testing")]
mod testing;
