//! Typed completion failures.

use std::time::Duration;

/// Why a completion call did not produce text.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// No API key was supplied; no request was attempted.
    #[error("an API key is required to call the completion API")]
    MissingCredential,

    /// The request did not finish within the configured timeout.
    #[error("completion request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The API answered with a non-success status.
    #[error("completion API returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message reported by the API, or the raw body.
        message: String,
    },

    /// The API answered successfully but with no usable choice.
    #[error("completion API returned no choices")]
    EmptyResponse,

    /// Connection, TLS or protocol failure.
    #[error("completion transport failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response body was not the expected JSON.
    #[error("failed to decode completion response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The credential could not be encoded as a header value.
    #[error("invalid credential: {0}")]
    InvalidCredential(#[from] reqwest::header::InvalidHeaderValue),
}
