//! Shared HTTP transport for OpenAI-compatible completion endpoints.
//!
//! `HttpProvider` wraps a `reqwest::Client` with pre-configured headers,
//! the endpoint URL and a per-request timeout. Non-success statuses are
//! turned into [`CompletionError::Api`] using the error envelope the API
//! returns.

use crate::{CompletionError, response::ApiErrorBody};
use reqwest::{
    Client, Method,
    header::{self, HeaderMap, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Shared HTTP transport for OpenAI-compatible providers.
#[derive(Clone)]
pub struct HttpProvider {
    client: Client,
    headers: HeaderMap,
    endpoint: String,
    timeout: Duration,
}

impl HttpProvider {
    /// Create a provider with Bearer token authentication.
    ///
    /// A blank key is rejected before any request is built.
    pub fn bearer(client: Client, key: &str, endpoint: &str) -> Result<Self, CompletionError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(CompletionError::MissingCredential);
        }

        let mut provider = Self::no_auth(client, endpoint);
        let mut auth: HeaderValue = format!("Bearer {key}").parse()?;
        auth.set_sensitive(true);
        provider.headers.insert(header::AUTHORIZATION, auth);
        Ok(provider)
    }

    /// Create a provider without authentication (e.g. a local proxy).
    pub fn no_auth(client: Client, endpoint: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        Self {
            client,
            headers,
            endpoint: endpoint.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// POST a JSON body and deserialize the JSON response.
    pub async fn send<T: DeserializeOwned>(
        &self,
        body: &impl Serialize,
    ) -> Result<T, CompletionError> {
        tracing::trace!("request: {}", serde_json::to_string(body)?);
        let response = self
            .client
            .request(Method::POST, &self.endpoint)
            .headers(self.headers.clone())
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.transport_error(e))?;
        tracing::trace!("response ({status}): {text}");

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|body| body.error.message)
                .unwrap_or(text);
            tracing::warn!("completion API returned {status}: {message}");
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(Into::into)
    }

    fn transport_error(&self, e: reqwest::Error) -> CompletionError {
        if e.is_timeout() {
            CompletionError::Timeout(self.timeout)
        } else {
            CompletionError::Transport(e)
        }
    }

    /// Get the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get a reference to the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
