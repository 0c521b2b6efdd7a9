//! Fetch collaborator: reads the todo list for a user from the remote API.
//!
//! The view root only sees the [`TodoApi`] trait. [`HttpTodoApi`] is the
//! production implementation; tests use [`crate::mocks::MockTodoApi`].

use crate::types::{Todo, UserId};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Why the todo list could not be fetched
///
/// All-or-nothing: a failed fetch never yields a partial list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The request could not be sent or the response not received
    #[error("request failed: {0}")]
    Request(String),

    /// The API answered with a non-success status
    #[error("API returned status {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// The response body was not a todo list
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Read access to a user's todos
#[async_trait]
pub trait TodoApi: Send + Sync {
    /// Fetches every todo belonging to `user_id`
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] on network, server, or decoding failure.
    async fn get_todos(&self, user_id: UserId) -> Result<Vec<Todo>, LoadError>;
}

/// [`TodoApi`] over HTTP
///
/// Issues `GET {base_url}/todos?userId={id}` and expects a JSON array of
/// `{id, userId, title, completed}` records. No retries.
#[derive(Clone, Debug)]
pub struct HttpTodoApi {
    client: Client,
    base_url: String,
}

impl HttpTodoApi {
    /// Create a client for the API rooted at `base_url`
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client whose requests give up after `timeout`
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Request`] if the HTTP client cannot be built
    /// (e.g. the TLS backend fails to initialise).
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LoadError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LoadError::Request(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Wrap an existing `reqwest` client
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl TodoApi for HttpTodoApi {
    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    async fn get_todos(&self, user_id: UserId) -> Result<Vec<Todo>, LoadError> {
        let response = self
            .client
            .get(format!("{}/todos", self.base_url))
            .query(&[("userId", user_id.get())])
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| LoadError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Todo API returned an error status");
            return Err(LoadError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LoadError::Request(e.to_string()))?;

        let todos: Vec<Todo> =
            serde_json::from_slice(&body).map_err(|e| LoadError::Decode(e.to_string()))?;

        tracing::debug!(count = todos.len(), "Fetched todos");
        Ok(todos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_drops_trailing_slashes() {
        let api = HttpTodoApi::new("https://example.test/api//");
        assert_eq!(api.base_url(), "https://example.test/api");
    }

    #[test]
    fn load_error_messages() {
        assert_eq!(
            LoadError::Status { status: 503 }.to_string(),
            "API returned status 503"
        );
        assert_eq!(
            LoadError::Request("connection refused".into()).to_string(),
            "request failed: connection refused"
        );
    }
}
