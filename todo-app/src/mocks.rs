//! In-memory fetch collaborator for tests.

use crate::api::{LoadError, TodoApi};
use crate::types::{Todo, UserId};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Mock [`TodoApi`]
///
/// Answers every request with the same scripted outcome, optionally after a
/// delay, and records the user ids it was asked for. Clones share the record.
#[derive(Debug, Clone)]
pub struct MockTodoApi {
    response: Result<Vec<Todo>, LoadError>,
    latency: Duration,
    requests: Arc<Mutex<Vec<UserId>>>,
}

impl Default for MockTodoApi {
    fn default() -> Self {
        Self::returning(Vec::new())
    }
}

impl MockTodoApi {
    /// Mock that succeeds with `todos`
    #[must_use]
    pub fn returning(todos: Vec<Todo>) -> Self {
        Self {
            response: Ok(todos),
            latency: Duration::ZERO,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Mock that fails with `error`
    #[must_use]
    pub fn failing(error: LoadError) -> Self {
        Self {
            response: Err(error),
            ..Self::default()
        }
    }

    /// Delay each answer by `latency`
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of `get_todos` calls so far
    #[must_use]
    pub fn calls(&self) -> usize {
        self.requests().len()
    }

    /// User ids requested so far, oldest first
    #[must_use]
    pub fn requests(&self) -> Vec<UserId> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl TodoApi for MockTodoApi {
    async fn get_todos(&self, user_id: UserId) -> Result<Vec<Todo>, LoadError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(user_id);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.response.clone()
    }
}
