//! Domain types for the todo front-end.
//!
//! The view root owns a [`TodoState`]: the fetched todos, the selected
//! [`Filter`], the transient [`ErrorState`] and the bookkeeping that keeps the
//! fetch exactly-once and the dismiss timer single. Every input to it is a
//! [`TodoAction`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::selector::{self, TodoSummary};

/// Identifier of the user whose todos are shown
///
/// Zero is not a valid user id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Creates a user id, rejecting zero
    #[must_use]
    pub const fn new(id: u64) -> Option<Self> {
        if id == 0 { None } else { Some(Self(id)) }
    }

    /// Returns the raw id
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo as served by the read API
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier, assigned by the API
    pub id: u64,
    /// Owner of the todo
    #[serde(rename = "userId")]
    pub user_id: u64,
    /// Title/description of the todo
    pub title: String,
    /// Whether the todo is completed
    pub completed: bool,
}

impl Todo {
    /// Creates a todo record
    #[must_use]
    pub fn new(id: u64, user_id: u64, title: impl Into<String>, completed: bool) -> Self {
        Self {
            id,
            user_id,
            title: title.into(),
            completed,
        }
    }
}

/// View-selection criterion over the todo collection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Every todo
    #[default]
    All,
    /// Todos not yet completed
    Active,
    /// Completed todos
    Completed,
}

impl Filter {
    /// All filters, in the order the filter bar shows them
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    /// Whether `todo` is visible under this filter
    #[must_use]
    pub const fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Active => !todo.completed,
            Self::Completed => todo.completed,
        }
    }

    /// Lowercase name, as accepted by [`FromStr`]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Label shown in the filter bar
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no filter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown filter `{0}` (expected all, active or completed)")]
pub struct ParseFilterError(String);

impl FromStr for Filter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(ParseFilterError(other.to_string())),
        }
    }
}

/// Transient notification state for fetch failures
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorState {
    /// Nothing shown
    #[default]
    None,
    /// The todo list could not be loaded
    LoadError,
}

impl ErrorState {
    /// Whether a notification is shown
    #[must_use]
    pub const fn is_shown(self) -> bool {
        matches!(self, Self::LoadError)
    }

    /// Text of the notification, if one is shown
    #[must_use]
    pub const fn message(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::LoadError => Some("Unable to load todos"),
        }
    }
}

/// Progress of the one fetch a session performs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadStatus {
    /// Not requested yet
    #[default]
    Idle,
    /// Request in flight
    Loading,
    /// Todos received
    Loaded,
    /// Request failed
    Failed,
}

/// State owned by the view root
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// Todos in the order the API returned them
    pub todos: Vec<Todo>,
    /// Selected filter
    pub filter: Filter,
    /// Error notification
    pub error: ErrorState,
    /// Fetch progress
    pub load_status: LoadStatus,
    /// Bumped on every transition into [`ErrorState::LoadError`]; a dismiss
    /// timer only clears the notice it was armed for
    pub error_generation: u64,
    /// When the todos were received
    pub loaded_at: Option<DateTime<Utc>>,
}

impl TodoState {
    /// Creates an empty state: no todos, filter `All`, no error
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Todos visible under the current filter, in original order
    #[must_use]
    pub fn visible_todos(&self) -> Vec<Todo> {
        selector::select_visible(&self.todos, self.filter)
    }

    /// Summary of the visible todos
    #[must_use]
    pub fn summary(&self) -> TodoSummary {
        TodoSummary::of(&self.visible_todos())
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }

    /// Whether the dismiss timer armed for `generation` has nothing left to
    /// clear: its notice is gone or a newer one replaced it
    #[must_use]
    pub const fn dismiss_settled(&self, generation: u64) -> bool {
        !self.error.is_shown() || self.error_generation != generation
    }
}

/// Every input the view root reacts to
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoAction {
    // ========== Lifecycle ==========
    /// The view was mounted; triggers the session's single fetch
    Mounted,

    /// The fetch collaborator returned the todo list
    TodosLoaded {
        /// Todos for the configured user
        todos: Vec<Todo>,
    },

    /// The fetch collaborator failed
    TodosFailed {
        /// Rendered [`crate::api::LoadError`]
        error: String,
    },

    /// The dismiss timer armed for `generation` fired
    ErrorTimerElapsed {
        /// Value of [`TodoState::error_generation`] when the timer was armed
        generation: u64,
    },

    // ========== User controls ==========
    /// A filter link was clicked
    FilterSelected {
        /// Newly selected filter
        filter: Filter,
    },

    /// The notification's close button was clicked
    DismissError,

    /// The new-todo form was submitted
    AddTodoSubmitted {
        /// Raw input
        title: String,
    },

    /// The clear-completed button was clicked
    ClearCompletedClicked,

    /// The toggle-all button was clicked
    ToggleAllClicked,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;

    #[test]
    fn user_id_rejects_zero() {
        assert_eq!(UserId::new(0), None);
        assert_eq!(UserId::new(11135).map(UserId::get), Some(11135));
        assert_eq!(UserId::new(7).map(|id| id.to_string()), Some("7".to_string()));
    }

    #[test]
    fn todo_uses_camel_case_user_id_on_the_wire() {
        let json = r#"{"id":3,"userId":11135,"title":"Write tests","completed":true}"#;
        let todo: Todo = serde_json::from_str(json).unwrap();

        assert_eq!(todo, Todo::new(3, 11135, "Write tests", true));
        assert!(serde_json::to_string(&todo).unwrap().contains("\"userId\":11135"));
    }

    #[test]
    fn filter_parses_case_insensitively() {
        assert_eq!("Active".parse::<Filter>(), Ok(Filter::Active));
        assert_eq!(" completed ".parse::<Filter>(), Ok(Filter::Completed));
        assert_eq!("all".parse::<Filter>(), Ok(Filter::All));
        assert!("done".parse::<Filter>().is_err());
    }

    #[test]
    fn filter_defaults_to_all() {
        assert_eq!(Filter::default(), Filter::All);
        assert_eq!(TodoState::new().filter, Filter::All);
    }

    #[test]
    fn error_state_message() {
        assert_eq!(ErrorState::None.message(), None);
        assert!(!ErrorState::None.is_shown());
        assert_eq!(ErrorState::LoadError.message(), Some("Unable to load todos"));
        assert!(ErrorState::LoadError.is_shown());
    }

    #[test]
    fn todo_state_counts() {
        let mut state = TodoState::new();
        assert_eq!(state.count(), 0);
        assert_eq!(state.completed_count(), 0);

        state.todos = vec![Todo::new(1, 1, "a", false), Todo::new(2, 1, "b", true)];
        state.filter = Filter::Active;

        assert_eq!(state.count(), 2);
        assert_eq!(state.completed_count(), 1);
        assert_eq!(state.visible_todos(), vec![Todo::new(1, 1, "a", false)]);
        assert_eq!(state.summary().count, 1);
    }

    #[test]
    fn dismiss_settles_when_notice_clears_or_is_replaced() {
        let mut state = TodoState {
            error: ErrorState::LoadError,
            error_generation: 2,
            ..TodoState::new()
        };
        assert!(!state.dismiss_settled(2));
        assert!(state.dismiss_settled(1));

        state.error = ErrorState::None;
        assert!(state.dismiss_settled(2));
    }
}
