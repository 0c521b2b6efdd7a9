//! Visible-todos selector.
//!
//! Pure functions from the todo collection and the selected filter to what
//! the list and footer show. Nothing here touches state.

use crate::types::{Filter, Todo};

/// Todos matching `filter`, in their original relative order
///
/// Total: an empty input yields an empty output for every filter.
///
/// # Example
///
/// ```
/// use todoview::selector::select_visible;
/// use todoview::{Filter, Todo};
///
/// let todos = vec![Todo::new(1, 7, "a", false), Todo::new(2, 7, "b", true)];
/// assert_eq!(select_visible(&todos, Filter::Active), vec![Todo::new(1, 7, "a", false)]);
/// assert_eq!(select_visible(&todos, Filter::All), todos);
/// ```
#[must_use]
pub fn select_visible(todos: &[Todo], filter: Filter) -> Vec<Todo> {
    todos.iter().filter(|todo| filter.matches(todo)).cloned().collect()
}

/// Derived facts about the visible todos
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TodoSummary {
    /// Number of visible todos
    pub count: usize,
    /// At least one visible todo is not completed
    pub has_active: bool,
    /// At least one visible todo is completed
    pub has_completed: bool,
}

impl TodoSummary {
    /// Summarises an already filtered list
    #[must_use]
    pub fn of(visible: &[Todo]) -> Self {
        Self {
            count: visible.len(),
            has_active: visible.iter().any(|t| !t.completed),
            has_completed: visible.iter().any(|t| t.completed),
        }
    }

    /// Whether there is anything to list
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Footer counter text
    #[must_use]
    pub fn items_left_label(&self) -> String {
        if self.count == 1 {
            "1 item left".to_string()
        } else {
            format!("{} items left", self.count)
        }
    }
}
