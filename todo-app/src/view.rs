//! Render model for the todo view root.
//!
//! [`AppView::from_state`] decides what is on screen; [`render_text`] turns
//! that into plain text for the terminal front-end. Both are pure: rendering
//! never touches state or arms timers.

use crate::selector::TodoSummary;
use crate::types::{Filter, Todo, TodoState, UserId};
use std::fmt::Write as _;

/// Shown instead of the app when no user id is configured
pub const USER_WARNING: &str =
    "Please set TODOVIEW_USER_ID to the id of the user whose todos should be shown";

/// Everything the front-end draws
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppView {
    /// No user configured; nothing else is drawn
    UserWarning,
    /// The todo app
    Main(MainView),
}

/// The todo app proper
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MainView {
    /// Header toggle, present when any todo is visible
    pub toggle_all: Option<ToggleAllView>,
    /// Visible todos, in order
    pub items: Vec<TodoRow>,
    /// Present when any todo is visible
    pub footer: Option<FooterView>,
    /// Error notice
    pub notification: Option<NotificationView>,
}

/// Toggle-all control in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleAllView {
    /// Some visible todo is still open
    pub active: bool,
}

/// One line of the todo list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRow {
    /// Todo id
    pub id: u64,
    /// Todo title
    pub title: String,
    /// Whether the todo is ticked
    pub completed: bool,
}

impl From<Todo> for TodoRow {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            completed: todo.completed,
        }
    }
}

/// Counter, filter links and clear-completed button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterView {
    /// `1 item left` / `N items left`
    pub items_left_label: String,
    /// One link per filter
    pub filters: Vec<FilterLink>,
    /// Some visible todo is completed
    pub show_clear_completed: bool,
}

/// Filter bar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterLink {
    /// Filter the link selects
    pub filter: Filter,
    /// Link is the current filter
    pub selected: bool,
}

/// Error notice with its close button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    /// Notice text
    pub message: &'static str,
}

impl AppView {
    /// Builds the view for `state`
    ///
    /// Header controls, list and footer are all driven by the *visible*
    /// todos: when the current filter hides everything they disappear.
    #[must_use]
    pub fn from_state(state: &TodoState, user_id: Option<UserId>) -> Self {
        if user_id.is_none() {
            return Self::UserWarning;
        }

        let visible = state.visible_todos();
        let summary = TodoSummary::of(&visible);
        let notification = state.error.message().map(|message| NotificationView { message });

        if summary.is_empty() {
            return Self::Main(MainView {
                notification,
                ..MainView::default()
            });
        }

        Self::Main(MainView {
            toggle_all: Some(ToggleAllView {
                active: summary.has_active,
            }),
            items: visible.into_iter().map(TodoRow::from).collect(),
            footer: Some(FooterView {
                items_left_label: summary.items_left_label(),
                filters: Filter::ALL
                    .into_iter()
                    .map(|filter| FilterLink {
                        filter,
                        selected: filter == state.filter,
                    })
                    .collect(),
                show_clear_completed: summary.has_completed,
            }),
            notification,
        })
    }
}

/// Plain-text rendering of `view`
///
/// ```text
/// todos
/// (toggle all)
/// [ ] Buy milk
/// [x] Write docs
/// 2 items left | [All] Active Completed | Clear completed
/// ! Unable to load todos (dismiss)
/// ```
#[must_use]
pub fn render_text(view: &AppView) -> String {
    let main = match view {
        AppView::UserWarning => return format!("{USER_WARNING}\n"),
        AppView::Main(main) => main,
    };

    let mut out = String::from("todos\n");

    if let Some(toggle) = main.toggle_all {
        out.push_str(if toggle.active {
            "(toggle all)\n"
        } else {
            "(toggle all: all done)\n"
        });
    }

    for row in &main.items {
        let mark = if row.completed { 'x' } else { ' ' };
        let _ = writeln!(out, "[{mark}] {}", row.title);
    }

    if let Some(footer) = &main.footer {
        let links: Vec<String> = footer
            .filters
            .iter()
            .map(|link| {
                if link.selected {
                    format!("[{}]", link.filter.label())
                } else {
                    link.filter.label().to_string()
                }
            })
            .collect();
        let _ = write!(out, "{} | {}", footer.items_left_label, links.join(" "));
        if footer.show_clear_completed {
            out.push_str(" | Clear completed");
        }
        out.push('\n');
    }

    if let Some(notification) = &main.notification {
        let _ = writeln!(out, "! {} (dismiss)", notification.message);
    }

    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)] // Test code can use unwrap/panic
mod tests {
    use super::*;
    use crate::types::ErrorState;

    const USER: Option<UserId> = UserId::new(11135);

    fn state_with(todos: Vec<Todo>, filter: Filter) -> TodoState {
        TodoState {
            todos,
            filter,
            ..TodoState::new()
        }
    }

    fn main_view(view: AppView) -> MainView {
        match view {
            AppView::Main(main) => main,
            AppView::UserWarning => panic!("expected the main view"),
        }
    }

    #[test]
    fn missing_user_shows_warning() {
        let view = AppView::from_state(&TodoState::new(), None);
        assert_eq!(view, AppView::UserWarning);
        assert_eq!(render_text(&view), format!("{USER_WARNING}\n"));
    }

    #[test]
    fn empty_list_hides_header_list_and_footer() {
        let main = main_view(AppView::from_state(&TodoState::new(), USER));
        assert_eq!(main, MainView::default());
        assert_eq!(render_text(&AppView::Main(main)), "todos\n");
    }

    #[test]
    fn footer_counts_visible_todos() {
        let todos = vec![
            Todo::new(1, 11135, "a", false),
            Todo::new(2, 11135, "b", true),
            Todo::new(3, 11135, "c", false),
        ];

        let all = main_view(AppView::from_state(&state_with(todos.clone(), Filter::All), USER));
        assert_eq!(all.footer.unwrap().items_left_label, "3 items left");

        let completed = main_view(AppView::from_state(
            &state_with(todos, Filter::Completed),
            USER,
        ));
        let footer = completed.footer.unwrap();
        assert_eq!(footer.items_left_label, "1 item left");
        assert!(footer.show_clear_completed);
        assert_eq!(completed.toggle_all, Some(ToggleAllView { active: false }));
    }

    #[test]
    fn clear_completed_only_with_visible_completed_todos() {
        let todos = vec![Todo::new(1, 11135, "a", false), Todo::new(2, 11135, "b", true)];
        let active = main_view(AppView::from_state(&state_with(todos, Filter::Active), USER));

        let footer = active.footer.unwrap();
        assert!(!footer.show_clear_completed);
        assert_eq!(
            footer.filters,
            vec![
                FilterLink { filter: Filter::All, selected: false },
                FilterLink { filter: Filter::Active, selected: true },
                FilterLink { filter: Filter::Completed, selected: false },
            ]
        );
        assert_eq!(active.toggle_all, Some(ToggleAllView { active: true }));
    }

    #[test]
    fn filter_hiding_everything_hides_footer() {
        let todos = vec![Todo::new(1, 11135, "a", false)];
        let main = main_view(AppView::from_state(&state_with(todos, Filter::Completed), USER));
        assert!(main.items.is_empty());
        assert!(main.footer.is_none());
        assert!(main.toggle_all.is_none());
    }

    #[test]
    fn notification_follows_error_state() {
        let mut state = TodoState::new();
        assert!(main_view(AppView::from_state(&state, USER)).notification.is_none());

        state.error = ErrorState::LoadError;
        let main = main_view(AppView::from_state(&state, USER));
        assert_eq!(
            main.notification,
            Some(NotificationView {
                message: "Unable to load todos"
            })
        );
    }

    #[test]
    fn renders_rows_footer_and_notification() {
        let mut state = state_with(
            vec![Todo::new(1, 11135, "Buy milk", false), Todo::new(2, 11135, "Write docs", true)],
            Filter::All,
        );
        state.error = ErrorState::LoadError;

        let text = render_text(&AppView::from_state(&state, USER));
        assert_eq!(
            text,
            "todos\n\
             (toggle all)\n\
             [ ] Buy milk\n\
             [x] Write docs\n\
             2 items left | [All] Active Completed | Clear completed\n\
             ! Unable to load todos (dismiss)\n"
        );
    }
}
