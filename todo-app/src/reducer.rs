//! Reducer for the todo view root.
//!
//! Owns three concerns: the single fetch performed on mount, the error
//! notice and its auto-dismiss timer, and the user controls.

use crate::api::TodoApi;
use crate::capabilities::{self, CapabilityError, TodoCommands};
use crate::types::{ErrorState, LoadStatus, TodoAction, TodoState, UserId};
use std::sync::Arc;
use std::time::Duration;
use todoview_core::{
    async_effect, cancel, cancellable, delay,
    effect::{Effect, EffectId},
    environment::Clock,
    reducer::Reducer,
    smallvec, SmallVec,
};

/// How long the error notice stays up unless dismissed
pub const DEFAULT_ERROR_DISMISS_DELAY: Duration = Duration::from_millis(3000);

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Fetch collaborator
    pub api: Arc<dyn TodoApi>,
    /// Mutating controls
    pub commands: Arc<dyn TodoCommands>,
    /// Clock for load timestamps
    pub clock: Arc<dyn Clock>,
    /// User whose todos are fetched; `None` shows the user warning
    pub user_id: Option<UserId>,
    /// Auto-dismiss delay of the error notice
    pub error_dismiss_delay: Duration,
}

impl TodoEnvironment {
    /// Creates an environment with unwired commands and the default
    /// dismiss delay
    #[must_use]
    pub fn new(api: Arc<dyn TodoApi>, clock: Arc<dyn Clock>, user_id: Option<UserId>) -> Self {
        Self {
            api,
            commands: Arc::new(capabilities::Unwired),
            clock,
            user_id,
            error_dismiss_delay: DEFAULT_ERROR_DISMISS_DELAY,
        }
    }

    /// Replaces the mutating controls
    #[must_use]
    pub fn with_commands(mut self, commands: Arc<dyn TodoCommands>) -> Self {
        self.commands = commands;
        self
    }

    /// Overrides the auto-dismiss delay
    #[must_use]
    pub const fn with_error_dismiss_delay(mut self, delay: Duration) -> Self {
        self.error_dismiss_delay = delay;
        self
    }
}

/// Reducer for the todo view root
#[derive(Clone, Debug)]
pub struct TodoReducer;

impl TodoReducer {
    /// Registration id of the error notice's dismiss timer
    pub const ERROR_DISMISS_TIMER: EffectId = EffectId::new("error-dismiss");

    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Shows the load error and arms its dismiss timer
    ///
    /// Only the `None -> LoadError` transition arms a timer; a failure while
    /// the notice is already up leaves the running timer alone.
    fn raise_load_error(
        state: &mut TodoState,
        env: &TodoEnvironment,
    ) -> SmallVec<[Effect<TodoAction>; 4]> {
        if state.error.is_shown() {
            return SmallVec::new();
        }

        state.error = ErrorState::LoadError;
        state.error_generation += 1;

        smallvec![cancellable! {
            id: Self::ERROR_DISMISS_TIMER,
            effect: delay! {
                duration: env.error_dismiss_delay,
                action: TodoAction::ErrorTimerElapsed {
                    generation: state.error_generation,
                }
            }
        }]
    }

    fn report(control: &str, result: Result<(), CapabilityError>) {
        match result {
            Ok(()) => tracing::debug!(control, "Control handled"),
            Err(error) => tracing::warn!(control, %error, "Control not carried out"),
        }
    }
}

impl Default for TodoReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Lifecycle ==========
            TodoAction::Mounted => {
                let Some(user_id) = env.user_id else {
                    tracing::warn!("No user id configured, skipping fetch");
                    return SmallVec::new();
                };
                if state.load_status != LoadStatus::Idle {
                    tracing::trace!(status = ?state.load_status, "Already fetched, ignoring mount");
                    return SmallVec::new();
                }

                state.load_status = LoadStatus::Loading;
                tracing::info!(%user_id, "Fetching todos");

                let api = Arc::clone(&env.api);
                smallvec![async_effect! {
                    match api.get_todos(user_id).await {
                        Ok(todos) => Some(TodoAction::TodosLoaded { todos }),
                        Err(error) => {
                            tracing::warn!(%error, "Failed to load todos");
                            Some(TodoAction::TodosFailed {
                                error: error.to_string(),
                            })
                        },
                    }
                }]
            },

            TodoAction::TodosLoaded { todos } => {
                tracing::info!(count = todos.len(), "Todos loaded");
                state.todos = todos;
                state.load_status = LoadStatus::Loaded;
                state.loaded_at = Some(env.clock.now());
                SmallVec::new()
            },

            TodoAction::TodosFailed { error } => {
                tracing::debug!(%error, "Showing load error");
                state.load_status = LoadStatus::Failed;
                Self::raise_load_error(state, env)
            },

            TodoAction::ErrorTimerElapsed { generation } => {
                if state.error.is_shown() && generation == state.error_generation {
                    tracing::debug!(generation, "Auto-dismissing load error");
                    state.error = ErrorState::None;
                } else {
                    tracing::trace!(generation, "Stale dismiss timer");
                }
                SmallVec::new()
            },

            // ========== User controls ==========
            TodoAction::FilterSelected { filter } => {
                state.filter = filter;
                SmallVec::new()
            },

            TodoAction::DismissError => {
                if !state.error.is_shown() {
                    return SmallVec::new();
                }
                state.error = ErrorState::None;
                smallvec![cancel!(Self::ERROR_DISMISS_TIMER)]
            },

            TodoAction::AddTodoSubmitted { title } => {
                match capabilities::normalize_title(&title) {
                    Ok(title) => Self::report("add-todo", env.commands.add_todo(title)),
                    Err(_) => tracing::trace!("Ignoring blank todo title"),
                }
                SmallVec::new()
            },

            TodoAction::ClearCompletedClicked => {
                Self::report("clear-completed", env.commands.clear_completed());
                SmallVec::new()
            },

            TodoAction::ToggleAllClicked => {
                Self::report("toggle-all", env.commands.toggle_all());
                SmallVec::new()
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use crate::mocks::MockTodoApi;
    use crate::types::{Filter, Todo};
    use std::sync::Mutex;
    use todoview_testing::{assertions, test_clock, ReducerTest};

    const USER: Option<UserId> = UserId::new(11135);

    fn create_test_env() -> TodoEnvironment {
        TodoEnvironment::new(Arc::new(MockTodoApi::default()), Arc::new(test_clock()), USER)
    }

    fn failed() -> TodoAction {
        TodoAction::TodosFailed {
            error: "API returned status 500".to_string(),
        }
    }

    /// Commands that record what they were asked to do
    #[derive(Default)]
    struct RecordingCommands {
        titles: Mutex<Vec<String>>,
    }

    impl TodoCommands for RecordingCommands {
        fn add_todo(&self, title: &str) -> Result<(), CapabilityError> {
            self.titles.lock().unwrap().push(title.to_string());
            Ok(())
        }

        fn clear_completed(&self) -> Result<(), CapabilityError> {
            Ok(())
        }

        fn toggle_all(&self) -> Result<(), CapabilityError> {
            Ok(())
        }
    }

    #[test]
    fn test_mount_starts_fetch() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_action(TodoAction::Mounted)
            .then_state(|state| {
                assert_eq!(state.load_status, LoadStatus::Loading);
                assert!(state.todos.is_empty());
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn test_second_mount_is_ignored() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_action(TodoAction::Mounted)
            .when_action(TodoAction::Mounted)
            .then_state(|state| assert_eq!(state.load_status, LoadStatus::Loading))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_mount_without_user_does_nothing() {
        let mut env = create_test_env();
        env.user_id = None;

        ReducerTest::new(TodoReducer::new())
            .with_env(env)
            .given_state(TodoState::new())
            .when_action(TodoAction::Mounted)
            .then_state(|state| assert_eq!(*state, TodoState::new()))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_loaded_replaces_todos() {
        let todos = vec![Todo::new(1, 11135, "a", false), Todo::new(2, 11135, "b", true)];
        let expected = todos.clone();

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState {
                todos: vec![Todo::new(9, 11135, "stale", false)],
                load_status: LoadStatus::Loading,
                ..TodoState::new()
            })
            .when_action(TodoAction::TodosLoaded { todos })
            .then_state(move |state| {
                assert_eq!(state.todos, expected);
                assert_eq!(state.load_status, LoadStatus::Loaded);
                assert_eq!(state.loaded_at, Some(test_clock().now()));
                assert_eq!(state.error, ErrorState::None);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_failure_shows_error_and_arms_timer() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState {
                load_status: LoadStatus::Loading,
                ..TodoState::new()
            })
            .when_action(failed())
            .then_state(|state| {
                assert_eq!(state.error, ErrorState::LoadError);
                assert_eq!(state.load_status, LoadStatus::Failed);
                assert_eq!(state.error_generation, 1);
                assert!(state.todos.is_empty());
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_cancellable(effects, &TodoReducer::ERROR_DISMISS_TIMER);
                assert_eq!(
                    assertions::delayed_actions(effects),
                    vec![(
                        Duration::from_millis(3000),
                        &TodoAction::ErrorTimerElapsed { generation: 1 }
                    )]
                );
            })
            .run();
    }

    #[test]
    fn test_failure_while_error_shown_arms_no_second_timer() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_action(failed())
            .when_action(failed())
            .then_state(|state| {
                assert_eq!(state.error, ErrorState::LoadError);
                assert_eq!(state.error_generation, 1);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_timer_clears_error() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_action(failed())
            .when_action(TodoAction::ErrorTimerElapsed { generation: 1 })
            .then_state(|state| {
                assert_eq!(state.error, ErrorState::None);
                assert!(state.todos.is_empty());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_stale_timer_is_noop() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_action(failed())
            .when_action(TodoAction::DismissError)
            .when_action(failed())
            .when_action(TodoAction::ErrorTimerElapsed { generation: 1 })
            .then_state(|state| {
                // The notice raised for generation 2 is still up
                assert_eq!(state.error, ErrorState::LoadError);
                assert_eq!(state.error_generation, 2);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_dismiss_clears_error_and_cancels_timer() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_action(failed())
            .when_action(TodoAction::DismissError)
            .then_state(|state| assert_eq!(state.error, ErrorState::None))
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_cancels(effects, &TodoReducer::ERROR_DISMISS_TIMER);
            })
            .run();
    }

    #[test]
    fn test_dismiss_without_error_is_noop() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_action(TodoAction::DismissError)
            .then_state(|state| assert_eq!(*state, TodoState::new()))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_filter_selection() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState {
                todos: vec![Todo::new(1, 11135, "a", false), Todo::new(2, 11135, "b", true)],
                ..TodoState::new()
            })
            .when_action(TodoAction::FilterSelected {
                filter: Filter::Completed,
            })
            .then_state(|state| {
                assert_eq!(state.filter, Filter::Completed);
                assert_eq!(state.visible_todos(), vec![Todo::new(2, 11135, "b", true)]);
                assert_eq!(state.count(), 2);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_unwired_controls_leave_state_unchanged() {
        let initial = TodoState {
            todos: vec![Todo::new(1, 11135, "a", true)],
            load_status: LoadStatus::Loaded,
            ..TodoState::new()
        };
        let expected = initial.clone();

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(initial)
            .when_action(TodoAction::AddTodoSubmitted {
                title: "Buy milk".to_string(),
            })
            .when_action(TodoAction::ClearCompletedClicked)
            .when_action(TodoAction::ToggleAllClicked)
            .then_state(move |state| assert_eq!(*state, expected))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_add_todo_trims_and_skips_blank_titles() {
        let commands = Arc::new(RecordingCommands::default());
        let env = create_test_env().with_commands(Arc::clone(&commands) as Arc<dyn TodoCommands>);

        ReducerTest::new(TodoReducer::new())
            .with_env(env)
            .given_state(TodoState::new())
            .when_action(TodoAction::AddTodoSubmitted {
                title: "   ".to_string(),
            })
            .when_action(TodoAction::AddTodoSubmitted {
                title: "  Write docs ".to_string(),
            })
            .then_effects(assertions::assert_no_effects)
            .run();

        assert_eq!(*commands.titles.lock().unwrap(), vec!["Write docs".to_string()]);
    }

    #[test]
    fn test_custom_dismiss_delay() {
        let env = create_test_env().with_error_dismiss_delay(Duration::from_millis(250));

        ReducerTest::new(TodoReducer::new())
            .with_env(env)
            .given_state(TodoState::new())
            .when_action(failed())
            .then_effects(|effects| {
                let delayed = assertions::delayed_actions(effects);
                assert_eq!(delayed.len(), 1);
                assert_eq!(delayed[0].0, Duration::from_millis(250));
            })
            .run();
    }
}
