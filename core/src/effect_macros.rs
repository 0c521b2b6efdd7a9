//! Declarative macros for ergonomic effect construction
//!
//! These macros reduce boilerplate when creating `Effect` variants from
//! reducers.

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use todoview_core::async_effect;
///
/// async_effect! {
///     match api.get_todos(user_id).await {
///         Ok(todos) => Some(TodoAction::TodosLoaded { todos }),
///         Err(error) => Some(TodoAction::TodosFailed { error: error.to_string() }),
///     }
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Delay` for scheduling delayed actions
///
/// # Example
///
/// ```rust,ignore
/// use todoview_core::delay;
/// use std::time::Duration;
///
/// delay! {
///     duration: Duration::from_secs(3),
///     action: TodoAction::ErrorTimerElapsed { generation: 1 }
/// }
/// ```
#[macro_export]
macro_rules! delay {
    (
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Delay {
            duration: $duration,
            action: ::std::boxed::Box::new($action),
        }
    };
}

/// Wrap an effect so it is registered under an id and can be aborted
///
/// # Example
///
/// ```rust,ignore
/// use todoview_core::{cancellable, delay};
///
/// cancellable! {
///     id: DISMISS_TIMER,
///     effect: delay! { duration: d, action: TodoAction::ErrorTimerElapsed { generation } }
/// }
/// ```
#[macro_export]
macro_rules! cancellable {
    (
        id: $id:expr,
        effect: $effect:expr
    ) => {
        $crate::effect::Effect::Cancellable {
            id: $id,
            effect: ::std::boxed::Box::new($effect),
        }
    };
}

/// Create an `Effect::Cancel` for the effect registered under an id
#[macro_export]
macro_rules! cancel {
    ($id:expr) => {
        $crate::effect::Effect::Cancel { id: $id }
    };
}
