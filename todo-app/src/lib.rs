//! Single-user todo list front-end.
//!
//! Fetches the todos of one configured user once, lets the viewer filter
//! them, and reports load failures through a notice that dismisses itself
//! after a few seconds. Adding, clearing and toggling todos are rendered
//! but not wired to a backend yet.
//!
//! - [`selector`]: visible-todos selection
//! - [`TodoReducer`]: fetch-on-mount and the error notice lifecycle
//! - [`view`]: render model and plain-text rendering
//! - [`api`]: the HTTP fetch collaborator
//!
//! # Quick Start
//!
//! ```no_run
//! use todoview::api::HttpTodoApi;
//! use todoview::view::{render_text, AppView};
//! use todoview::{TodoAction, TodoEnvironment, TodoReducer, TodoState, UserId};
//! use todoview_core::environment::SystemClock;
//! use todoview_runtime::Store;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let user_id = UserId::new(11135);
//! let api = Arc::new(HttpTodoApi::new("https://mate.academy/students-api"));
//! let env = TodoEnvironment::new(api, Arc::new(SystemClock), user_id);
//! let store = Store::new(TodoState::new(), TodoReducer::new(), env);
//!
//! // Fetch and wait for the result to be applied
//! store.send(TodoAction::Mounted).await?.wait().await;
//!
//! let view = store.state(|s| AppView::from_state(s, user_id)).await;
//! print!("{}", render_text(&view));
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod capabilities;
pub mod command;
pub mod config;
pub mod mocks;
pub mod reducer;
pub mod selector;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use api::{HttpTodoApi, LoadError, TodoApi};
pub use capabilities::{CapabilityError, TodoCommands};
pub use config::{AppConfig, ConfigError};
pub use reducer::{TodoEnvironment, TodoReducer};
pub use types::{ErrorState, Filter, LoadStatus, Todo, TodoAction, TodoState, UserId};
