//! Terminal front-end for the todo list.
//!
//! Fetches the configured user's todos, prints the view, then applies one
//! command per stdin line and prints the view again. Logs go to stderr.

use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use todoview::command::{Command, HELP};
use todoview::view::{render_text, AppView};
use todoview::{
    AppConfig, HttpTodoApi, TodoAction, TodoEnvironment, TodoReducer, TodoState, UserId,
};
use todoview_core::environment::SystemClock;
use todoview_runtime::Store;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type TodoStore = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(1);
const REDRAW_TIMEOUT: Duration = Duration::from_secs(1);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        user_id = ?config.user_id.map(UserId::get),
        api_url = %config.api_url,
        "Configuration loaded"
    );

    let api = HttpTodoApi::with_timeout(&config.api_url, config.http_timeout())
        .context("failed to build HTTP client")?;
    let env = TodoEnvironment::new(Arc::new(api), Arc::new(SystemClock), config.user_id)
        .with_error_dismiss_delay(config.error_dismiss_delay());
    let store = Store::new(TodoState::new(), TodoReducer::new(), env);

    let mut handle = store.send(TodoAction::Mounted).await?;
    if handle
        .wait_with_timeout(config.http_timeout() + Duration::from_secs(1))
        .await
        .is_err()
    {
        warn!("Todos are still loading");
    }
    print_view(&store, config.user_id).await;

    let redraw = spawn_redraw_on_auto_dismiss(store.clone(), config.user_id);

    eprintln!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(error) => {
                eprintln!("{error}");
                continue;
            },
        };
        if command == Command::Quit {
            break;
        }
        if let Some(action) = command.into_action() {
            store.send(action).await?;
        }
        print_view(&store, config.user_id).await;
    }

    redraw.abort();
    if let Err(error) = store.shutdown(SHUTDOWN_TIMEOUT).await {
        warn!(%error, "Store did not shut down cleanly");
    }
    info!("Bye");
    Ok(())
}

async fn print_view(store: &TodoStore, user_id: Option<UserId>) {
    let view = store.state(|state| AppView::from_state(state, user_id)).await;
    print!("{}", render_text(&view));
}

/// Redraws once the error notice has dismissed itself
fn spawn_redraw_on_auto_dismiss(
    store: TodoStore,
    user_id: Option<UserId>,
) -> tokio::task::JoinHandle<()> {
    let mut actions = store.subscribe_actions();
    tokio::spawn(async move {
        loop {
            match actions.recv().await {
                Ok(TodoAction::ErrorTimerElapsed { generation }) => {
                    // Broadcast precedes reduction
                    match store
                        .wait_for_state(|s| s.dismiss_settled(generation), REDRAW_TIMEOUT)
                        .await
                    {
                        Ok(()) => print_view(&store, user_id).await,
                        Err(error) => warn!(%error, "Notice did not clear"),
                    }
                },
                Ok(_) | Err(RecvError::Lagged(_)) => {},
                Err(RecvError::Closed) => break,
            }
        }
    })
}
