//! Command-line front end for the todo client.
//!
//! Every invocation fetches the list from the remote store, applies at most
//! one change, and prints the visible rows.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use todosync::{add_todo, AppAction, AppReducer, AppState, Config, HttpTodoApi, TodoEnvironment, TodoList, VisibilityFilter};
use todosync_core::environment::SystemClock;
use todosync_runtime::{EffectHandle, Store};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Parser, Debug)]
#[command(name = "todosync")]
#[command(about = "Keep a todo list in sync with a remote store")]
#[command(version)]
struct Cli {
    /// Visibility filter (SHOW_ALL, SHOW_ACTIVE, SHOW_COMPLETED)
    #[arg(long)]
    filter: Option<VisibilityFilter>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the visible todos
    List,
    /// Create a todo
    Add {
        /// Text of the new todo
        text: String,
    },
    /// Toggle the completed flag of a visible todo
    Toggle {
        /// Position in the printed list, starting at 1
        index: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    let cli = Cli::parse();

    init_tracing(&config.log_filter);

    let api = HttpTodoApi::new(config.api_url.clone(), config.request_timeout())
        .context("building the remote store client")?;
    tracing::info!(api_url = api.base_url(), "Starting todosync");

    let env = TodoEnvironment::new(Arc::new(api), Arc::new(SystemClock));
    let store = Store::new(AppState::default(), AppReducer::new(), env);

    let filter = cli.filter.unwrap_or_else(|| config.visibility_filter.clone());
    store.send(AppAction::SetVisibilityFilter(filter)).await?;

    let mut list = TodoList::new();
    settle(list.mount(&store).await?).await;

    match cli.command.unwrap_or(Command::List) {
        Command::List => {},
        Command::Add { text } => settle(add_todo(&store, &text).await?).await,
        Command::Toggle { index } => match index.checked_sub(1) {
            Some(position) => settle(list.on_click(&store, position).await?).await,
            None => anyhow::bail!("todo positions start at 1"),
        },
    }

    let (rows, completed, total) = store
        .state(|state| (list.render(state), state.todos.completed_count(), state.todos.items.len()))
        .await;
    for (i, row) in rows.iter().enumerate() {
        println!("{:>3}. {row}", i + 1);
    }
    println!("{completed}/{total} completed");

    store.shutdown(SHUTDOWN_TIMEOUT).await?;
    Ok(())
}

async fn settle(handle: Option<EffectHandle>) {
    if let Some(mut handle) = handle {
        handle.wait().await;
    }
}

fn init_tracing(filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(filter)
                .unwrap_or_else(|_| todosync::config::DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}
