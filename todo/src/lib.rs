//! Client for a remote todo list.
//!
//! The client keeps a local copy of the todo collection and synchronises it
//! with a remote store over HTTP. It is built on the reducer/effect runtime:
//!
//! - [`types`]: todo records, application state and actions
//! - [`api`]: the remote store client
//! - [`actions`]: guarded request creators, one request kind at a time
//! - [`reducer`]: state transitions and their composition into [`AppReducer`]
//! - [`view`]: list rendering, click and input handling
//! - [`config`]: environment configuration
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use todosync::{AppReducer, AppState, HttpTodoApi, TodoEnvironment, TodoList};
//! use todosync_core::environment::SystemClock;
//! use todosync_runtime::Store;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = HttpTodoApi::new("http://localhost:2048", None)?;
//! let env = TodoEnvironment::new(Arc::new(api), Arc::new(SystemClock));
//! let store = Store::new(AppState::default(), AppReducer::new(), env);
//!
//! // Fetch the list once and wait for the response to be merged
//! let mut list = TodoList::new();
//! if let Some(mut handle) = list.mount(&store).await? {
//!     handle.wait().await;
//! }
//!
//! let rows = store.state(|state| list.render(state)).await;
//! for row in rows {
//!     println!("{row}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod api;
pub mod config;
pub mod reducer;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use api::{ApiError, HttpTodoApi, TodoApi};
pub use config::Config;
pub use reducer::{AppReducer, TodoEnvironment, TodosReducer, VisibilityFilterReducer};
pub use types::{AppAction, AppState, Request, Todo, TodoAction, TodoId, TodosState, VisibilityFilter};
pub use view::{add_todo, get_visible_todos, TodoList, TodoRow, TodoStore};
