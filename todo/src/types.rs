//! Domain types for the todo client.
//!
//! A todo list is an ordered collection of records owned by the remote
//! store. The client keeps a local copy plus one in-flight flag per request
//! kind, and a visibility filter that only affects rendering.

use crate::api::ApiError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

/// Server-assigned identifier of a todo record
///
/// Opaque to the client; it is only compared and echoed back in update URLs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Creates a `TodoId` from the server's identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when no identifier has been assigned yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single todo record as served by the remote store
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Server-assigned identifier
    #[serde(default, skip_serializing_if = "TodoId::is_empty")]
    pub id: TodoId,
    /// Text content
    pub text: String,
    /// Whether the todo is completed
    #[serde(default)]
    pub completed: bool,
    /// When the remote store created the record
    #[serde(rename = "create_at", alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Creates a todo record
    #[must_use]
    pub fn new(id: impl Into<TodoId>, text: impl Into<String>, completed: bool, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            completed,
            created_at,
        }
    }

    /// Returns a copy with `completed` inverted and everything else unchanged
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}

impl From<String> for TodoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// State of the todo collection
///
/// `items` keeps server response order (or append order for local creates).
/// Each flag guards its own request kind only; requests of different kinds
/// may be in flight at the same time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodosState {
    /// Todos in display order
    pub items: Vec<Todo>,
    /// A list request is in flight
    pub is_getting: bool,
    /// A create request is in flight
    pub is_creating: bool,
    /// An update request is in flight
    pub is_updating: bool,
}

impl TodosState {
    /// Creates a state holding the given items with no request in flight
    #[must_use]
    pub fn with_items(items: Vec<Todo>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|todo| todo.completed).count()
    }
}

/// Which subset of todos the list shows
///
/// Values are never validated: an unknown filter string is kept as-is and
/// renders like [`VisibilityFilter::ShowAll`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum VisibilityFilter {
    /// Every todo (`SHOW_ALL`)
    #[default]
    ShowAll,
    /// Todos not yet completed (`SHOW_ACTIVE`)
    ShowActive,
    /// Completed todos (`SHOW_COMPLETED`)
    ShowCompleted,
    /// Any other filter value
    Unrecognized(String),
}

impl VisibilityFilter {
    /// Wire name of the filter
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::ShowAll => "SHOW_ALL",
            Self::ShowActive => "SHOW_ACTIVE",
            Self::ShowCompleted => "SHOW_COMPLETED",
            Self::Unrecognized(other) => other,
        }
    }
}

impl FromStr for VisibilityFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "SHOW_ALL" => Self::ShowAll,
            "SHOW_ACTIVE" => Self::ShowActive,
            "SHOW_COMPLETED" => Self::ShowCompleted,
            other => Self::Unrecognized(other.to_string()),
        })
    }
}

impl std::fmt::Display for VisibilityFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The whole application state owned by the store
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    /// Todo collection
    pub todos: TodosState,
    /// Current visibility filter
    pub visibility_filter: VisibilityFilter,
}

/// Progress of one remote request
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request<T> {
    /// The request was dispatched
    Started,
    /// The remote store answered with a payload
    Succeeded(T),
    /// The request failed; no payload
    Failed(ApiError),
}

/// Lifecycle signals of the three request kinds
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoAction {
    /// Listing all todos
    FetchTodos(Request<Vec<Todo>>),
    /// Creating a todo
    CreateTodo(Request<Todo>),
    /// Updating a todo
    UpdateTodo(Request<Todo>),
}

/// Every input the application reducer accepts
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppAction {
    // ========== Intents ==========
    /// Fetch the todo list unless a fetch is already in flight
    FetchTodosIfNeeded,

    /// Create a todo unless a create is already in flight
    CreateTodoIfNeeded {
        /// Text of the new todo
        text: String,
    },

    /// Replace a todo's `completed` and `text` unless an update is already in flight
    UpdateTodoIfNeeded {
        /// The record as it should be stored
        todo: Todo,
    },

    /// Set the visibility filter
    SetVisibilityFilter(VisibilityFilter),

    // ========== Request lifecycle ==========
    /// A request started or settled
    Todos(TodoAction),
}

impl From<TodoAction> for AppAction {
    fn from(action: TodoAction) -> Self {
        Self::Todos(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2017, 3, 5, 12, 0, 0).unwrap()
    }

    #[test]
    fn todo_decodes_wire_format() {
        let todo: Todo = serde_json::from_str(
            r#"{"id":"58bbe1f0","text":"buy milk","completed":false,"create_at":"2017-03-05T20:00:00+08:00"}"#,
        )
        .unwrap();

        assert_eq!(todo, Todo::new("58bbe1f0", "buy milk", false, created()));
    }

    #[test]
    fn todo_accepts_created_at_alias() {
        let todo: Todo = serde_json::from_str(
            r#"{"id":"a","text":"x","completed":true,"createdAt":"2017-03-05T12:00:00Z"}"#,
        )
        .unwrap();

        assert!(todo.completed);
        assert_eq!(todo.created_at, created());
    }

    #[test]
    fn todo_without_id_omits_it() {
        let todo = Todo::new("", "draft", false, created());
        let json = serde_json::to_value(&todo).unwrap();

        assert!(json.get("id").is_none());
        assert_eq!(json["create_at"], "2017-03-05T12:00:00Z");
    }

    #[test]
    fn toggled_only_flips_completed() {
        let todo = Todo::new("a", "walk dog", false, created());
        let toggled = todo.toggled();

        assert!(toggled.completed);
        assert_eq!(toggled.id, todo.id);
        assert_eq!(toggled.text, todo.text);
        assert_eq!(toggled.created_at, todo.created_at);
        assert_eq!(toggled.toggled(), todo);
    }

    #[test]
    fn visibility_filter_parses_without_validation() {
        assert_eq!("SHOW_ALL".parse(), Ok(VisibilityFilter::ShowAll));
        assert_eq!("SHOW_ACTIVE".parse(), Ok(VisibilityFilter::ShowActive));
        assert_eq!("SHOW_COMPLETED".parse(), Ok(VisibilityFilter::ShowCompleted));
        assert_eq!(
            "SHOW_SOMEDAY".parse(),
            Ok(VisibilityFilter::Unrecognized("SHOW_SOMEDAY".to_string()))
        );
        assert_eq!(VisibilityFilter::Unrecognized("x".to_string()).to_string(), "x");
    }

    #[test]
    fn todos_state_counts_completed() {
        let state = TodosState::with_items(vec![
            Todo::new("a", "one", true, created()),
            Todo::new("b", "two", false, created()),
        ]);

        assert_eq!(state.completed_count(), 1);
        assert!(!state.is_getting && !state.is_creating && !state.is_updating);
    }
}
