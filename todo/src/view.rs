//! View components.
//!
//! The views are plain values computed from [`AppState`]; user input turns
//! into intents sent to the store.

use crate::reducer::{AppReducer, TodoEnvironment};
use crate::types::{AppAction, AppState, Todo, VisibilityFilter};
use chrono::{DateTime, Local, TimeZone, Utc};
use todosync_runtime::{EffectHandle, Store, StoreError};

/// The store the views talk to
pub type TodoStore = Store<AppState, AppAction, TodoEnvironment, AppReducer>;

/// Returns the todos the filter lets through, in order
///
/// `ShowAll` and unrecognized filters let everything through.
#[must_use]
pub fn get_visible_todos<'a>(items: &'a [Todo], filter: &VisibilityFilter) -> Vec<&'a Todo> {
    match filter {
        VisibilityFilter::ShowCompleted => items.iter().filter(|todo| todo.completed).collect(),
        VisibilityFilter::ShowActive => items.iter().filter(|todo| !todo.completed).collect(),
        VisibilityFilter::ShowAll | VisibilityFilter::Unrecognized(_) => items.iter().collect(),
    }
}

/// Formats a timestamp as `YYYY/M/D` in the given time zone
#[must_use]
pub fn format_date<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.with_timezone(tz).format("%Y/%-m/%-d").to_string()
}

/// One rendered line of the list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoRow {
    /// Todo text
    pub text: String,
    /// Whether the todo is completed
    pub completed: bool,
    /// Creation date in local time
    pub created_on: String,
}

impl TodoRow {
    /// Builds the row for a todo, dating it in local time
    #[must_use]
    pub fn new(todo: &Todo) -> Self {
        Self::in_zone(todo, &Local)
    }

    /// Builds the row for a todo, dating it in `tz`
    #[must_use]
    pub fn in_zone<Tz: TimeZone>(todo: &Todo, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            text: todo.text.clone(),
            completed: todo.completed,
            created_on: format_date(&todo.created_at, tz),
        }
    }
}

impl std::fmt::Display for TodoRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let marker = if self.completed { "[x]" } else { "[ ]" };
        write!(f, "{marker} {}  {}", self.text, self.created_on)
    }
}

/// The todo list component
#[derive(Debug, Default)]
pub struct TodoList {
    mounted: bool,
}

impl TodoList {
    /// Creates an unmounted list
    #[must_use]
    pub const fn new() -> Self {
        Self { mounted: false }
    }

    /// Whether [`TodoList::mount`] already ran
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Fetches the todos on first mount; later calls do nothing
    ///
    /// A mount the store rejects leaves the list unmounted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store no longer accepts actions.
    pub async fn mount(&mut self, store: &TodoStore) -> Result<Option<EffectHandle>, StoreError> {
        if self.mounted {
            return Ok(None);
        }

        tracing::debug!("Mounting todo list");
        let handle = store.send(AppAction::FetchTodosIfNeeded).await?;
        self.mounted = true;
        Ok(Some(handle))
    }

    /// Renders the visible todos
    #[must_use]
    pub fn render(&self, state: &AppState) -> Vec<TodoRow> {
        get_visible_todos(&state.todos.items, &state.visibility_filter)
            .into_iter()
            .map(TodoRow::new)
            .collect()
    }

    /// Toggles the `index`-th visible todo
    ///
    /// An index with no visible todo is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store no longer accepts actions.
    pub async fn on_click(&self, store: &TodoStore, index: usize) -> Result<Option<EffectHandle>, StoreError> {
        let clicked = store
            .state(|state| {
                get_visible_todos(&state.todos.items, &state.visibility_filter)
                    .get(index)
                    .map(|todo| todo.toggled())
            })
            .await;

        let Some(todo) = clicked else {
            tracing::debug!(index, "Click on empty row ignored");
            return Ok(None);
        };

        store.send(AppAction::UpdateTodoIfNeeded { todo }).await.map(Some)
    }
}

/// Submits the add-todo input
///
/// The input is trimmed; blank input sends nothing.
///
/// # Errors
///
/// Returns [`StoreError`] if the store no longer accepts actions.
pub async fn add_todo(store: &TodoStore, input: &str) -> Result<Option<EffectHandle>, StoreError> {
    let text = input.trim();
    if text.is_empty() {
        return Ok(None);
    }

    store
        .send(AppAction::CreateTodoIfNeeded { text: text.to_string() })
        .await
        .map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn todo(id: &str, completed: bool) -> Todo {
        Todo::new(id, format!("todo {id}"), completed, Utc.with_ymd_and_hms(2017, 3, 5, 20, 30, 0).unwrap())
    }

    fn ids(todos: &[&Todo]) -> Vec<String> {
        todos.iter().map(|todo| todo.id.to_string()).collect()
    }

    #[test]
    fn filters_select_by_completed() {
        let items = vec![todo("1", false), todo("2", true), todo("3", false)];

        assert_eq!(ids(&get_visible_todos(&items, &VisibilityFilter::ShowAll)), ["1", "2", "3"]);
        assert_eq!(ids(&get_visible_todos(&items, &VisibilityFilter::ShowActive)), ["1", "3"]);
        assert_eq!(ids(&get_visible_todos(&items, &VisibilityFilter::ShowCompleted)), ["2"]);
    }

    #[test]
    fn unrecognized_filter_shows_everything_by_reference() {
        let items = vec![todo("1", false), todo("2", true)];
        let visible = get_visible_todos(&items, &VisibilityFilter::Unrecognized("SHOW_SOMEDAY".to_string()));

        assert_eq!(visible.len(), items.len());
        assert!(visible.iter().zip(&items).all(|(shown, item)| std::ptr::eq(*shown, item)));
    }

    #[test]
    fn date_uses_short_numeric_layout() {
        let shanghai = FixedOffset::east_opt(8 * 3600).unwrap();
        let late = Utc.with_ymd_and_hms(2017, 3, 5, 20, 30, 0).unwrap();

        assert_eq!(format_date(&late, &Utc), "2017/3/5");
        assert_eq!(format_date(&late, &shanghai), "2017/3/6");
    }

    #[test]
    fn row_renders_marker_text_and_date() {
        let row = TodoRow::in_zone(&todo("7", true), &Utc);

        assert_eq!(row.created_on, "2017/3/5");
        assert_eq!(row.to_string(), "[x] todo 7  2017/3/5");
        assert!(TodoRow::in_zone(&todo("8", false), &Utc).to_string().starts_with("[ ] "));
    }

    #[test]
    fn render_follows_the_filter() {
        let state = AppState {
            todos: crate::types::TodosState::with_items(vec![todo("1", false), todo("2", true)]),
            visibility_filter: VisibilityFilter::ShowCompleted,
        };

        let rows = TodoList::new().render(&state);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text, "todo 2");
        assert!(rows[0].completed);
    }
}
