//! Reducers for the todo client.
//!
//! `TodosReducer` owns the todo collection and its in-flight flags,
//! `VisibilityFilterReducer` owns the filter. `AppReducer` scopes both onto
//! [`AppState`] and runs them on every action.

use crate::actions;
use crate::api::TodoApi;
use crate::types::{AppAction, AppState, Request, TodoAction, TodosState, VisibilityFilter};
use std::sync::Arc;
use todosync_core::{
    composition::{combine_reducers, scope_reducer, CombinedReducer, SharedReducer},
    effect::Effect,
    environment::Clock,
    reducer::Reducer,
    SmallVec,
};

/// Environment dependencies for the todo reducers
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Remote store client
    pub api: Arc<dyn TodoApi>,
    /// Clock for request timing
    pub clock: Arc<dyn Clock>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(api: Arc<dyn TodoApi>, clock: Arc<dyn Clock>) -> Self {
        Self { api, clock }
    }
}

/// Reducer for the todo collection
#[derive(Clone, Debug, Default)]
pub struct TodosReducer;

impl TodosReducer {
    /// Creates a new `TodosReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Applies a request lifecycle signal to state
    pub(crate) fn apply(state: &mut TodosState, action: TodoAction) {
        match action {
            TodoAction::FetchTodos(Request::Started) => state.is_getting = true,
            TodoAction::FetchTodos(Request::Succeeded(items)) => {
                state.is_getting = false;
                state.items = items;
            },
            TodoAction::FetchTodos(Request::Failed(error)) => {
                tracing::debug!(%error, "Fetch settled without data");
                state.is_getting = false;
            },

            TodoAction::CreateTodo(Request::Started) => state.is_creating = true,
            TodoAction::CreateTodo(Request::Succeeded(todo)) => {
                state.is_creating = false;
                state.items.push(todo);
            },
            TodoAction::CreateTodo(Request::Failed(error)) => {
                tracing::debug!(%error, "Create settled without data");
                state.is_creating = false;
            },

            TodoAction::UpdateTodo(Request::Started) => state.is_updating = true,
            TodoAction::UpdateTodo(Request::Succeeded(todo)) => {
                state.is_updating = false;
                if let Some(existing) = state.items.iter_mut().find(|item| item.id == todo.id) {
                    *existing = todo;
                } else {
                    tracing::debug!(id = %todo.id, "Updated todo is not in the list");
                }
            },
            TodoAction::UpdateTodo(Request::Failed(error)) => {
                tracing::debug!(%error, "Update settled without data");
                state.is_updating = false;
            },
        }
    }
}

impl Reducer for TodosReducer {
    type State = TodosState;
    type Action = AppAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Intents ==========
            AppAction::FetchTodosIfNeeded => actions::fetch_todos_if_needed(state, env),
            AppAction::CreateTodoIfNeeded { text } => actions::create_todo_if_needed(state, env, text),
            AppAction::UpdateTodoIfNeeded { todo } => actions::update_todo_if_needed(state, env, todo),

            // ========== Request lifecycle ==========
            AppAction::Todos(lifecycle) => {
                Self::apply(state, lifecycle);
                SmallVec::new()
            },

            AppAction::SetVisibilityFilter(_) => SmallVec::new(),
        }
    }
}

/// Reducer for the visibility filter
#[derive(Clone, Debug, Default)]
pub struct VisibilityFilterReducer;

impl Reducer for VisibilityFilterReducer {
    type State = VisibilityFilter;
    type Action = AppAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        if let AppAction::SetVisibilityFilter(filter) = action {
            *state = filter;
        }
        SmallVec::new()
    }
}

fn todos_slice(state: &mut AppState) -> &mut TodosState {
    &mut state.todos
}

fn filter_slice(state: &mut AppState) -> &mut VisibilityFilter {
    &mut state.visibility_filter
}

/// Reducer for the whole [`AppState`]
#[derive(Clone)]
pub struct AppReducer(CombinedReducer<AppState, AppAction, TodoEnvironment>);

impl AppReducer {
    /// Creates the application reducer
    #[must_use]
    pub fn new() -> Self {
        let todos: SharedReducer<AppState, AppAction, TodoEnvironment> =
            Arc::new(scope_reducer(TodosReducer::new(), todos_slice));
        let filter: SharedReducer<AppState, AppAction, TodoEnvironment> =
            Arc::new(scope_reducer(VisibilityFilterReducer, filter_slice));

        Self(combine_reducers(vec![todos, filter]))
    }
}

impl Default for AppReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        self.0.reduce(state, action, env)
    }
}
