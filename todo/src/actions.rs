//! Action creators for the three remote requests.
//!
//! Each request kind has a guard (`should_*`), an effect that performs exactly
//! one call on the remote store, and an `*_if_needed` entry point the reducer
//! routes intents to. The entry point checks the guard, marks the request as
//! started and hands back the effect; when the guard rejects, nothing happens.

use crate::api::{ApiError, TodoApi};
use crate::reducer::{TodoEnvironment, TodosReducer};
use crate::types::{AppAction, Request, Todo, TodoAction, TodosState};
use std::sync::Arc;
use todosync_core::{effect::Effect, environment::Clock, smallvec, SmallVec};

/// Returns `true` when no list request is in flight
#[must_use]
pub const fn should_fetch_todos(state: &TodosState) -> bool {
    !state.is_getting
}

/// Returns `true` when no create request is in flight
#[must_use]
pub const fn should_create_todo(state: &TodosState) -> bool {
    !state.is_creating
}

/// Returns `true` when no update request is in flight
#[must_use]
pub const fn should_update_todo(state: &TodosState) -> bool {
    !state.is_updating
}

fn elapsed_ms(clock: &dyn Clock, started: chrono::DateTime<chrono::Utc>) -> i64 {
    (clock.now() - started).num_milliseconds()
}

fn settle<T>(
    result: Result<T, ApiError>,
    operation: &'static str,
    wrap: fn(Request<T>) -> TodoAction,
) -> AppAction {
    match result {
        Ok(payload) => AppAction::Todos(wrap(Request::Succeeded(payload))),
        Err(error) => {
            tracing::warn!(%error, operation, "Remote store request failed");
            AppAction::Todos(wrap(Request::Failed(error)))
        },
    }
}

/// Lists every todo; settles with `FetchTodos(Succeeded | Failed)`
pub fn fetch_todos(api: Arc<dyn TodoApi>, clock: Arc<dyn Clock>) -> Effect<AppAction> {
    Effect::future(async move {
        let started = clock.now();
        let result = api.list().await;

        if let Ok(items) = &result {
            tracing::debug!(
                count = items.len(),
                elapsed_ms = elapsed_ms(clock.as_ref(), started),
                "Fetched todos"
            );
        }

        Some(settle(result, "list", TodoAction::FetchTodos))
    })
}

/// Creates a todo; settles with `CreateTodo(Succeeded | Failed)`
pub fn create_todo(api: Arc<dyn TodoApi>, clock: Arc<dyn Clock>, text: String) -> Effect<AppAction> {
    Effect::future(async move {
        let started = clock.now();
        let result = api.create(text).await;

        if let Ok(todo) = &result {
            tracing::debug!(
                id = %todo.id,
                elapsed_ms = elapsed_ms(clock.as_ref(), started),
                "Created todo"
            );
        }

        Some(settle(result, "create", TodoAction::CreateTodo))
    })
}

/// Replaces a todo's `completed` and `text`; settles with `UpdateTodo(Succeeded | Failed)`
pub fn update_todo(api: Arc<dyn TodoApi>, clock: Arc<dyn Clock>, todo: Todo) -> Effect<AppAction> {
    Effect::future(async move {
        let started = clock.now();
        let result = api.update(todo).await;

        if let Ok(todo) = &result {
            tracing::debug!(
                id = %todo.id,
                completed = todo.completed,
                elapsed_ms = elapsed_ms(clock.as_ref(), started),
                "Updated todo"
            );
        }

        Some(settle(result, "update", TodoAction::UpdateTodo))
    })
}

/// Starts a list request unless one is already in flight
pub fn fetch_todos_if_needed(
    state: &mut TodosState,
    env: &TodoEnvironment,
) -> SmallVec<[Effect<AppAction>; 4]> {
    if !should_fetch_todos(state) {
        tracing::debug!("List request already in flight, skipping");
        return SmallVec::new();
    }

    TodosReducer::apply(state, TodoAction::FetchTodos(Request::Started));
    smallvec![fetch_todos(Arc::clone(&env.api), Arc::clone(&env.clock))]
}

/// Starts a create request unless one is already in flight
pub fn create_todo_if_needed(
    state: &mut TodosState,
    env: &TodoEnvironment,
    text: String,
) -> SmallVec<[Effect<AppAction>; 4]> {
    if !should_create_todo(state) {
        tracing::debug!("Create request already in flight, dropping new todo");
        return SmallVec::new();
    }

    TodosReducer::apply(state, TodoAction::CreateTodo(Request::Started));
    smallvec![create_todo(Arc::clone(&env.api), Arc::clone(&env.clock), text)]
}

/// Starts an update request unless one is already in flight
pub fn update_todo_if_needed(
    state: &mut TodosState,
    env: &TodoEnvironment,
    todo: Todo,
) -> SmallVec<[Effect<AppAction>; 4]> {
    if !should_update_todo(state) {
        tracing::debug!(id = %todo.id, "Update request already in flight, dropping toggle");
        return SmallVec::new();
    }

    TodosReducer::apply(state, TodoAction::UpdateTodo(Request::Started));
    smallvec![update_todo(Arc::clone(&env.api), Arc::clone(&env.clock), todo)]
}
