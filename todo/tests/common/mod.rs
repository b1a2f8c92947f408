//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use todosync::{ApiError, AppReducer, AppState, Todo, TodoApi, TodoEnvironment, TodoStore};
use todosync::api::ApiFuture;
use todosync_runtime::Store;
use todosync_testing::test_clock;
use tokio::sync::Notify;

pub fn created() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2017, 3, 5, 12, 0, 0).unwrap()
}

pub fn todo(id: &str, text: &str, completed: bool) -> Todo {
    Todo::new(id, text, completed, created())
}

/// In-memory remote store that counts every call
///
/// With a gate installed, `list` waits for `open_gate` before answering.
#[derive(Default)]
pub struct MockApi {
    items: Mutex<Vec<Todo>>,
    next_id: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
    failing: bool,
}

impl MockApi {
    pub fn with_items(items: Vec<Todo>) -> Self {
        let next_id = AtomicUsize::new(items.len() + 1);
        Self {
            items: Mutex::new(items),
            next_id,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    pub fn stored(&self) -> Vec<Todo> {
        self.items.lock().unwrap().clone()
    }

    pub fn calls(&self) -> (usize, usize, usize) {
        (
            self.list_calls.load(Ordering::SeqCst),
            self.create_calls.load(Ordering::SeqCst),
            self.update_calls.load(Ordering::SeqCst),
        )
    }

    fn outage() -> ApiError {
        ApiError::Server {
            status: 500,
            title: "Internal Server Error".to_string(),
            detail: "Something went wrong.".to_string(),
        }
    }
}

impl TodoApi for MockApi {
    fn list(&self) -> ApiFuture<'_, Vec<Todo>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if self.failing {
                return Err(Self::outage());
            }
            Ok(self.stored())
        })
    }

    fn create(&self, text: String) -> ApiFuture<'_, Todo> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            if self.failing {
                return Err(Self::outage());
            }
            let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
            let todo = Todo::new(id, text, false, created());
            self.items.lock().unwrap().push(todo.clone());
            Ok(todo)
        })
    }

    fn update(&self, todo: Todo) -> ApiFuture<'_, Todo> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            if self.failing {
                return Err(Self::outage());
            }
            let mut items = self.items.lock().unwrap();
            match items.iter_mut().find(|item| item.id == todo.id) {
                Some(stored) => {
                    stored.completed = todo.completed;
                    stored.text.clone_from(&todo.text);
                    Ok(stored.clone())
                },
                None => Err(ApiError::Server {
                    status: 404,
                    title: "Not found".to_string(),
                    detail: format!("Todo {} not found.", todo.id),
                }),
            }
        })
    }
}

pub fn store_with(api: Arc<MockApi>) -> TodoStore {
    let env = TodoEnvironment::new(api, Arc::new(test_clock()));
    Store::new(AppState::default(), AppReducer::new(), env)
}
