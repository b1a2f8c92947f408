//! Remote store client.
//!
//! Three operations, one network round trip each, no retry:
//!
//! - `GET /todos` → `{ "data": [Todo] }`
//! - `POST /todos` with `{ "data": { "text" } }` → `{ "data": Todo }`
//! - `PUT /todos/{id}` with `{ "data": { "completed", "text" } }` → `{ "data": Todo }` or `204 No Content`
//!
//! Failed requests answer with a JSON-API error document
//! (`{ "errors": [{ "id", "status", "title", "detail" }] }`).

use crate::types::{Todo, TodoId};
use reqwest::header::ACCEPT;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;

/// Media type the remote store requires in the `Accept` header
pub const JSON_API: &str = "application/vnd.api+json";

/// Errors that can occur when talking to the remote store
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never got an HTTP response (connection, timeout, TLS)
    #[error("Request failed: {0}")]
    Transport(String),

    /// The remote store answered with a non-success status
    #[error("Remote store error (status {status}): {title}: {detail}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Short error title
        title: String,
        /// Error detail
        detail: String,
    },

    /// The response body could not be decoded
    #[error("Response parsing failed: {0}")]
    Decode(String),
}

/// Boxed future returned by [`TodoApi`] operations
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// Remote store abstraction
///
/// Uses explicit `Pin<Box<dyn Future>>` returns so the client can be shared
/// as `Arc<dyn TodoApi>` inside effects.
pub trait TodoApi: Send + Sync {
    /// List every todo in server order
    fn list(&self) -> ApiFuture<'_, Vec<Todo>>;

    /// Create a todo with the given text; resolves to the stored record
    fn create(&self, text: String) -> ApiFuture<'_, Todo>;

    /// Replace `completed` and `text` of `todo.id`; resolves to the stored record
    fn update(&self, todo: Todo) -> ApiFuture<'_, Todo>;
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct CollectionEnvelope {
    #[serde(default)]
    data: Option<Vec<Todo>>,
}

#[derive(Debug, Deserialize)]
struct ResourceEnvelope {
    #[serde(default)]
    data: Option<Todo>,
}

#[derive(Debug, Serialize)]
struct CreateFields<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdateFields<'a> {
    completed: bool,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorDocument {
    errors: Vec<ErrorObject>,
}

#[derive(Debug, Deserialize)]
struct ErrorObject {
    #[serde(default)]
    title: String,
    #[serde(default)]
    detail: String,
}

/// HTTP implementation of [`TodoApi`]
#[derive(Clone, Debug)]
pub struct HttpTodoApi {
    client: Client,
    base_url: String,
}

impl HttpTodoApi {
    /// Create a client for the remote store at `base_url`
    ///
    /// `timeout` bounds each request; `None` leaves it to the transport.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn todos_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn todo_url(&self, id: &TodoId) -> String {
        format!("{}/todos/{}", self.base_url, id)
    }

    async fn fetch_all(&self) -> Result<Vec<Todo>, ApiError> {
        let response = self
            .client
            .get(self.todos_url())
            .header(ACCEPT, JSON_API)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let body = Self::success_body(response).await?;
        let envelope: CollectionEnvelope =
            serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))?;

        Ok(envelope.data.unwrap_or_default())
    }

    async fn post(&self, text: String) -> Result<Todo, ApiError> {
        let response = self
            .client
            .post(self.todos_url())
            .header(ACCEPT, JSON_API)
            .json(&Envelope {
                data: CreateFields { text: &text },
            })
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let body = Self::success_body(response).await?;
        let envelope: ResourceEnvelope =
            serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))?;

        envelope
            .data
            .ok_or_else(|| ApiError::Decode("create response carried no data".to_string()))
    }

    async fn put(&self, todo: Todo) -> Result<Todo, ApiError> {
        let response = self
            .client
            .put(self.todo_url(&todo.id))
            .header(ACCEPT, JSON_API)
            .json(&Envelope {
                data: UpdateFields {
                    completed: todo.completed,
                    text: &todo.text,
                },
            })
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let body = Self::success_body(response).await?;

        // The remote store answers updates with `204 No Content`; the
        // submitted record is then the stored one.
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(todo);
        }

        let envelope: ResourceEnvelope =
            serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(envelope.data.unwrap_or(todo))
    }

    /// Returns the body of a 2xx response, or the decoded error otherwise
    async fn success_body(response: Response) -> Result<Vec<u8>, ApiError> {
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if status.is_success() {
            Ok(body.to_vec())
        } else {
            Err(server_error(status, &body))
        }
    }
}

/// Builds an [`ApiError::Server`] from an error response body
fn server_error(status: StatusCode, body: &[u8]) -> ApiError {
    let first = serde_json::from_slice::<ErrorDocument>(body)
        .ok()
        .and_then(|doc| doc.errors.into_iter().next());

    match first {
        Some(error) => ApiError::Server {
            status: status.as_u16(),
            title: error.title,
            detail: error.detail,
        },
        None => ApiError::Server {
            status: status.as_u16(),
            title: status.canonical_reason().unwrap_or("Unknown").to_string(),
            detail: String::from_utf8_lossy(body).trim().to_string(),
        },
    }
}

impl TodoApi for HttpTodoApi {
    fn list(&self) -> ApiFuture<'_, Vec<Todo>> {
        Box::pin(self.fetch_all())
    }

    fn create(&self, text: String) -> ApiFuture<'_, Todo> {
        Box::pin(self.post(text))
    }

    fn update(&self, todo: Todo) -> ApiFuture<'_, Todo> {
        Box::pin(self.put(todo))
    }
}
