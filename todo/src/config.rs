//! Configuration management for the todo client.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::types::VisibilityFilter;
use std::env;
use std::time::Duration;

/// Default address of the remote store
pub const DEFAULT_API_URL: &str = "http://localhost:2048";

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "todosync=info,todosync_runtime=info";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the remote store (`TODO_API_URL`)
    pub api_url: String,
    /// Per-request timeout in seconds (`TODO_REQUEST_TIMEOUT_SECS`, default: none)
    pub request_timeout_secs: Option<u64>,
    /// Filter applied on start (`TODO_VISIBILITY_FILTER`, default: `SHOW_ALL`)
    pub visibility_filter: VisibilityFilter,
    /// Log filter directive (`RUST_LOG`, default: [`DEFAULT_LOG_FILTER`])
    pub log_filter: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first if present.
    /// Unparseable numbers fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_url: lookup("TODO_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            request_timeout_secs: lookup("TODO_REQUEST_TIMEOUT_SECS").and_then(|s| s.trim().parse().ok()),
            visibility_filter: lookup("TODO_VISIBILITY_FILTER")
                .map(|s| s.parse().unwrap_or_default())
                .unwrap_or_default(),
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }

    /// Request timeout as a [`Duration`], if one is configured
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
