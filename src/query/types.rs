use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Cache key for a query. The key is the API path the data is fetched from,
/// e.g. `/tasks` or `/tasks/abc123`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(String);

impl QueryKey {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        if path.starts_with('/') {
            Self(path)
        } else {
            Self(format!("/{path}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of a cache entry as seen by a view.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState {
    /// Never requested.
    Idle,
    /// First fetch in flight, nothing to show yet.
    Loading,
    /// Data is available. `is_fetching` is set while a background refetch runs.
    Success {
        data: Value,
        updated_at: DateTime<Utc>,
        is_fetching: bool,
    },
    /// The last fetch failed after exhausting its retries.
    Error {
        message: String,
        failure_count: u32,
        is_fetching: bool,
    },
}

impl QueryState {
    pub fn data(&self) -> Option<&Value> {
        match self {
            QueryState::Success { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn is_fetching(&self) -> bool {
        match self {
            QueryState::Loading => true,
            QueryState::Success { is_fetching, .. } | QueryState::Error { is_fetching, .. } => {
                *is_fetching
            }
            QueryState::Idle => false,
        }
    }
}

// ============================================================================
// Options
// ============================================================================

pub const DEFAULT_STALE_TIME: Duration = Duration::ZERO;
pub const DEFAULT_RETRY: u32 = 3;
pub const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_secs(1);
pub const DEFAULT_MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Client-wide query behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    /// How long fetched data counts as fresh. Zero means every mount refetches.
    pub stale_time: Duration,
    /// Retries after the first failed attempt.
    pub retry: u32,
    pub retry_base_delay: Duration,
    pub max_retry_delay: Duration,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            stale_time: DEFAULT_STALE_TIME,
            retry: DEFAULT_RETRY,
            retry_base_delay: DEFAULT_RETRY_BASE_DELAY,
            max_retry_delay: DEFAULT_MAX_RETRY_DELAY,
        }
    }
}

impl QueryOptions {
    /// Backoff before retry number `attempt` (0-based): `base * 2^attempt`, capped.
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.retry_base_delay
            .saturating_mul(factor)
            .min(self.max_retry_delay)
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors a fetch can end with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Connection-level failure (timeout, DNS, refused). Retryable.
    Network(String),
    /// Server answered with a non-success status. Retryable if 5xx or 429.
    Api { status: u16, message: String },
    /// Body was not valid JSON. Not retryable.
    Parse(String),
}

impl QueryError {
    pub fn is_retryable(&self) -> bool {
        match self {
            QueryError::Network(_) => true,
            QueryError::Api { status, .. } => *status >= 500 || *status == 429,
            QueryError::Parse(_) => false,
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::Network(msg) => write!(f, "network error: {msg}"),
            QueryError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            QueryError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for QueryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_key_adds_leading_slash() {
        assert_eq!(QueryKey::new("tasks").as_str(), "/tasks");
        assert_eq!(QueryKey::new("/tasks").to_string(), "/tasks");
    }

    #[test]
    fn test_retry_delay_backs_off_and_caps() {
        let options = QueryOptions::default();
        assert_eq!(options.retry_delay(0), Duration::from_secs(1));
        assert_eq!(options.retry_delay(1), Duration::from_secs(2));
        assert_eq!(options.retry_delay(2), Duration::from_secs(4));
        assert_eq!(options.retry_delay(5), Duration::from_secs(30));
        assert_eq!(options.retry_delay(40), Duration::from_secs(30));
    }

    #[test]
    fn test_retryable_errors() {
        assert!(QueryError::Network("refused".into()).is_retryable());
        assert!(QueryError::Api { status: 503, message: String::new() }.is_retryable());
        assert!(QueryError::Api { status: 429, message: String::new() }.is_retryable());
        assert!(!QueryError::Api { status: 404, message: String::new() }.is_retryable());
        assert!(!QueryError::Parse("eof".into()).is_retryable());
    }

    #[test]
    fn test_state_accessors() {
        assert!(QueryState::Loading.is_fetching());
        assert!(!QueryState::Idle.is_fetching());
        assert!(QueryState::Idle.data().is_none());
        let state = QueryState::Success {
            data: serde_json::json!([1, 2]),
            updated_at: Utc::now(),
            is_fetching: false,
        };
        assert_eq!(state.data(), Some(&serde_json::json!([1, 2])));
    }
}
