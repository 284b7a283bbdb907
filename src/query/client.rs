//! # Query Client
//!
//! The one fetch/cache client shared by every view. It is created once at
//! startup, wrapped in an `Arc` and reached through the view context.
//!
//! ```text
//! view mounts ──► ensure(key) ──► fresh or in flight? ──► nothing to do
//!                     │ no
//!                     ▼
//!              tokio::spawn(fetch_query)  ──► retries with backoff
//!                     │
//!                     ▼
//!              cache updated ──► Action::QuerySettled(key) ──► redraw
//! ```
//!
//! Views never await anything: they render whatever `state(key)` returns and
//! get redrawn when the fetch settles.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, mpsc};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde_json::Value;
use tokio::task::JoinHandle;

use super::fetcher::QueryFetcher;
use super::types::{QueryError, QueryKey, QueryOptions, QueryState};
use crate::core::action::Action;

#[derive(Debug, Default)]
struct CacheEntry {
    data: Option<Value>,
    updated_at: Option<DateTime<Utc>>,
    error: Option<String>,
    failure_count: u32,
    is_fetching: bool,
    invalidated: bool,
    /// Bumped by every `invalidate`
    invalidations: u64,
}

impl CacheEntry {
    /// Claim the entry for a new fetch. Returns the invalidation count the
    /// fetch starts under.
    fn begin_fetch(&mut self) -> u64 {
        self.is_fetching = true;
        self.failure_count = 0;
        self.invalidations
    }

    /// Release the entry. An invalidation that arrived after `started_under`
    /// leaves it stale, since the result may predate it.
    fn finish_fetch(&mut self, started_under: u64) {
        self.is_fetching = false;
        if self.invalidations == started_under {
            self.invalidated = false;
        }
    }

    fn is_stale(&self, options: &QueryOptions, now: DateTime<Utc>) -> bool {
        if self.invalidated {
            return true;
        }
        match self.updated_at {
            Some(updated_at) => match chrono::Duration::from_std(options.stale_time) {
                Ok(stale_time) => now - updated_at >= stale_time,
                // Out of chrono's range: effectively never stale
                Err(_) => false,
            },
            None => true,
        }
    }

    fn snapshot(&self) -> QueryState {
        if let Some(message) = &self.error {
            return QueryState::Error {
                message: message.clone(),
                failure_count: self.failure_count,
                is_fetching: self.is_fetching,
            };
        }
        match (&self.data, self.updated_at) {
            (Some(data), Some(updated_at)) => QueryState::Success {
                data: data.clone(),
                updated_at,
                is_fetching: self.is_fetching,
            },
            _ if self.is_fetching => QueryState::Loading,
            _ => QueryState::Idle,
        }
    }
}

pub struct QueryClient {
    fetcher: Arc<dyn QueryFetcher>,
    options: QueryOptions,
    cache: Mutex<HashMap<QueryKey, CacheEntry>>,
}

impl QueryClient {
    pub fn new(fetcher: Arc<dyn QueryFetcher>, options: QueryOptions) -> Self {
        info!(
            "Query client ready (fetcher={}, stale_time={:?}, retry={})",
            fetcher.name(),
            options.stale_time,
            options.retry
        );
        Self {
            fetcher,
            options,
            cache: Mutex::new(HashMap::new()),
        }
    }

    fn cache(&self) -> MutexGuard<'_, HashMap<QueryKey, CacheEntry>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current state of a key.
    pub fn state(&self, key: &QueryKey) -> QueryState {
        self.cache()
            .get(key)
            .map_or(QueryState::Idle, CacheEntry::snapshot)
    }

    /// True when the key has no data or its data has outlived `stale_time`.
    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.cache()
            .get(key)
            .is_none_or(|entry| entry.is_stale(&self.options, Utc::now()))
    }

    /// Mark a key stale so the next `ensure` refetches it. Cached data stays
    /// visible until the refetch lands.
    pub fn invalidate(&self, key: &QueryKey) {
        if let Some(entry) = self.cache().get_mut(key) {
            debug!("Invalidated {}", key);
            entry.invalidated = true;
            entry.invalidations += 1;
        }
    }

    /// Claim the fetch for `key` if it needs one and nobody else holds it.
    fn try_begin_fetch(&self, key: &QueryKey) -> Option<u64> {
        let mut cache = self.cache();
        let entry = cache.entry(key.clone()).or_default();
        if entry.is_fetching || !entry.is_stale(&self.options, Utc::now()) {
            return None;
        }
        Some(entry.begin_fetch())
    }

    /// Claim a follow-up fetch for a key invalidated while its last fetch
    /// was in flight.
    fn try_begin_refetch(&self, key: &QueryKey) -> Option<u64> {
        let mut cache = self.cache();
        let entry = cache.get_mut(key)?;
        if entry.is_fetching || !entry.invalidated {
            return None;
        }
        Some(entry.begin_fetch())
    }

    /// Start a background fetch for `key` when it is missing or stale and not
    /// already in flight. `Action::QuerySettled(key)` is sent on `notify` once
    /// the fetch finishes, successfully or not.
    ///
    /// Must be called from within a tokio runtime.
    pub fn ensure(
        self: &Arc<Self>,
        key: QueryKey,
        notify: mpsc::Sender<Action>,
    ) -> Option<JoinHandle<()>> {
        let Some(mut started_under) = self.try_begin_fetch(&key) else {
            debug!("Skipping fetch for {} (fresh or in flight)", key);
            return None;
        };

        info!("Spawning fetch for {}", key);
        let client = Arc::clone(self);
        Some(tokio::spawn(async move {
            loop {
                // Errors are recorded in the cache; the view renders them
                let _ = client.run_fetch(&key, started_under).await;
                match client.try_begin_refetch(&key) {
                    Some(next) => {
                        debug!("{} was invalidated mid-fetch, fetching again", key);
                        started_under = next;
                    }
                    None => break,
                }
            }
            if notify.send(Action::QuerySettled(key.clone())).is_err() {
                warn!("Failed to report settled query {}: receiver dropped", key);
            }
        }))
    }

    /// Fetch `key` now, with retries, and store the outcome in the cache.
    pub async fn fetch_query(&self, key: &QueryKey) -> Result<Value, QueryError> {
        let started_under = self.cache().entry(key.clone()).or_default().begin_fetch();
        self.run_fetch(key, started_under).await
    }

    async fn run_fetch(&self, key: &QueryKey, started_under: u64) -> Result<Value, QueryError> {
        let mut attempt = 0;
        loop {
            match self.fetcher.fetch(key).await {
                Ok(data) => {
                    let mut cache = self.cache();
                    let entry = cache.entry(key.clone()).or_default();
                    entry.data = Some(data.clone());
                    entry.updated_at = Some(Utc::now());
                    entry.error = None;
                    entry.failure_count = 0;
                    entry.finish_fetch(started_under);
                    debug!("Fetched {} after {} attempt(s)", key, attempt + 1);
                    return Ok(data);
                }
                Err(e) => {
                    let failure_count = {
                        let mut cache = self.cache();
                        let entry = cache.entry(key.clone()).or_default();
                        entry.failure_count += 1;
                        entry.failure_count
                    };

                    if attempt >= self.options.retry || !e.is_retryable() {
                        warn!(
                            "Query {} failed after {} attempt(s): {}",
                            key, failure_count, e
                        );
                        let mut cache = self.cache();
                        let entry = cache.entry(key.clone()).or_default();
                        entry.error = Some(e.to_string());
                        entry.finish_fetch(started_under);
                        return Err(e);
                    }

                    let delay = self.options.retry_delay(attempt);
                    debug!("Query {} failed ({}), retrying in {:?}", key, e, delay);
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
