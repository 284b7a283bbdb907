//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use serde_json::Value;

use crate::core::boundary::{ErrorInfo, ErrorSink, RenderError};
use crate::core::router::ViewId;
use crate::query::{QueryClient, QueryError, QueryFetcher, QueryKey, QueryOptions};
use crate::tui::views::{View, ViewContext};

/// Serves canned responses keyed by query path. Unknown keys fail with a
/// network error.
#[derive(Default)]
pub struct StaticFetcher {
    responses: HashMap<String, Result<Value, QueryError>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, data: Value) -> Self {
        self.responses.insert(path.to_string(), Ok(data));
        self
    }

    pub fn with_error(mut self, path: &str, error: QueryError) -> Self {
        self.responses.insert(path.to_string(), Err(error));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of fetches attempted so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueryFetcher for StaticFetcher {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self, key: &QueryKey) -> Result<Value, QueryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.responses
            .get(key.as_str())
            .cloned()
            .unwrap_or_else(|| Err(QueryError::Network(format!("no response for {key}"))))
    }
}

/// Two retries with millisecond backoff.
pub fn fast_options() -> QueryOptions {
    QueryOptions {
        stale_time: Duration::ZERO,
        retry: 2,
        retry_base_delay: Duration::from_millis(1),
        max_retry_delay: Duration::from_millis(5),
    }
}

/// A view context whose client has no canned responses.
pub fn test_context() -> ViewContext {
    context_with(&[])
}

pub fn context_with(responses: &[(&str, Value)]) -> ViewContext {
    let fetcher = responses
        .iter()
        .fold(StaticFetcher::new(), |fetcher, (path, data)| {
            fetcher.with(path, data.clone())
        });
    ViewContext::new(Arc::new(QueryClient::new(Arc::new(fetcher), fast_options())))
}

/// Counts boundary reports.
pub struct CountingSink(Rc<Cell<usize>>);

impl CountingSink {
    pub fn new() -> (Self, Rc<Cell<usize>>) {
        let count = Rc::new(Cell::new(0));
        (Self(count.clone()), count)
    }
}

impl ErrorSink for CountingSink {
    fn report(&mut self, _error: &RenderError, _info: &ErrorInfo) {
        self.0.set(self.0.get() + 1);
    }
}

/// A view whose render always fails.
pub struct FailingView {
    id: ViewId,
}

impl FailingView {
    pub fn new(id: ViewId) -> Self {
        Self { id }
    }
}

impl View for FailingView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn render(&mut self, _frame: &mut Frame, _area: Rect, _ctx: &ViewContext) -> Result<(), RenderError> {
        Err(RenderError::Failed("boom".to_string()))
    }
}

/// Records the address of the query client it is rendered with.
pub struct ContextSpyView {
    id: ViewId,
    seen: Rc<RefCell<Vec<usize>>>,
}

impl ContextSpyView {
    pub fn new(id: ViewId) -> (Self, Rc<RefCell<Vec<usize>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        (Self::sharing(id, &seen), seen)
    }

    pub fn sharing(id: ViewId, seen: &Rc<RefCell<Vec<usize>>>) -> Self {
        Self {
            id,
            seen: seen.clone(),
        }
    }
}

impl View for ContextSpyView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn render(&mut self, _frame: &mut Frame, _area: Rect, ctx: &ViewContext) -> Result<(), RenderError> {
        self.seen
            .borrow_mut()
            .push(Arc::as_ptr(ctx.query()) as usize);
        Ok(())
    }
}

/// Flatten a rendered buffer into lines of text.
pub fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
