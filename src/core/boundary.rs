//! # Error Boundary
//!
//! Contains render-phase failures of the routed content so one broken view
//! does not take the whole shell down.
//!
//! ```text
//!   Ok ──(child render returns Err)──► Failed
//!                                        │
//!                          fallback only, child unmounted,
//!                          no way back short of a remount
//! ```
//!
//! Only failures returned from a view's `render` are caught. Event handling
//! and background fetches report their problems elsewhere.
//!
//! The boundary is UI-agnostic: it decides *whether* the child renders and
//! records the failure. Painting the fallback is the TUI's job.

use log::error;
use std::fmt;

/// Text shown in place of the routed content once the boundary has failed.
pub const FALLBACK_MESSAGE: &str = "Something went wrong.";

/// Why a view could not render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Fetched data did not have the shape the view expects.
    InvalidData { view: &'static str, message: String },
    /// A route parameter the view depends on was absent.
    MissingParam(&'static str),
    /// Any other failure raised while rendering.
    Failed(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::InvalidData { view, message } => {
                write!(f, "invalid data for {view}: {message}")
            }
            RenderError::MissingParam(name) => write!(f, "missing route parameter '{name}'"),
            RenderError::Failed(msg) => write!(f, "render failed: {msg}"),
        }
    }
}

impl std::error::Error for RenderError {}

/// Where a failure happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    /// Title of the view that failed.
    pub view: String,
    /// Location being rendered at the time.
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryState {
    Ok,
    Failed { message: String },
}

/// Receives caught failures.
pub trait ErrorSink {
    fn report(&mut self, error: &RenderError, info: &ErrorInfo);
}

/// Reports to the application log.
pub struct LogSink;

impl ErrorSink for LogSink {
    fn report(&mut self, error: &RenderError, info: &ErrorInfo) {
        error!(
            "Render failure in view '{}' at {}: {}",
            info.view, info.location, error
        );
    }
}

pub struct ErrorBoundary {
    state: BoundaryState,
    sink: Box<dyn ErrorSink>,
}

impl Default for ErrorBoundary {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorBoundary {
    pub fn new() -> Self {
        Self::with_sink(Box::new(LogSink))
    }

    pub fn with_sink(sink: Box<dyn ErrorSink>) -> Self {
        Self {
            state: BoundaryState::Ok,
            sink,
        }
    }

    pub fn state(&self) -> &BoundaryState {
        &self.state
    }

    pub fn has_error(&self) -> bool {
        matches!(self.state, BoundaryState::Failed { .. })
    }

    /// The state a failure leads to.
    pub fn derive_state_from_error(error: &RenderError) -> BoundaryState {
        BoundaryState::Failed {
            message: error.to_string(),
        }
    }

    /// Report a caught failure. Fire-and-forget.
    pub fn did_catch(&mut self, error: &RenderError, info: &ErrorInfo) {
        self.sink.report(error, info);
    }

    /// Run the child's render unless the boundary has already failed.
    ///
    /// Returns `true` when the child rendered successfully. A failure moves
    /// the boundary to `Failed` and is reported exactly once.
    pub fn guard<F>(&mut self, info: impl FnOnce() -> ErrorInfo, render: F) -> bool
    where
        F: FnOnce() -> Result<(), RenderError>,
    {
        if self.has_error() {
            return false;
        }
        match render() {
            Ok(()) => true,
            Err(e) => {
                self.state = Self::derive_state_from_error(&e);
                self.did_catch(&e, &info());
                false
            }
        }
    }
}
