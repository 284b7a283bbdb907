//! # Core Application Logic
//!
//! Taskdeck's navigation and failure-containment logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Router (path → view) │
//!                    │  • State + History      │
//!                    │  • Action / update()    │
//!                    │  • Error boundary       │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────┴───────────┐
//!                    ▼                       ▼
//!             ┌────────────┐          ┌────────────┐
//!             │    TUI     │          │   Query    │
//!             │  Adapter   │          │   Client   │
//!             │ (ratatui)  │          │ (reqwest)  │
//!             └────────────┘          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`router`]: route table, locations and matching
//! - [`state`]: the `App` struct and navigation history
//! - [`action`]: the `Action` enum and the `update()` reducer
//! - [`boundary`]: the error boundary state machine
//! - [`config`]: config file loading and resolution

pub mod action;
pub mod boundary;
pub mod config;
pub mod router;
pub mod state;
