//! # Application State
//!
//! Core navigation state for Taskdeck. No TUI types here; the mounted view,
//! the error boundary and the overlay live in the `tui` module.
//!
//! ```text
//! App
//! ├── routes: RouteTable            // path pattern → view bindings
//! ├── location: Location            // current path + query
//! ├── route: Option<RouteMatch>     // None = nothing matched, empty content
//! ├── history: History              // back / forward stacks
//! └── status_message: String        // footer text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::router::{Location, RouteMatch, RouteTable};

/// Browser-style back/forward stacks.
#[derive(Debug, Default, Clone)]
pub struct History {
    back: Vec<Location>,
    forward: Vec<Location>,
}

impl History {
    /// Record `current` before navigating to a new location. Drops anything
    /// that was ahead of it.
    pub fn push(&mut self, current: Location) {
        self.back.push(current);
        self.forward.clear();
    }

    /// Step back from `current`, returning the location to show.
    pub fn back(&mut self, current: Location) -> Option<Location> {
        let previous = self.back.pop()?;
        self.forward.push(current);
        Some(previous)
    }

    /// Step forward from `current`, returning the location to show.
    pub fn forward(&mut self, current: Location) -> Option<Location> {
        let next = self.forward.pop()?;
        self.back.push(current);
        Some(next)
    }

    pub fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }
}

pub struct App {
    pub routes: RouteTable,
    pub location: Location,
    pub route: Option<RouteMatch>,
    pub history: History,
    pub status_message: String,
}

impl App {
    pub fn new(routes: RouteTable, start: &str) -> Self {
        let location = Location::parse(start);
        let route = routes.resolve(&location);
        Self {
            routes,
            location,
            route,
            history: History::default(),
            status_message: String::from("Welcome to Taskdeck!"),
        }
    }

    /// Move to `location` and re-resolve the route. History is the caller's
    /// concern.
    pub fn set_location(&mut self, location: Location) {
        self.route = self.routes.resolve(&location);
        self.location = location;
    }
}
