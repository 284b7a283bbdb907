//! # Actions
//!
//! Everything that can happen in Taskdeck becomes an `Action`.
//! User follows a link? That's `Action::Navigate(path)`.
//! A background fetch finishes? That's `Action::QuerySettled(key)`.
//!
//! The `update()` function applies an action to the state and returns an
//! `Effect` describing the I/O the caller has to perform. No side effects
//! here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info};

use crate::core::router::Location;
use crate::core::state::App;
use crate::query::QueryKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Go to a raw location such as `/task/42` or `/search?q=x`.
    Navigate(String),
    Back,
    Forward,
    /// Full remount: fresh error boundary and view, same query client.
    Reload,
    /// Refetch the mounted view's queries.
    Refetch,
    /// A background fetch finished.
    QuerySettled(QueryKey),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// Location changed: mount the view for the new route.
    MountView,
    /// Tear down and rebuild the routed subtree.
    Remount,
    Refetch,
    Redraw,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Navigate(raw) => {
            let location = Location::parse(&raw);
            if location == app.location {
                return Effect::None;
            }
            app.history.push(app.location.clone());
            app.set_location(location);
            app.status_message.clear();
            info!("Navigated to {}", app.location);
            Effect::MountView
        }
        Action::Back => match app.history.back(app.location.clone()) {
            Some(location) => {
                app.set_location(location);
                app.status_message.clear();
                Effect::MountView
            }
            None => {
                app.status_message = String::from("No earlier page");
                Effect::Redraw
            }
        },
        Action::Forward => match app.history.forward(app.location.clone()) {
            Some(location) => {
                app.set_location(location);
                app.status_message.clear();
                Effect::MountView
            }
            None => {
                app.status_message = String::from("No later page");
                Effect::Redraw
            }
        },
        Action::Reload => {
            app.status_message = String::from("Reloaded");
            info!("Remounting shell at {}", app.location);
            Effect::Remount
        }
        Action::Refetch => {
            app.status_message = String::from("Refreshing...");
            Effect::Refetch
        }
        Action::QuerySettled(_) => {
            if app.status_message == "Refreshing..." {
                app.status_message.clear();
            }
            Effect::Redraw
        }
        Action::Quit => Effect::Quit,
    }
}
