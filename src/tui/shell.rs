//! # Application Shell
//!
//! Root composition of the UI. Every frame is laid out the same way:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ TopNav                             (1 row)  │
//! ├─────────────────────────────────────────────┤
//! │                                             │
//! │ ErrorBoundary                               │
//! │   └── routed View (or nothing)    (rest)    │
//! │                                             │
//! ├─────────────────────────────────────────────┤
//! │ Footer                             (1 row)  │
//! └─────────────────────────────────────────────┘
//!   Overlay: drawn last, over the whole frame
//! ```
//!
//! The boundary only wraps the routed content. Nav, overlay and footer cannot
//! fail to render, so they stay on screen when the fallback is shown.
//!
//! A failed boundary is terminal: the view is dropped and later route
//! changes mount nothing until `remount` installs a fresh boundary.

use log::{debug, info};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Clear, Paragraph};

use crate::core::boundary::{ErrorBoundary, ErrorInfo, FALLBACK_MESSAGE};
use crate::core::router::{Location, RouteMatch};
use crate::core::state::App;
use crate::query::QueryKey;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{Footer, Overlay, TopNav};
use crate::tui::views::{self, View, ViewContext};

/// The routed subtree: an error boundary and the view it guards.
pub struct Shell {
    boundary: ErrorBoundary,
    view: Option<Box<dyn View>>,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell {
    pub fn new() -> Self {
        Self::with_boundary(ErrorBoundary::new())
    }

    pub fn with_boundary(boundary: ErrorBoundary) -> Self {
        Self {
            boundary,
            view: None,
        }
    }

    /// Replace the mounted view with the one bound to `route`. `None` leaves
    /// the content region empty.
    pub fn mount(&mut self, route: Option<&RouteMatch>, location: &Location) {
        if self.boundary.has_error() {
            debug!("Boundary failed, not mounting a view for {}", location);
            self.view = None;
            return;
        }
        self.view = route.map(|route| {
            debug!("Mounting {:?} for {}", route.view, location);
            views::mount(route, location)
        });
    }

    /// Mount an already-built view.
    pub fn mount_view(&mut self, view: Box<dyn View>) {
        if !self.boundary.has_error() {
            self.view = Some(view);
        }
    }

    /// Tear down the routed subtree and build it again under `boundary`.
    pub fn remount(&mut self, boundary: ErrorBoundary, route: Option<&RouteMatch>, location: &Location) {
        info!("Remounting routed content at {}", location);
        self.view = None;
        self.boundary = boundary;
        self.mount(route, location);
    }

    pub fn view(&self) -> Option<&dyn View> {
        self.view.as_deref()
    }

    pub fn view_mut(&mut self) -> Option<&mut (dyn View + 'static)> {
        self.view.as_deref_mut()
    }

    pub fn boundary(&self) -> &ErrorBoundary {
        &self.boundary
    }

    /// Queries the mounted view depends on.
    pub fn queries(&self) -> Vec<QueryKey> {
        self.view.as_ref().map(|v| v.queries()).unwrap_or_default()
    }

    /// Render the routed view through the boundary, or the fallback once it
    /// has failed.
    pub fn render_content(&mut self, frame: &mut Frame, area: Rect, ctx: &ViewContext, location: &Location) {
        if let Some(view) = self.view.as_deref_mut() {
            let title = view.id().title();
            let rendered = self.boundary.guard(
                || ErrorInfo {
                    view: title.to_string(),
                    location: location.to_string(),
                },
                || view.render(frame, area, ctx),
            );
            if !rendered {
                self.view = None;
            }
        }

        if self.boundary.has_error() {
            render_fallback(frame, area);
        }
    }
}

fn render_fallback(frame: &mut Frame, area: Rect) {
    // The failed view may have drawn part of a frame already
    frame.render_widget(Clear, area);
    let [line] = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .areas(area);
    frame.render_widget(
        Paragraph::new(FALLBACK_MESSAGE)
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        line,
    );
}

/// Draw one full frame of the application.
pub fn draw_shell(frame: &mut Frame, app: &App, tui: &mut TuiState, ctx: &ViewContext) {
    use Constraint::{Length, Min};
    let [nav_area, content_area, footer_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());

    TopNav::new(app.route.as_ref().map(|r| r.view), &app.location).render(frame, nav_area);
    tui.shell
        .render_content(frame, content_area, ctx, &app.location);
    Footer::new(&app.status_message).render(frame, footer_area);

    let full = frame.area();
    Overlay::new(&mut tui.overlay).render(frame, full);
}
