//! # Views
//!
//! Page-level units mounted into the shell's content region, one per route.
//!
//! ## Contract
//!
//! A view is built from its route match when the location changes and
//! dropped when it changes again. It declares the queries it depends on,
//! the shell makes sure they are fetched, and `render` draws whatever the
//! shared query client currently holds. Views never block on data.
//!
//! `render` is the only fallible step. An `Err` from it is a render-phase
//! failure and is caught by the shell's error boundary.
//!
//! ## Module Structure
//!
//! ```text
//! views/
//! ├── mod.rs        (this file: View trait, mount(), shared helpers)
//! ├── landing.rs    (/)
//! ├── auth.rs       (/login, /signup)
//! ├── dashboard.rs  (/dashboard)
//! ├── workspace.rs  (/workspace-overview, /workspace-settings)
//! ├── tasks.rs      (/tasks, /task/:taskId, /task/new)
//! ├── search.rs     (/search)
//! └── settings.rs   (/settings, /notifications)
//! ```

pub mod auth;
pub mod dashboard;
pub mod landing;
pub mod search;
pub mod settings;
pub mod tasks;
pub mod workspace;

use std::sync::Arc;

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::boundary::RenderError;
use crate::core::router::{Location, RouteMatch, ViewId};
use crate::query::{QueryClient, QueryKey, QueryState};
use crate::tui::event::TuiEvent;

/// Ambient context handed to every view: the one shared query client.
#[derive(Clone)]
pub struct ViewContext {
    query: Arc<QueryClient>,
}

impl ViewContext {
    pub fn new(query: Arc<QueryClient>) -> Self {
        Self { query }
    }

    pub fn query(&self) -> &Arc<QueryClient> {
        &self.query
    }
}

/// What a view asks the shell to do in response to input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Navigate(String),
}

pub trait View {
    fn id(&self) -> ViewId;

    /// Queries this view reads. Fetched on mount and on refresh.
    fn queries(&self) -> Vec<QueryKey> {
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &ViewContext) -> Result<(), RenderError>;

    fn handle_event(&mut self, _event: &TuiEvent, _ctx: &ViewContext) -> Option<ViewEvent> {
        None
    }
}

/// Instantiate the view bound to a route.
pub fn mount(route: &RouteMatch, location: &Location) -> Box<dyn View> {
    match route.view {
        ViewId::Landing => Box::new(landing::Landing),
        ViewId::Login => Box::new(auth::Login),
        ViewId::SignUp => Box::new(auth::SignUp),
        ViewId::Dashboard => Box::new(dashboard::Dashboard),
        ViewId::WorkspaceOverview => Box::new(workspace::WorkspaceOverview),
        ViewId::TaskList => Box::new(tasks::TaskList::new()),
        ViewId::TaskDetails => Box::new(tasks::TaskDetails::new(
            route.params.get("taskId").map(str::to_string),
        )),
        ViewId::TaskCreate => Box::new(tasks::TaskCreate),
        ViewId::WorkspaceSettings => Box::new(workspace::WorkspaceSettings),
        ViewId::SearchResults => Box::new(search::SearchResults::new(location.query_param("q"))),
        ViewId::Settings => Box::new(settings::Settings),
        ViewId::NotificationSettings => Box::new(settings::NotificationSettings),
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Bordered page frame titled with the view's name.
fn page_block(id: ViewId) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {} ", id.title()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .padding(Padding::horizontal(1))
}

/// Draw the page frame and return the area inside it.
fn render_page(frame: &mut Frame, area: Rect, id: ViewId) -> Rect {
    let block = page_block(id);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Decode a query payload into the view's model.
fn decode<T: DeserializeOwned>(id: ViewId, data: &Value) -> Result<T, RenderError> {
    serde_json::from_value(data.clone()).map_err(|e| RenderError::InvalidData {
        view: id.title(),
        message: e.to_string(),
    })
}

/// Placeholder for a query that has no data to show.
fn render_pending(frame: &mut Frame, area: Rect, state: &QueryState) {
    let line = match state {
        QueryState::Idle | QueryState::Loading => {
            Line::styled("Loading...", Style::default().fg(Color::DarkGray))
        }
        QueryState::Error { message, .. } => Line::styled(
            format!("Could not load data: {message}"),
            Style::default().fg(Color::Red),
        ),
        QueryState::Success { .. } => Line::default(),
    };
    frame.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// "Updated 14:02:11" plus a refresh marker, for views showing cached data.
fn freshness_line(state: &QueryState) -> Line<'static> {
    match state {
        QueryState::Success {
            updated_at,
            is_fetching,
            ..
        } => {
            let mut text = format!(
                "Updated {}",
                updated_at.with_timezone(&Local).format("%H:%M:%S")
            );
            if *is_fetching {
                text.push_str(" · refreshing");
            }
            Line::styled(text, Style::default().fg(Color::DarkGray))
        }
        _ => Line::default(),
    }
}

/// Static copy: a heading line followed by dim body lines.
fn text_lines(heading: &str, body: &[&str]) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::styled(heading.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Line::default(),
    ];
    lines.extend(
        body.iter()
            .map(|line| Line::styled(line.to_string(), Style::default().fg(Color::Gray))),
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::router::{RouteTable, STANDARD_ROUTES};
    use crate::test_support::{buffer_text, test_context};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_mount_builds_the_bound_view() {
        let table = RouteTable::standard();
        for (pattern, view) in STANDARD_ROUTES {
            let raw = pattern.replace(":taskId", "abc123");
            let location = Location::parse(&raw);
            let route = table.resolve(&location).unwrap();
            assert_eq!(mount(&route, &location).id(), *view, "pattern {pattern}");
        }
    }

    #[test]
    fn test_every_view_renders_its_title() {
        let table = RouteTable::standard();
        let ctx = test_context();
        for (pattern, view) in STANDARD_ROUTES {
            let raw = pattern.replace(":taskId", "abc123");
            let location = Location::parse(&raw);
            let route = table.resolve(&location).unwrap();
            let mut mounted = mount(&route, &location);

            let backend = TestBackend::new(100, 30);
            let mut terminal = Terminal::new(backend).unwrap();
            terminal
                .draw(|f| mounted.render(f, f.area(), &ctx).unwrap())
                .unwrap();

            let text = buffer_text(terminal.backend().buffer());
            assert!(text.contains(view.title()), "{pattern} should show {}", view.title());
        }
    }

    #[test]
    fn test_decode_reports_invalid_data() {
        let err = decode::<Vec<crate::api::Task>>(ViewId::TaskList, &serde_json::json!({"not": "a list"}))
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidData { view: "Tasks", .. }));
    }
}
