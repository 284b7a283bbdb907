//! # TopNav Component
//!
//! Persistent navigation bar across the top of the shell.
//!
//! Shows the product name, the numbered navigation links (the active one
//! highlighted) and the current location on the right. Stateless: all data
//! arrives as props.

use crate::core::router::{Location, ViewId};
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

/// A numbered shortcut in the navigation bar.
#[derive(Debug)]
pub struct NavLink {
    pub key: char,
    pub label: &'static str,
    pub path: &'static str,
    /// Views under which this link shows as active.
    pub views: &'static [ViewId],
}

pub const NAV_LINKS: &[NavLink] = &[
    NavLink {
        key: '1',
        label: "Home",
        path: "/",
        views: &[ViewId::Landing, ViewId::Login, ViewId::SignUp],
    },
    NavLink {
        key: '2',
        label: "Dashboard",
        path: "/dashboard",
        views: &[ViewId::Dashboard],
    },
    NavLink {
        key: '3',
        label: "Workspace",
        path: "/workspace-overview",
        views: &[ViewId::WorkspaceOverview, ViewId::WorkspaceSettings],
    },
    NavLink {
        key: '4',
        label: "Tasks",
        path: "/tasks",
        views: &[ViewId::TaskList, ViewId::TaskDetails, ViewId::TaskCreate],
    },
    NavLink {
        key: '5',
        label: "Search",
        path: "/search",
        views: &[ViewId::SearchResults],
    },
    NavLink {
        key: '6',
        label: "Notifications",
        path: "/notifications",
        views: &[ViewId::NotificationSettings],
    },
    NavLink {
        key: '7',
        label: "Settings",
        path: "/settings",
        views: &[ViewId::Settings],
    },
];

/// The link bound to a shortcut key, if any.
pub fn link_for_key(key: char) -> Option<&'static NavLink> {
    NAV_LINKS.iter().find(|link| link.key == key)
}

pub struct TopNav<'a> {
    /// View currently mounted (None = no route matched)
    pub active: Option<ViewId>,
    pub location: &'a Location,
}

impl<'a> TopNav<'a> {
    pub fn new(active: Option<ViewId>, location: &'a Location) -> Self {
        Self { active, location }
    }
}

impl Component for TopNav<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            " Taskdeck ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )];

        for link in NAV_LINKS {
            let is_active = self.active.is_some_and(|view| link.views.contains(&view));
            let style = if is_active {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::raw(" "));
            spans.push(Span::styled(format!("{} {}", link.key, link.label), style));
        }

        let location = self.location.to_string();
        // Display columns, never more than the bar itself
        let location_width = location
            .width()
            .saturating_add(1)
            .min(usize::from(area.width)) as u16;
        let [links_area, location_area] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(location_width),
        ])
        .areas(area);

        frame.render_widget(Line::from(spans), links_area);
        frame.render_widget(
            Paragraph::new(location)
                .style(Style::default().fg(Color::DarkGray))
                .right_aligned(),
            location_area,
        );
    }
}
