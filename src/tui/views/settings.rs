//! Account settings and notification preferences.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Paragraph, Row, Table};

use super::{View, ViewContext, render_page, text_lines};
use crate::core::boundary::RenderError;
use crate::core::router::ViewId;

/// Key reference shown on the settings page.
const BINDINGS: &[(&str, &str)] = &[
    (": or g", "Open the address bar"),
    ("/", "Search"),
    ("1-7", "Jump to a section"),
    ("[ ]", "Back / forward"),
    ("r", "Refresh data on this page"),
    ("Ctrl+R", "Reload the app"),
    ("q", "Quit"),
];

pub struct Settings;

impl View for Settings {
    fn id(&self) -> ViewId {
        ViewId::Settings
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, _ctx: &ViewContext) -> Result<(), RenderError> {
        let inner = render_page(frame, area, self.id());
        let rows = BINDINGS.iter().map(|(key, action)| {
            Row::new([*key, *action])
        });
        let table = Table::new(rows, [Constraint::Length(10), Constraint::Min(0)])
            .header(
                Row::new(["Key", "Action"]).style(Style::default().add_modifier(Modifier::BOLD)),
            )
            .column_spacing(2)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(table, inner);
        Ok(())
    }
}

const CHANNELS: &[&str] = &[
    "[x] Task assigned to me",
    "[x] Comments on my tasks",
    "[ ] Status changes in my workspace",
    "[ ] Weekly digest",
];

pub struct NotificationSettings;

impl View for NotificationSettings {
    fn id(&self) -> ViewId {
        ViewId::NotificationSettings
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, _ctx: &ViewContext) -> Result<(), RenderError> {
        let inner = render_page(frame, area, self.id());
        frame.render_widget(Paragraph::new(text_lines("Email me when", CHANNELS)), inner);
        Ok(())
    }
}
