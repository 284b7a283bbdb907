//! # Footer Component
//!
//! Persistent bottom bar: key hints on the left, the status message after
//! them, the version on the right.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const KEY_HINTS: &str = " : go  / search  [ ] back/fwd  r refresh  ^R reload  q quit ";

pub struct Footer<'a> {
    pub status_message: &'a str,
}

impl<'a> Footer<'a> {
    pub fn new(status_message: &'a str) -> Self {
        Self { status_message }
    }
}

impl Component for Footer<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let version = format!("v{} ", env!("CARGO_PKG_VERSION"));
        let [left, right] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(version.len() as u16),
        ])
        .areas(area);

        let mut spans = vec![Span::styled(
            KEY_HINTS,
            Style::default().fg(Color::DarkGray),
        )];
        if !self.status_message.is_empty() {
            spans.push(Span::styled(
                format!("| {}", self.status_message),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ));
        }

        frame.render_widget(Line::from(spans), left);
        frame.render_widget(
            Paragraph::new(version)
                .style(Style::default().fg(Color::DarkGray))
                .right_aligned(),
            right,
        );
    }
}
