//! # Landing Page
//!
//! Centered welcome screen with entry points into the app.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{View, ViewContext, ViewEvent, render_page};
use crate::core::boundary::RenderError;
use crate::core::router::ViewId;
use crate::tui::event::TuiEvent;

pub struct Landing;

impl View for Landing {
    fn id(&self) -> ViewId {
        ViewId::Landing
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, _ctx: &ViewContext) -> Result<(), RenderError> {
        let inner = render_page(frame, area, self.id());

        let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let lines = vec![
            Line::from(Span::styled(
                "Taskdeck",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Plan, track and ship work with your team.",
                Style::default().fg(Color::Gray),
            )),
            Line::default(),
            Line::from(vec![Span::styled("Enter", key), Span::raw("  open your dashboard")]),
            Line::from(vec![Span::styled("l", key), Span::raw("      log in")]),
            Line::from(vec![Span::styled("s", key), Span::raw("      create an account")]),
        ];

        let [centered] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(inner);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), centered);
        Ok(())
    }

    fn handle_event(&mut self, event: &TuiEvent, _ctx: &ViewContext) -> Option<ViewEvent> {
        match event {
            TuiEvent::Submit => Some(ViewEvent::Navigate("/dashboard".to_string())),
            TuiEvent::InputChar('l') => Some(ViewEvent::Navigate("/login".to_string())),
            TuiEvent::InputChar('s') => Some(ViewEvent::Navigate("/signup".to_string())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_context;

    #[test]
    fn test_landing_links() {
        let ctx = test_context();
        let mut landing = Landing;
        assert_eq!(
            landing.handle_event(&TuiEvent::Submit, &ctx),
            Some(ViewEvent::Navigate("/dashboard".into()))
        );
        assert_eq!(
            landing.handle_event(&TuiEvent::InputChar('s'), &ctx),
            Some(ViewEvent::Navigate("/signup".into()))
        );
        assert_eq!(landing.handle_event(&TuiEvent::InputChar('x'), &ctx), None);
    }
}
