//! Login and sign-up pages.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::Paragraph;

use super::{View, ViewContext, ViewEvent, render_page, text_lines};
use crate::core::boundary::RenderError;
use crate::core::router::ViewId;
use crate::tui::event::TuiEvent;

pub struct Login;

impl View for Login {
    fn id(&self) -> ViewId {
        ViewId::Login
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, _ctx: &ViewContext) -> Result<(), RenderError> {
        let inner = render_page(frame, area, self.id());
        let lines = text_lines(
            "Log in to your workspace",
            &[
                "Email     ____________________",
                "Password  ____________________",
                "",
                "No account yet? Press s to sign up.",
            ],
        );
        frame.render_widget(Paragraph::new(lines), inner);
        Ok(())
    }

    fn handle_event(&mut self, event: &TuiEvent, _ctx: &ViewContext) -> Option<ViewEvent> {
        match event {
            TuiEvent::InputChar('s') => Some(ViewEvent::Navigate("/signup".to_string())),
            _ => None,
        }
    }
}

pub struct SignUp;

impl View for SignUp {
    fn id(&self) -> ViewId {
        ViewId::SignUp
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, _ctx: &ViewContext) -> Result<(), RenderError> {
        let inner = render_page(frame, area, self.id());
        let lines = text_lines(
            "Create your account",
            &[
                "Name      ____________________",
                "Email     ____________________",
                "Password  ____________________",
                "",
                "Already registered? Press l to log in.",
            ],
        );
        frame.render_widget(Paragraph::new(lines), inner);
        Ok(())
    }

    fn handle_event(&mut self, event: &TuiEvent, _ctx: &ViewContext) -> Option<ViewEvent> {
        match event {
            TuiEvent::InputChar('l') => Some(ViewEvent::Navigate("/login".to_string())),
            _ => None,
        }
    }
}
