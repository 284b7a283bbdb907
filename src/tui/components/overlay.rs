//! # Overlay Component
//!
//! The shell's modal slot. It is always mounted and decides for itself
//! whether anything is visible. Today it hosts the address bar: a one-line
//! prompt for typing a location (`:` or `g` to open, `/` to open prefilled
//! with a search).
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `OverlayState` lives in `TuiState`
//! - `Overlay` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Events emitted by the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayEvent {
    /// Navigate to the typed location.
    Go(String),
    Dismiss,
}

/// Single-line location prompt.
pub struct AddressBar {
    buffer: String,
    /// Byte offset into `buffer`, always on a char boundary
    cursor: usize,
}

impl AddressBar {
    pub fn new(initial: &str) -> Self {
        Self {
            buffer: initial.to_string(),
            cursor: initial.len(),
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.buffer[..self.cursor]
            .chars()
            .next_back()
            .map(|c| self.cursor - c.len_utf8())
    }

    fn next_boundary(&self) -> Option<usize> {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }

    fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }
}

impl EventHandler for AddressBar {
    type Event = OverlayEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<OverlayEvent> {
        match event {
            TuiEvent::Escape => return Some(OverlayEvent::Dismiss),
            TuiEvent::Submit => {
                let target = self.buffer.trim();
                return Some(if target.is_empty() {
                    OverlayEvent::Dismiss
                } else {
                    OverlayEvent::Go(target.to_string())
                });
            }
            TuiEvent::InputChar(c) => {
                let mut encoded = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut encoded));
            }
            TuiEvent::Paste(text) => {
                // Locations are single-line
                let line: String = text.chars().filter(|c| !c.is_control()).collect();
                self.insert_str(&line);
            }
            TuiEvent::Backspace => {
                if let Some(prev) = self.prev_boundary() {
                    self.buffer.replace_range(prev..self.cursor, "");
                    self.cursor = prev;
                }
            }
            TuiEvent::Delete => {
                if let Some(next) = self.next_boundary() {
                    self.buffer.replace_range(self.cursor..next, "");
                }
            }
            TuiEvent::CursorLeft => {
                if let Some(prev) = self.prev_boundary() {
                    self.cursor = prev;
                }
            }
            TuiEvent::CursorRight => {
                if let Some(next) = self.next_boundary() {
                    self.cursor = next;
                }
            }
            TuiEvent::Home => self.cursor = 0,
            TuiEvent::End => self.cursor = self.buffer.len(),
            _ => {}
        }
        None
    }
}

/// Persistent overlay state.
#[derive(Default)]
pub struct OverlayState {
    pub address_bar: Option<AddressBar>,
}

impl OverlayState {
    pub fn is_open(&self) -> bool {
        self.address_bar.is_some()
    }

    pub fn open(&mut self, initial: &str) {
        self.address_bar = Some(AddressBar::new(initial));
    }

    pub fn close(&mut self) {
        self.address_bar = None;
    }

    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<OverlayEvent> {
        self.address_bar.as_mut()?.handle_event(event)
    }
}

const MIN_WIDTH: u16 = 24;
const HEIGHT: u16 = 3;

/// Transient render wrapper for the overlay slot.
pub struct Overlay<'a> {
    state: &'a mut OverlayState,
}

impl<'a> Overlay<'a> {
    pub fn new(state: &'a mut OverlayState) -> Self {
        Self { state }
    }
}

impl Component for Overlay<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some(bar) = &self.state.address_bar else {
            return;
        };
        if area.height < HEIGHT || area.width < 4 {
            return;
        }

        let width = (area.width * 3 / 5).max(MIN_WIDTH).min(area.width);
        let popup = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + area.height / 4,
            width,
            height: HEIGHT,
        };

        frame.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Go to ")
            .title_bottom(Line::from(" Enter Go  Esc Cancel ").centered());
        let inner = block.inner(popup);

        // Keep the cursor visible by scrolling long input horizontally
        let before_cursor = UnicodeWidthStr::width(&bar.buffer[..bar.cursor]) as u16;
        let scroll = before_cursor.saturating_sub(inner.width.saturating_sub(1));

        frame.render_widget(
            Paragraph::new(bar.buffer.as_str())
                .block(block)
                .scroll((0, scroll)),
            popup,
        );
        frame.set_cursor_position(Position::new(inner.x + before_cursor - scroll, inner.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_str(bar: &mut AddressBar, text: &str) {
        for c in text.chars() {
            bar.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_typing_and_submit() {
        let mut bar = AddressBar::new("");
        type_str(&mut bar, "/task/7");
        assert_eq!(
            bar.handle_event(&TuiEvent::Submit),
            Some(OverlayEvent::Go("/task/7".to_string()))
        );
    }

    #[test]
    fn test_empty_submit_dismisses() {
        let mut bar = AddressBar::new("   ");
        assert_eq!(bar.handle_event(&TuiEvent::Submit), Some(OverlayEvent::Dismiss));
    }

    #[test]
    fn test_editing_respects_char_boundaries() {
        let mut bar = AddressBar::new("/search?q=café");
        bar.handle_event(&TuiEvent::Backspace);
        assert_eq!(bar.buffer(), "/search?q=caf");

        bar.handle_event(&TuiEvent::Home);
        bar.handle_event(&TuiEvent::Delete);
        assert_eq!(bar.buffer(), "search?q=caf");

        bar.handle_event(&TuiEvent::InputChar('/'));
        bar.handle_event(&TuiEvent::End);
        type_str(&mut bar, "é");
        assert_eq!(bar.buffer(), "/search?q=café");

        bar.handle_event(&TuiEvent::CursorLeft);
        bar.handle_event(&TuiEvent::CursorLeft);
        bar.handle_event(&TuiEvent::InputChar('x'));
        assert_eq!(bar.buffer(), "/search?q=caxfé");
    }

    #[test]
    fn test_paste_strips_newlines() {
        let mut bar = AddressBar::new("");
        bar.handle_event(&TuiEvent::Paste("/tasks\n".to_string()));
        assert_eq!(bar.buffer(), "/tasks");
    }

    #[test]
    fn test_state_open_close() {
        let mut state = OverlayState::default();
        assert!(!state.is_open());
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);

        state.open("/search?q=");
        assert!(state.is_open());
        assert_eq!(state.handle_event(&TuiEvent::Escape), Some(OverlayEvent::Dismiss));
        state.close();
        assert!(!state.is_open());
    }

    #[test]
    fn test_closed_overlay_renders_nothing() {
        let backend = TestBackend::new(60, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = OverlayState::default();

        terminal
            .draw(|f| Overlay::new(&mut state).render(f, f.area()))
            .unwrap();

        assert!(buffer_text(terminal.backend().buffer()).trim().is_empty());
    }

    #[test]
    fn test_open_overlay_shows_prompt() {
        let backend = TestBackend::new(60, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = OverlayState::default();
        state.open("/dashboard");

        terminal
            .draw(|f| Overlay::new(&mut state).render(f, f.area()))
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Go to"));
        assert!(text.contains("/dashboard"));
    }
}
