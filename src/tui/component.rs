use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable piece of shell chrome (navigation bar, footer, overlay).
///
/// Components receive data via props (struct fields) and render to a
/// `Frame` within a given `Rect`. Rendering cannot fail: chrome sits outside
/// the error boundary, so anything that may fail belongs in a routed
/// [`View`](super::views::View) instead.
pub trait Component {
    /// Render the component into the given area.
    ///
    /// Takes `&mut self` to allow updating internal presentation state
    /// or caches during the render pass.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that handles terminal events.
pub trait EventHandler {
    /// The type of high-level event this component emits.
    type Event;

    /// Handle a low-level `TuiEvent` and optionally return a high-level event.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
