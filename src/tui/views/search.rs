//! Search results for `/search?q=...`.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use url::form_urlencoded;

use super::{View, ViewContext, decode, freshness_line, render_page, render_pending};
use crate::api::Task;
use crate::core::boundary::RenderError;
use crate::core::router::ViewId;
use crate::query::QueryKey;

pub fn search_key(term: &str) -> QueryKey {
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("q", term)
        .finish();
    QueryKey::new(format!("/search?{query}"))
}

pub struct SearchResults {
    term: Option<String>,
}

impl SearchResults {
    /// Blank terms count as no search.
    pub fn new(term: Option<String>) -> Self {
        Self {
            term: term.filter(|t| !t.trim().is_empty()),
        }
    }
}

impl View for SearchResults {
    fn id(&self) -> ViewId {
        ViewId::SearchResults
    }

    fn queries(&self) -> Vec<QueryKey> {
        self.term.as_deref().map(search_key).into_iter().collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &ViewContext) -> Result<(), RenderError> {
        let inner = render_page(frame, area, self.id());
        let Some(term) = self.term.as_deref() else {
            frame.render_widget(
                Paragraph::new(Line::styled(
                    "Press / to search tasks.",
                    Style::default().fg(Color::DarkGray),
                )),
                inner,
            );
            return Ok(());
        };

        let [heading, body, footer] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);
        frame.render_widget(
            Line::from(vec![
                Span::raw("Results for "),
                Span::styled(format!("\"{term}\""), Style::default().add_modifier(Modifier::BOLD)),
            ]),
            heading,
        );

        let state = ctx.query().state(&search_key(term));
        let Some(data) = state.data() else {
            render_pending(frame, body, &state);
            return Ok(());
        };
        let hits: Vec<Task> = decode(self.id(), data)?;

        let lines: Vec<Line> = if hits.is_empty() {
            vec![Line::styled("No matches.", Style::default().fg(Color::DarkGray))]
        } else {
            hits.into_iter()
                .map(|task| {
                    Line::from(vec![
                        Span::styled(format!("/task/{}  ", task.id), Style::default().fg(Color::DarkGray)),
                        Span::raw(task.title),
                    ])
                })
                .collect()
        };
        frame.render_widget(Paragraph::new(lines), body);
        frame.render_widget(freshness_line(&state), footer);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{buffer_text, context_with};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_search_key_encodes_term() {
        assert_eq!(search_key("weekly report").as_str(), "/search?q=weekly+report");
        assert_eq!(search_key("a&b").as_str(), "/search?q=a%26b");
    }

    #[test]
    fn test_blank_term_declares_no_queries() {
        assert!(SearchResults::new(None).queries().is_empty());
        assert!(SearchResults::new(Some("  ".into())).queries().is_empty());
        assert_eq!(
            SearchResults::new(Some("brief".into())).queries(),
            vec![search_key("brief")]
        );
    }

    #[tokio::test]
    async fn test_results_are_listed() {
        let ctx = context_with(&[(
            "/search?q=brief",
            serde_json::json!([{"id": "a1", "title": "Write brief"}]),
        )]);
        ctx.query().fetch_query(&search_key("brief")).await.unwrap();

        let backend = TestBackend::new(80, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut view = SearchResults::new(Some("brief".into()));
        terminal
            .draw(|f| view.render(f, f.area(), &ctx).unwrap())
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Results for \"brief\""));
        assert!(text.contains("/task/a1  Write brief"));
    }
}
