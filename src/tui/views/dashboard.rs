//! # Dashboard
//!
//! Task counts per status and the next few open tasks. Reads the same
//! `/tasks` query as the task list, so switching between the two is served
//! from cache.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{View, ViewContext, decode, freshness_line, render_page, render_pending};
use crate::api::{Task, TaskStatus};
use crate::core::boundary::RenderError;
use crate::core::router::ViewId;
use crate::query::QueryKey;
use crate::tui::views::tasks::tasks_key;

const UPCOMING_LIMIT: usize = 5;

pub struct Dashboard;

impl View for Dashboard {
    fn id(&self) -> ViewId {
        ViewId::Dashboard
    }

    fn queries(&self) -> Vec<QueryKey> {
        vec![tasks_key()]
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &ViewContext) -> Result<(), RenderError> {
        let inner = render_page(frame, area, self.id());
        let state = ctx.query().state(&tasks_key());
        let Some(data) = state.data() else {
            render_pending(frame, inner, &state);
            return Ok(());
        };
        let tasks: Vec<Task> = decode(self.id(), data)?;

        let count = |status: TaskStatus| tasks.iter().filter(|t| t.status == status).count();
        let number = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        let summary = Line::from(vec![
            Span::styled(count(TaskStatus::Todo).to_string(), number),
            Span::raw(" to do   "),
            Span::styled(count(TaskStatus::InProgress).to_string(), number),
            Span::raw(" in progress   "),
            Span::styled(count(TaskStatus::Done).to_string(), number),
            Span::raw(" done"),
        ]);

        let mut lines = vec![
            summary,
            Line::default(),
            Line::styled("Up next", Style::default().add_modifier(Modifier::BOLD)),
        ];
        let upcoming: Vec<&Task> = tasks
            .iter()
            .filter(|t| t.status != TaskStatus::Done)
            .take(UPCOMING_LIMIT)
            .collect();
        if upcoming.is_empty() {
            lines.push(Line::styled("Nothing open. Nice.", Style::default().fg(Color::Green)));
        }
        for task in upcoming {
            let due = task
                .due_date
                .as_deref()
                .map(|d| format!("  (due {d})"))
                .unwrap_or_default();
            lines.push(Line::from(vec![
                Span::raw(format!("• {}", task.title)),
                Span::styled(due, Style::default().fg(Color::DarkGray)),
            ]));
        }

        let [body, footer] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
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

    #[tokio::test]
    async fn test_dashboard_counts_by_status() {
        let ctx = context_with(&[(
            "/tasks",
            serde_json::json!([
                {"id": "1", "title": "Write brief", "status": "todo", "due_date": "2026-11-02"},
                {"id": "2", "title": "Review copy", "status": "in_progress"},
                {"id": "3", "title": "Publish", "status": "done"},
                {"id": "4", "title": "Plan sprint", "status": "todo"}
            ]),
        )]);
        ctx.query().fetch_query(&tasks_key()).await.unwrap();

        let backend = TestBackend::new(80, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| Dashboard.render(f, f.area(), &ctx).unwrap())
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("2 to do"));
        assert!(text.contains("1 in progress"));
        assert!(text.contains("1 done"));
        assert!(text.contains("Write brief  (due 2026-11-02)"));
        assert!(!text.contains("Publish"));
    }
}
