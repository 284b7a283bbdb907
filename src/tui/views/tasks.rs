//! # Task Views
//!
//! List, detail and creation pages for tasks.
//!
//! `/task/new` outranks `/task/:taskId`, so `TaskDetails` never sees "new"
//! as an id.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph, Wrap};

use super::{View, ViewContext, ViewEvent, decode, freshness_line, render_page, render_pending, text_lines};
use crate::api::{Task, TaskStatus};
use crate::core::boundary::RenderError;
use crate::core::router::{ViewId, encode_segment};
use crate::query::QueryKey;
use crate::tui::event::TuiEvent;

pub fn tasks_key() -> QueryKey {
    QueryKey::new("/tasks")
}

pub fn task_key(id: &str) -> QueryKey {
    QueryKey::new(format!("/tasks/{}", encode_segment(id)))
}

fn status_style(status: TaskStatus) -> Style {
    match status {
        TaskStatus::Todo => Style::default().fg(Color::Yellow),
        TaskStatus::InProgress => Style::default().fg(Color::Cyan),
        TaskStatus::Done => Style::default().fg(Color::Green),
    }
}

// ============================================================================
// TaskList
// ============================================================================

pub struct TaskList {
    selected: usize,
    /// Ids from the last successful render, for Enter to resolve against
    ids: Vec<String>,
}

impl TaskList {
    pub fn new() -> Self {
        Self {
            selected: 0,
            ids: Vec::new(),
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }
}

impl Default for TaskList {
    fn default() -> Self {
        Self::new()
    }
}

impl View for TaskList {
    fn id(&self) -> ViewId {
        ViewId::TaskList
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

        self.ids = tasks.iter().map(|t| t.id.clone()).collect();
        self.selected = self.selected.min(self.ids.len().saturating_sub(1));

        let [list_area, footer] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

        if tasks.is_empty() {
            frame.render_widget(
                Paragraph::new("No tasks yet. Press n to create one."),
                list_area,
            );
        } else {
            let items: Vec<ListItem> = tasks
                .iter()
                .map(|task| {
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            format!("{:<12}", task.status.label()),
                            status_style(task.status),
                        ),
                        Span::raw(task.title.clone()),
                    ]))
                })
                .collect();
            let list = List::new(items)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");
            let mut list_state = ListState::default().with_selected(Some(self.selected));
            frame.render_stateful_widget(list, list_area, &mut list_state);
        }

        let mut hint = freshness_line(&state);
        hint.push_span(Span::styled(
            "   ↑↓ select  Enter open  n new",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(hint, footer);
        Ok(())
    }

    fn handle_event(&mut self, event: &TuiEvent, _ctx: &ViewContext) -> Option<ViewEvent> {
        match event {
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                if self.selected + 1 < self.ids.len() {
                    self.selected += 1;
                }
                None
            }
            TuiEvent::Submit => self
                .ids
                .get(self.selected)
                .map(|id| ViewEvent::Navigate(format!("/task/{}", encode_segment(id)))),
            TuiEvent::InputChar('n') => Some(ViewEvent::Navigate("/task/new".to_string())),
            _ => None,
        }
    }
}

// ============================================================================
// TaskDetails
// ============================================================================

pub struct TaskDetails {
    task_id: Option<String>,
}

impl TaskDetails {
    pub fn new(task_id: Option<String>) -> Self {
        Self { task_id }
    }
}

impl View for TaskDetails {
    fn id(&self) -> ViewId {
        ViewId::TaskDetails
    }

    fn queries(&self) -> Vec<QueryKey> {
        self.task_id.as_deref().map(task_key).into_iter().collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &ViewContext) -> Result<(), RenderError> {
        let inner = render_page(frame, area, self.id());
        let task_id = self
            .task_id
            .as_deref()
            .ok_or(RenderError::MissingParam("taskId"))?;

        let state = ctx.query().state(&task_key(task_id));
        let Some(data) = state.data() else {
            render_pending(frame, inner, &state);
            return Ok(());
        };
        let task: Task = decode(self.id(), data)?;

        let label = Style::default().fg(Color::DarkGray);
        let mut lines = vec![
            Line::styled(task.title, Style::default().add_modifier(Modifier::BOLD)),
            Line::default(),
            Line::from(vec![
                Span::styled("Status    ", label),
                Span::styled(task.status.label(), status_style(task.status)),
            ]),
            Line::from(vec![
                Span::styled("Assignee  ", label),
                Span::raw(task.assignee.unwrap_or_else(|| "Unassigned".to_string())),
            ]),
        ];
        if let Some(due) = task.due_date {
            lines.push(Line::from(vec![Span::styled("Due       ", label), Span::raw(due)]));
        }
        lines.push(Line::default());
        lines.push(Line::raw(
            task.description
                .unwrap_or_else(|| "No description.".to_string()),
        ));

        let [body, footer] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), body);
        frame.render_widget(freshness_line(&state), footer);
        Ok(())
    }

    fn handle_event(&mut self, event: &TuiEvent, _ctx: &ViewContext) -> Option<ViewEvent> {
        match event {
            TuiEvent::Escape => Some(ViewEvent::Navigate("/tasks".to_string())),
            _ => None,
        }
    }
}

// ============================================================================
// TaskCreate
// ============================================================================

pub struct TaskCreate;

impl View for TaskCreate {
    fn id(&self) -> ViewId {
        ViewId::TaskCreate
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, _ctx: &ViewContext) -> Result<(), RenderError> {
        let inner = render_page(frame, area, self.id());
        let lines = text_lines(
            "Create a task",
            &[
                "Title        ____________________",
                "Assignee     ____________________",
                "Due date     ____________________",
                "Description  ____________________",
                "",
                "Esc to return to the task list.",
            ],
        );
        frame.render_widget(Paragraph::new(lines), inner);
        Ok(())
    }

    fn handle_event(&mut self, event: &TuiEvent, _ctx: &ViewContext) -> Option<ViewEvent> {
        match event {
            TuiEvent::Escape => Some(ViewEvent::Navigate("/tasks".to_string())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{buffer_text, context_with, test_context};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use serde_json::json;

    fn draw(view: &mut dyn View, ctx: &ViewContext) -> (Result<(), RenderError>, String) {
        let backend = TestBackend::new(80, 14);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut result = Ok(());
        terminal
            .draw(|f| result = view.render(f, f.area(), ctx))
            .unwrap();
        (result, buffer_text(terminal.backend().buffer()))
    }

    #[tokio::test]
    async fn test_list_selection_opens_task() {
        let ctx = context_with(&[(
            "/tasks",
            json!([
                {"id": "a1", "title": "First"},
                {"id": "b2", "title": "Second", "status": "done"}
            ]),
        )]);
        ctx.query().fetch_query(&tasks_key()).await.unwrap();

        let mut list = TaskList::new();
        let (result, text) = draw(&mut list, &ctx);
        assert!(result.is_ok());
        assert!(text.contains("First"));
        assert!(text.contains("Done"));

        list.handle_event(&TuiEvent::CursorDown, &ctx);
        list.handle_event(&TuiEvent::CursorDown, &ctx);
        assert_eq!(list.selected(), 1);
        assert_eq!(
            list.handle_event(&TuiEvent::Submit, &ctx),
            Some(ViewEvent::Navigate("/task/b2".into()))
        );

        list.handle_event(&TuiEvent::CursorUp, &ctx);
        list.handle_event(&TuiEvent::CursorUp, &ctx);
        assert_eq!(list.selected(), 0);
    }

    #[tokio::test]
    async fn test_awkward_task_id_survives_navigation() {
        use crate::core::router::{Location, RouteTable};

        let id = "ops/42?draft";
        let ctx = context_with(&[("/tasks", json!([{"id": id, "title": "Odd one"}]))]);
        ctx.query().fetch_query(&tasks_key()).await.unwrap();

        let mut list = TaskList::new();
        draw(&mut list, &ctx);
        let Some(ViewEvent::Navigate(path)) = list.handle_event(&TuiEvent::Submit, &ctx) else {
            panic!("submit did not navigate");
        };
        assert_eq!(path, "/task/ops%2F42%3Fdraft");

        let route = RouteTable::standard().resolve(&Location::parse(&path)).unwrap();
        assert_eq!(route.view, ViewId::TaskDetails);
        assert_eq!(route.params.get("taskId"), Some(id));

        let details = TaskDetails::new(route.params.get("taskId").map(str::to_string));
        assert_eq!(details.queries(), vec![task_key(id)]);
        assert_eq!(task_key(id).as_str(), "/tasks/ops%2F42%3Fdraft");
    }

    #[test]
    fn test_list_without_data_has_nothing_to_open() {
        let ctx = test_context();
        let mut list = TaskList::new();
        let (result, text) = draw(&mut list, &ctx);
        assert!(result.is_ok());
        assert!(text.contains("Loading..."));
        assert_eq!(list.handle_event(&TuiEvent::Submit, &ctx), None);
        assert_eq!(
            list.handle_event(&TuiEvent::InputChar('n'), &ctx),
            Some(ViewEvent::Navigate("/task/new".into()))
        );
    }

    #[tokio::test]
    async fn test_details_reads_its_own_key() {
        let ctx = context_with(&[(
            "/tasks/a1",
            json!({"id": "a1", "title": "Write brief", "assignee": "Ada", "description": "Two pages"}),
        )]);
        ctx.query().fetch_query(&task_key("a1")).await.unwrap();

        let mut details = TaskDetails::new(Some("a1".into()));
        assert_eq!(details.queries(), vec![task_key("a1")]);
        let (result, text) = draw(&mut details, &ctx);
        assert!(result.is_ok());
        assert!(text.contains("Write brief"));
        assert!(text.contains("Ada"));
        assert!(text.contains("Two pages"));
    }

    #[test]
    fn test_details_without_id_fails_render() {
        let ctx = test_context();
        let mut details = TaskDetails::new(None);
        assert!(details.queries().is_empty());
        let (result, _) = draw(&mut details, &ctx);
        assert_eq!(result, Err(RenderError::MissingParam("taskId")));
    }
}
