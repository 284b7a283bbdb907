//! Workspace overview and settings. Both read the `/workspace` query.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table, Wrap};

use super::{View, ViewContext, decode, freshness_line, render_page, render_pending};
use crate::api::Workspace;
use crate::core::boundary::RenderError;
use crate::core::router::ViewId;
use crate::query::{QueryKey, QueryState};

pub fn workspace_key() -> QueryKey {
    QueryKey::new("/workspace")
}

/// Shared loading path: draw the page, then hand back the decoded workspace
/// if the query has data.
fn load(
    frame: &mut Frame,
    area: Rect,
    id: ViewId,
    ctx: &ViewContext,
) -> Result<Option<(Workspace, QueryState, Rect)>, RenderError> {
    let inner = render_page(frame, area, id);
    let state = ctx.query().state(&workspace_key());
    let Some(data) = state.data() else {
        render_pending(frame, inner, &state);
        return Ok(None);
    };
    let workspace = decode(id, data)?;
    Ok(Some((workspace, state, inner)))
}

pub struct WorkspaceOverview;

impl View for WorkspaceOverview {
    fn id(&self) -> ViewId {
        ViewId::WorkspaceOverview
    }

    fn queries(&self) -> Vec<QueryKey> {
        vec![workspace_key()]
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &ViewContext) -> Result<(), RenderError> {
        let Some((workspace, state, inner)) = load(frame, area, self.id(), ctx)? else {
            return Ok(());
        };

        let label = Style::default().fg(Color::DarkGray);
        let lines = vec![
            Line::styled(workspace.name, Style::default().add_modifier(Modifier::BOLD)),
            Line::default(),
            Line::raw(
                workspace
                    .description
                    .unwrap_or_else(|| "No description yet.".to_string()),
            ),
            Line::default(),
            Line::from(vec![
                Span::styled("Members  ", label),
                Span::raw(workspace.members.len().to_string()),
            ]),
            Line::from(vec![Span::styled("ID       ", label), Span::raw(workspace.id)]),
        ];

        let [body, footer] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), body);
        frame.render_widget(freshness_line(&state), footer);
        Ok(())
    }
}

pub struct WorkspaceSettings;

impl View for WorkspaceSettings {
    fn id(&self) -> ViewId {
        ViewId::WorkspaceSettings
    }

    fn queries(&self) -> Vec<QueryKey> {
        vec![workspace_key()]
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &ViewContext) -> Result<(), RenderError> {
        let Some((workspace, state, inner)) = load(frame, area, self.id(), ctx)? else {
            return Ok(());
        };

        let [heading, table_area, footer] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        frame.render_widget(
            Line::from(vec![
                Span::styled("Name  ", Style::default().fg(Color::DarkGray)),
                Span::styled(workspace.name, Style::default().add_modifier(Modifier::BOLD)),
            ]),
            heading,
        );

        let header = Row::new(["Member", "Email", "Role"])
            .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED));
        let rows = workspace.members.into_iter().map(|member| {
            Row::new([
                Cell::from(member.name),
                Cell::from(member.email),
                Cell::from(member.role),
            ])
        });
        let table = Table::new(
            rows,
            [
                Constraint::Percentage(30),
                Constraint::Percentage(50),
                Constraint::Percentage(20),
            ],
        )
        .header(header);
        frame.render_widget(table, table_area);
        frame.render_widget(freshness_line(&state), footer);
        Ok(())
    }
}
