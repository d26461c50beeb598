use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{domain::RenderMode, form::FillSession};

pub fn render_header(frame: &mut Frame<'_>, area: Rect, session: &FillSession) {
    let mut lines = Vec::new();
    match session.state() {
        Some(state) => {
            let form = state.form();
            let title = if form.title.trim().is_empty() {
                "Untitled form"
            } else {
                form.title.as_str()
            };
            lines.push(Line::from(Span::styled(
                title.to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
            if !form.description.trim().is_empty() {
                lines.push(Line::from(Span::raw(form.description.clone())));
            }
        }
        None => lines.push(Line::from(Span::raw(format!("Form {}", session.form_id())))),
    }
    if session.mode() == RenderMode::Internal
        && let Some(client) = session.client_name()
    {
        lines.push(Line::from(vec![
            Span::styled("Client: ", Style::default().fg(Color::DarkGray)),
            Span::raw(client.to_string()),
        ]));
    }

    let block_title = match session.mode() {
        RenderMode::Internal => "Session capture",
        RenderMode::Public => "Public form",
    };
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title(block_title).borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

pub fn header_height(session: &FillSession) -> u16 {
    let mut rows = 1;
    if let Some(state) = session.state()
        && !state.form().description.trim().is_empty()
    {
        rows += 1;
    }
    if session.mode() == RenderMode::Internal && session.client_name().is_some() {
        rows += 1;
    }
    rows + 2
}
