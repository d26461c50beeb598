use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::form::{FillSession, FillState, SubmissionPhase};

use super::super::renderer::{CursorHint, FieldRenderer};

pub fn render_body(
    frame: &mut Frame<'_>,
    area: Rect,
    session: &FillSession,
    renderer: &dyn FieldRenderer,
    enable_cursor: bool,
) {
    let Some(state) = session.state() else {
        let message = match session.phase() {
            SubmissionPhase::NotFound { form_id } => {
                format!("Form '{form_id}' was not found. Check the link and try again.")
            }
            SubmissionPhase::Failed { message } => {
                format!("The form could not be loaded: {message}")
            }
            _ => "Loading form...".to_string(),
        };
        let placeholder = Paragraph::new(message)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(placeholder, area);
        return;
    };

    if state.fields().is_empty() && state.groups().is_empty() {
        let placeholder = Paragraph::new("This form has no questions yet")
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(placeholder, area);
        return;
    }

    let content_width = area.width.saturating_sub(4);
    let rows = build_rows(state, renderer, content_width);
    let heights = rows.iter().map(|row| row.lines.len()).collect::<Vec<_>>();
    let selected = rows.iter().position(|row| row.focused).unwrap_or(0);
    let viewport = area.height.saturating_sub(2) as usize;
    let offset = scroll_offset(&heights, selected, viewport);

    let cursor = rows.get(selected).and_then(|row| row.cursor).map(|hint| {
        let above = heights[offset..selected].iter().sum::<usize>();
        (above + hint.line_offset, hint.column)
    });
    let items = rows
        .into_iter()
        .map(|row| ListItem::new(row.lines))
        .collect::<Vec<_>>();
    let mut list_state = ListState::default();
    list_state.select(Some(selected));
    *list_state.offset_mut() = offset;

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, area, &mut list_state);

    if enable_cursor
        && let Some((line, column)) = cursor
        && line < viewport
    {
        let x = area.x.saturating_add(3).saturating_add(column);
        let y = area.y.saturating_add(1).saturating_add(line as u16);
        frame.set_cursor_position((x, y));
    }
}

struct Row {
    lines: Vec<Line<'static>>,
    focused: bool,
    cursor: Option<CursorHint>,
}

impl Row {
    fn plain(lines: Vec<Line<'static>>) -> Self {
        Row {
            lines,
            focused: false,
            cursor: None,
        }
    }
}

fn build_rows(state: &FillState, renderer: &dyn FieldRenderer, width: u16) -> Vec<Row> {
    let mut rows = Vec::new();
    for group in state.groups() {
        if let Some(title) = &group.title {
            let mut heading = vec![Line::from(Span::styled(
                title.clone(),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ))];
            if let Some(description) = &group.description {
                heading.push(Line::from(Span::styled(
                    description.clone(),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            if group.is_empty() {
                heading.push(Line::from(Span::styled(
                    "  This section has no fields",
                    Style::default().fg(Color::DarkGray),
                )));
            }
            rows.push(Row::plain(heading));
        }
        for index in group.start..group.start + group.len {
            let Some(field) = state.fields().get(index) else {
                continue;
            };
            let focused = index == state.focus_index();
            let value = state.value_of(field.id());
            let mut render = renderer.render(field, &value, focused, width);
            render.lines.push(Line::from(""));
            rows.push(Row {
                lines: render.lines,
                focused,
                cursor: render.cursor,
            });
        }
    }
    rows
}

/// First visible row so that `selected` and as many rows before it as fit
/// are on screen.
pub(crate) fn scroll_offset(heights: &[usize], selected: usize, viewport: usize) -> usize {
    if heights.is_empty() || viewport == 0 {
        return 0;
    }
    let selected = selected.min(heights.len() - 1);
    let mut offset = selected;
    let mut used = heights[selected];
    while offset > 0 && used + heights[offset - 1] <= viewport {
        offset -= 1;
        used += heights[offset];
    }
    offset
}
