use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Tabs},
};
use unicode_width::UnicodeWidthStr;

use crate::form::FillState;

const TAB_PADDING: usize = 3;

pub fn render_section_strip(frame: &mut Frame<'_>, area: Rect, state: &FillState) {
    let titles = state
        .groups()
        .iter()
        .map(|group| group.title.clone().unwrap_or_else(|| "General".to_string()))
        .collect::<Vec<_>>();
    if titles.is_empty() {
        frame.render_widget(Block::default().title("Sections").borders(Borders::ALL), area);
        return;
    }
    let selected = state
        .groups()
        .iter()
        .position(|group| group.contains(state.focus_index()))
        .unwrap_or(0);
    let widths = titles
        .iter()
        .map(|title| UnicodeWidthStr::width(title.as_str()) + TAB_PADDING)
        .collect::<Vec<_>>();
    let available = area.width.saturating_sub(2) as usize;
    let (start, end) = visible_window(&widths, selected, available);

    let mut visible = Vec::with_capacity(end - start);
    for (index, title) in titles.iter().enumerate().take(end).skip(start) {
        let mut text = title.clone();
        if index == start && start > 0 {
            text = format!("≪ {text}");
        }
        if index + 1 == end && end < titles.len() {
            text.push_str(" ≫");
        }
        visible.push(Line::from(text));
    }
    let tabs = Tabs::new(visible)
        .block(Block::default().title("Sections").borders(Borders::ALL))
        .select(selected - start)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

/// Half-open range of tabs that fits in `available` columns and contains
/// `selected`. Always holds at least the selected tab.
pub(crate) fn visible_window(
    widths: &[usize],
    selected: usize,
    available: usize,
) -> (usize, usize) {
    if widths.is_empty() {
        return (0, 0);
    }
    let selected = selected.min(widths.len() - 1);
    let mut start = selected;
    let mut end = selected + 1;
    let mut used = widths[selected];
    loop {
        let mut grew = false;
        if end < widths.len() && used + widths[end] <= available {
            used += widths[end];
            end += 1;
            grew = true;
        }
        if start > 0 && used + widths[start - 1] <= available {
            start -= 1;
            used += widths[start];
            grew = true;
        }
        if !grew {
            break;
        }
    }
    (start, end)
}
