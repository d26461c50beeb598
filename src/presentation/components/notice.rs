use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use super::super::view::NoticeRender;
use super::layout::centered_rect;

pub fn render_notice(frame: &mut Frame<'_>, notice: &NoticeRender) {
    let widest = notice
        .lines
        .iter()
        .map(|line| UnicodeWidthStr::width(line.as_str()))
        .chain(std::iter::once(UnicodeWidthStr::width(notice.title.as_str())))
        .max()
        .unwrap_or(10) as u16;
    let width_limit = frame.area().width.saturating_sub(2).max(1);
    let width = widest.saturating_add(6).min(width_limit);
    let height = (notice.lines.len() as u16).saturating_add(2).max(3);
    let area = centered_rect(frame.area(), width, height);
    frame.render_widget(Clear, area);

    let color = if notice.alert {
        Color::Red
    } else {
        Color::Cyan
    };
    let lines = notice
        .lines
        .iter()
        .map(|line| Line::from(line.clone()))
        .collect::<Vec<_>>();
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(notice.title.clone())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(paragraph, area);
}
