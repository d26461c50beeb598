use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::{
    domain::RenderMode,
    form::{FillSession, SubmissionPhase},
};

use super::super::view::UiContext;

const SEPARATOR: &str = " • ";

pub fn render_footer(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let [keys_area, status_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Length(2)]).areas(area);

    if let Some(help) = ctx.help {
        let keys = Paragraph::new(format!("Keys: {help}"))
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(keys, keys_area);
    }

    let missing = missing_required(ctx.session);
    let mut segments = vec![ctx.status_message.to_string()];
    if let Some(state) = ctx.session.state() {
        if state.is_dirty() {
            segments.push("unsaved answers".to_string());
        }
        if missing > 0 {
            segments.push(format!("required left: {missing}"));
        }
        if let Some(field) = state.focused_field() {
            segments.push(format!("focus: {}", field.field.display_label()));
        }
    }
    segments.retain(|segment| !segment.trim().is_empty());

    let line = Line::from(vec![
        Span::styled("Status: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(segments.join(SEPARATOR)),
        Span::raw(" "),
        phase_badge(ctx.session.phase(), missing),
    ]);
    frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), status_area);
}

fn missing_required(session: &FillSession) -> usize {
    match (session.mode(), session.state()) {
        (RenderMode::Public, Some(state)) => state.missing_required().len(),
        _ => 0,
    }
}

fn phase_badge(phase: &SubmissionPhase, missing: usize) -> Span<'static> {
    let alert = Style::default().fg(Color::Red).bg(Color::Black);
    let calm = Style::default().fg(Color::Green);
    match phase {
        SubmissionPhase::Failed { .. } | SubmissionPhase::NotFound { .. } => {
            Span::styled(format!("[{}]", phase.label()), alert)
        }
        SubmissionPhase::Submitting => Span::styled("[...]", Style::default().fg(Color::Cyan)),
        SubmissionPhase::Submitted { .. } => Span::styled("[sent]", calm),
        _ if missing > 0 => Span::styled(format!("[! {missing}]"), alert),
        _ => Span::styled("[ok]", calm),
    }
}
