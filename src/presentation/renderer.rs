use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use crate::{
    domain::{AnswerValue, RenderMode},
    form::{ControlKind, FieldState},
};

#[derive(Debug, Clone)]
pub struct FieldRender {
    pub lines: Vec<Line<'static>>,
    pub cursor: Option<CursorHint>,
}

impl FieldRender {
    pub fn height(&self) -> usize {
        self.lines.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorHint {
    pub line_offset: usize,
    pub column: u16,
}

/// Visual chrome for fields. Both implementations cover the same field types;
/// only the look of labels, empty values and choice sets differs.
pub trait FieldRenderer {
    fn mode(&self) -> RenderMode;

    fn label_line(&self, field: &FieldState, focused: bool) -> Line<'static>;

    fn placeholder(&self, control: ControlKind) -> &'static str;

    fn choice_lines(
        &self,
        field: &FieldState,
        value: &AnswerValue,
        focused: bool,
        width: u16,
    ) -> Vec<Line<'static>>;

    fn render(
        &self,
        field: &FieldState,
        value: &AnswerValue,
        focused: bool,
        width: u16,
    ) -> FieldRender {
        let mut lines = vec![self.label_line(field, focused)];
        if let Some(helper) = field.field.helper_text() {
            for segment in wrap(helper, width.max(8) as usize) {
                lines.push(Line::from(Span::styled(
                    format!("  {segment}"),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        if field.control.is_choice() {
            lines.extend(self.choice_lines(field, value, focused, width));
            return FieldRender {
                lines,
                cursor: None,
            };
        }
        let start = lines.len();
        let text = value.as_text().unwrap_or_default();
        let placeholder = self.placeholder(field.control);
        let (panel, cursor) = text_panel(text, placeholder, field, focused, width);
        lines.extend(panel);
        FieldRender {
            lines,
            cursor: cursor.map(|hint| CursorHint {
                line_offset: hint.line_offset + start,
                column: hint.column,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InternalRenderer;

#[derive(Debug, Clone, Copy, Default)]
pub struct PublicRenderer;

static INTERNAL: InternalRenderer = InternalRenderer;
static PUBLIC: PublicRenderer = PublicRenderer;

pub fn renderer_for(mode: RenderMode) -> &'static dyn FieldRenderer {
    match mode {
        RenderMode::Internal => &INTERNAL,
        RenderMode::Public => &PUBLIC,
    }
}

fn label_style(focused: bool) -> Style {
    let color = if focused { Color::Yellow } else { Color::Cyan };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn required_span() -> Span<'static> {
    Span::styled(" *", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
}

impl FieldRenderer for InternalRenderer {
    fn mode(&self) -> RenderMode {
        RenderMode::Internal
    }

    fn label_line(&self, field: &FieldState, focused: bool) -> Line<'static> {
        let mut spans = vec![Span::styled(field.field.display_label(), label_style(focused))];
        if field.field.required {
            spans.push(required_span());
        }
        Line::from(spans)
    }

    fn placeholder(&self, control: ControlKind) -> &'static str {
        match control {
            ControlKind::MultiLine => "Describe the session in detail...",
            ControlKind::Numeric => "0",
            ControlKind::DatePicker => "YYYY-MM-DD",
            _ => "Type the answer here...",
        }
    }

    fn choice_lines(
        &self,
        field: &FieldState,
        value: &AnswerValue,
        focused: bool,
        width: u16,
    ) -> Vec<Line<'static>> {
        let max_width = (width as usize).max(8);
        let mut lines = Vec::new();
        let mut row: Vec<Span<'static>> = vec![Span::raw("  ")];
        let mut row_width = 2usize;
        for (index, option) in field.options().iter().enumerate() {
            let chosen = is_chosen(value, option);
            let button = if chosen {
                format!("[ {option} ✓ ]")
            } else {
                format!("[ {option} ]")
            };
            let button_width = UnicodeWidthStr::width(button.as_str());
            if row_width > 2 && row_width + button_width + 1 > max_width {
                lines.push(Line::from(std::mem::take(&mut row)));
                row.push(Span::raw("  "));
                row_width = 2;
            }
            let mut style = if chosen {
                Style::default().fg(Color::Black).bg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            if focused && index == field.highlighted() {
                style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
            }
            if row_width > 2 {
                row.push(Span::raw(" "));
                row_width += 1;
            }
            row.push(Span::styled(button, style));
            row_width += button_width;
        }
        if row_width > 2 {
            lines.push(Line::from(row));
        }
        if lines.is_empty() {
            lines.push(no_options_line());
        }
        lines
    }
}

impl FieldRenderer for PublicRenderer {
    fn mode(&self) -> RenderMode {
        RenderMode::Public
    }

    fn label_line(&self, field: &FieldState, focused: bool) -> Line<'static> {
        let mut spans = vec![Span::styled(field.field.display_label(), label_style(focused))];
        if field.field.required {
            spans.push(required_span());
            spans.push(Span::styled(
                " (required)",
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    }

    fn placeholder(&self, control: ControlKind) -> &'static str {
        match control {
            ControlKind::MultiLine => "Your detailed answer",
            ControlKind::Numeric => "0",
            ControlKind::DatePicker => "YYYY-MM-DD",
            _ => "Your answer",
        }
    }

    fn choice_lines(
        &self,
        field: &FieldState,
        value: &AnswerValue,
        focused: bool,
        _width: u16,
    ) -> Vec<Line<'static>> {
        let multi = field.control == ControlKind::MultiChoice;
        let mut lines = field
            .options()
            .iter()
            .enumerate()
            .map(|(index, option)| {
                let chosen = is_chosen(value, option);
                let mark = match (multi, chosen) {
                    (true, true) => "[x]",
                    (true, false) => "[ ]",
                    (false, true) => "(•)",
                    (false, false) => "( )",
                };
                let highlighted = focused && index == field.highlighted();
                let pointer = if highlighted { "› " } else { "  " };
                let style = if highlighted {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                Line::from(vec![
                    Span::styled(pointer, Style::default().fg(Color::Yellow)),
                    Span::styled(format!("{mark} {option}"), style),
                ])
            })
            .collect::<Vec<_>>();
        if lines.is_empty() {
            lines.push(no_options_line());
        }
        lines
    }
}

fn is_chosen(value: &AnswerValue, option: &str) -> bool {
    match value {
        AnswerValue::Text(text) => text == option,
        AnswerValue::Choices(items) => items.iter().any(|item| item == option),
    }
}

fn no_options_line() -> Line<'static> {
    Line::from(Span::styled(
        "  No options configured",
        Style::default().fg(Color::DarkGray),
    ))
}

/// Wraps the value to `width`. Multi-line values grow with their content; the
/// focused field is boxed and reports the cursor at the end of the text.
fn text_panel(
    text: &str,
    placeholder: &str,
    field: &FieldState,
    focused: bool,
    width: u16,
) -> (Vec<Line<'static>>, Option<CursorHint>) {
    let clamp_width = width.saturating_sub(4).max(4) as usize;
    let empty = text.is_empty();
    let mut segments: Vec<String> = Vec::new();
    if empty {
        segments.push(String::new());
    } else {
        for raw_line in text.split('\n') {
            let wrapped = wrap(raw_line, clamp_width);
            if wrapped.is_empty() {
                segments.push(String::new());
            } else {
                segments.extend(wrapped.into_iter().map(|segment| segment.into_owned()));
            }
        }
    }
    if field.control == ControlKind::MultiLine && segments.len() < 2 {
        segments.push(String::new());
    }
    let cursor_line = if empty { 0 } else { segments.len() - 1 };
    let cursor_column = if empty {
        0
    } else {
        UnicodeWidthStr::width(segments[cursor_line].as_str())
    };
    if empty {
        segments[0] = placeholder.to_string();
    }
    let text_style = if empty {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    let mut lines = Vec::new();
    if !focused {
        for segment in segments {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(segment, text_style),
            ]));
        }
        return (lines, None);
    }

    let inner_width = segments
        .iter()
        .map(|segment| UnicodeWidthStr::width(segment.as_str()))
        .max()
        .unwrap_or(0)
        .max(clamp_width.min(24));
    let border_style = Style::default().fg(Color::Yellow);
    let border = "─".repeat(inner_width + 2);
    lines.push(Line::from(Span::styled(format!("┌{border}┐"), border_style)));
    let first_value_line = lines.len();
    for segment in segments {
        let pad = inner_width.saturating_sub(UnicodeWidthStr::width(segment.as_str()));
        lines.push(Line::from(vec![
            Span::styled("│ ", border_style),
            Span::styled(format!("{segment}{}", " ".repeat(pad)), text_style),
            Span::styled(" │", border_style),
        ]));
    }
    lines.push(Line::from(Span::styled(format!("└{border}┘"), border_style)));
    let cursor = CursorHint {
        line_offset: first_value_line + cursor_line,
        column: 2 + cursor_column as u16,
    };
    (lines, Some(cursor))
}
