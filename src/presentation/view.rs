use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::{domain::RenderMode, form::FillSession};

use super::{
    components::{
        header_height, render_body, render_footer, render_header, render_notice,
        render_section_strip,
    },
    renderer::FieldRenderer,
};

pub struct UiContext<'a> {
    pub session: &'a FillSession,
    pub renderer: &'a dyn FieldRenderer,
    pub status_message: &'a str,
    pub help: Option<&'a str>,
    pub notice: Option<NoticeRender>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeRender {
    pub title: String,
    pub lines: Vec<String>,
    pub alert: bool,
}

impl NoticeRender {
    pub fn new(title: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            title: title.into(),
            lines,
            alert: false,
        }
    }

    pub fn alert(mut self) -> Self {
        self.alert = true;
        self
    }
}

pub fn draw(frame: &mut Frame<'_>, ctx: UiContext<'_>) {
    let session = ctx.session;
    let show_strip = session.mode() == RenderMode::Internal
        && session
            .state()
            .is_some_and(|state| state.groups().iter().any(|group| group.title.is_some()));

    let mut constraints = vec![Constraint::Length(header_height(session))];
    if show_strip {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(5));
    constraints.push(Constraint::Length(4));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    let mut index = 0;
    render_header(frame, chunks[index], session);
    index += 1;
    if show_strip && let Some(state) = session.state() {
        render_section_strip(frame, chunks[index], state);
        index += 1;
    }
    let cursor_enabled = ctx.notice.is_none() && session.phase().accepts_input();
    render_body(frame, chunks[index], session, ctx.renderer, cursor_enabled);
    render_footer(frame, chunks[index + 1], &ctx);

    if let Some(notice) = &ctx.notice {
        render_notice(frame, notice);
    }
}
