use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Frame;
use tracing::{debug, info};

use crate::{
    domain::{FormSubmission, RenderMode},
    form::{FillSession, FormError, KeyOutcome, SubmissionPhase, apply_command},
    presentation::{self, NoticeRender, UiContext, renderer_for},
    store::SubmissionRepository,
};

use super::{
    input::{AppCommand, CommandDispatch, InputRouter},
    keymap::KeymapContext,
    options::UiOptions,
    status::StatusLine,
    terminal::FillTerminal,
};

pub(crate) struct App<'s, S: SubmissionRepository> {
    session: FillSession,
    store: &'s mut S,
    options: UiOptions,
    status: StatusLine,
    router: InputRouter,
    exit_armed: bool,
    should_quit: bool,
    submit_due: Option<Instant>,
}

impl<'s, S: SubmissionRepository> App<'s, S> {
    pub fn new(session: FillSession, store: &'s mut S, options: UiOptions) -> Self {
        let router = InputRouter::new(options.keymap.clone());
        let mut status = StatusLine::new();
        match session.phase() {
            SubmissionPhase::NotFound { form_id } => {
                status.set_raw(format!("Form '{form_id}' not found. Press Ctrl+Q to close."));
            }
            SubmissionPhase::Failed { message } => status.set_raw(message.clone()),
            _ => {}
        }
        Self {
            session,
            store,
            options,
            status,
            router,
            exit_armed: false,
            should_quit: false,
            submit_due: None,
        }
    }

    pub fn run(&mut self) -> Result<FormSubmission> {
        let mut terminal = FillTerminal::enter()?;
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if event::poll(self.poll_timeout(Instant::now()))? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(width, height) => terminal.resize(width, height)?,
                    Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
                }
            }
            self.on_tick(Instant::now());
        }
        drop(terminal);
        self.finish()
    }

    fn finish(&self) -> Result<FormSubmission> {
        if let Some(submission) = self.session.submission() {
            return Ok(submission.clone());
        }
        match self.session.phase() {
            SubmissionPhase::NotFound { form_id } => {
                Err(FormError::NotFound(form_id.clone()).into())
            }
            _ => Err(anyhow!("form closed without submitting")),
        }
    }

    fn keymap_context(&self) -> KeymapContext {
        match self.session.state().and_then(|state| state.focused_field()) {
            Some(field) if field.control.is_choice() => KeymapContext::Choice,
            _ => KeymapContext::Default,
        }
    }

    fn current_help_text(&self) -> Option<String> {
        if !self.options.show_help {
            return None;
        }
        self.router.help_text(self.keymap_context())
    }

    fn notice(&self) -> Option<NoticeRender> {
        match self.session.phase() {
            SubmissionPhase::Submitting => Some(NoticeRender::new(
                "Submitting",
                vec![
                    "Submitting...".to_string(),
                    "Press Esc to cancel.".to_string(),
                ],
            )),
            SubmissionPhase::Submitted { .. } => {
                let headline = match self.session.mode() {
                    RenderMode::Public => "Thank you! Your response has been recorded.",
                    RenderMode::Internal => "Session saved.",
                };
                Some(NoticeRender::new(
                    "Submitted",
                    vec![
                        headline.to_string(),
                        "Press Enter or Ctrl+Q to close.".to_string(),
                    ],
                ))
            }
            SubmissionPhase::NotFound { form_id } => Some(
                NoticeRender::new(
                    "Form not found",
                    vec![
                        format!("No form with id '{form_id}'."),
                        "Press Ctrl+Q to close.".to_string(),
                    ],
                )
                .alert(),
            ),
            _ => None,
        }
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        let help = self.current_help_text();
        let style = self.options.style.unwrap_or(self.session.mode());
        presentation::draw(
            frame,
            UiContext {
                session: &self.session,
                renderer: renderer_for(style),
                status_message: self.status.message(),
                help: help.as_deref(),
                notice: self.notice(),
            },
        );
    }

    fn poll_timeout(&self, now: Instant) -> Duration {
        match self.submit_due {
            Some(due) => due.saturating_duration_since(now).min(self.options.tick_rate),
            None => self.options.tick_rate,
        }
    }

    /// Completes a pending submission once its cancellation window has
    /// passed, however many key events arrived in between.
    pub(crate) fn on_tick(&mut self, now: Instant) {
        if self.session.phase() != &SubmissionPhase::Submitting {
            self.submit_due = None;
            return;
        }
        if self.submit_due.is_some_and(|due| now < due) {
            return;
        }
        self.submit_due = None;
        match self.session.complete_submit(&mut *self.store) {
            Ok(_) => self.status.submitted(),
            Err(err) => self.status.failed(&err.to_string()),
        }
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match self.session.phase() {
            SubmissionPhase::Submitting => {
                if key.code == KeyCode::Esc {
                    self.on_cancel();
                }
                return;
            }
            SubmissionPhase::Submitted { .. } => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                    self.should_quit = true;
                    return;
                }
            }
            _ => {}
        }

        match self.router.classify(&key, self.keymap_context()) {
            CommandDispatch::Form(command) => {
                if let Some(state) = self.session.state_mut() {
                    apply_command(state, command);
                }
                self.exit_armed = false;
            }
            CommandDispatch::App(command) => self.handle_app_command(command),
            CommandDispatch::Input(event) => self.handle_field_input(&event),
        }
    }

    fn handle_app_command(&mut self, command: AppCommand) {
        match command {
            AppCommand::Submit => {
                self.exit_armed = false;
                self.on_submit();
            }
            AppCommand::Quit => self.on_exit(),
            AppCommand::Dismiss => {
                self.exit_armed = false;
                if self.session.phase().accepts_input() {
                    self.status.ready();
                }
            }
        }
    }

    fn handle_field_input(&mut self, event: &KeyEvent) {
        if !self.session.phase().accepts_input() {
            return;
        }
        let Some(state) = self.session.state_mut() else {
            return;
        };
        if let KeyOutcome::Changed(_) = state.handle_key(event)
            && let Some(field) = state.focused_field()
        {
            self.exit_armed = false;
            self.status.editing(&field.field.display_label());
        }
    }

    pub(crate) fn on_submit(&mut self) {
        match self.session.begin_submit() {
            Ok(()) => {
                self.submit_due = Some(Instant::now() + self.options.tick_rate);
                debug!(form = %self.session.form_id(), "submission pending");
                self.status.submitting();
            }
            Err(FormError::ValidationFailed { missing }) => {
                self.status.missing_required(&missing);
                if let Some(state) = self.session.state_mut() {
                    let first = state.missing_required().first().map(|field| field.id.clone());
                    if let Some(id) = first {
                        state.focus_field(&id);
                    }
                }
            }
            Err(err) => self.status.set_raw(err.to_string()),
        }
    }

    pub(crate) fn on_cancel(&mut self) {
        if self.session.cancel_submit() {
            self.submit_due = None;
            info!(form = %self.session.form_id(), "submission cancelled");
            self.status.submit_cancelled();
        }
    }

    pub(crate) fn on_exit(&mut self) {
        let dirty = self
            .session
            .state()
            .is_some_and(|state| state.is_dirty());
        if self.options.confirm_exit && dirty && !self.exit_armed {
            self.exit_armed = true;
            self.status.pending_exit();
            return;
        }
        self.should_quit = true;
    }
}

#[cfg(test)]
impl<S: SubmissionRepository> App<'_, S> {
    pub(crate) fn session(&self) -> &FillSession {
        &self.session
    }

    pub(crate) fn status_message(&self) -> &str {
        self.status.message()
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub(crate) fn finish_for_test(&self) -> Result<FormSubmission> {
        self.finish()
    }

    pub(crate) fn draw_for_test(&self, frame: &mut Frame<'_>) {
        self.draw(frame)
    }
}
