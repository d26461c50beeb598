use anyhow::Result;
use tracing::info;

use crate::{
    domain::{FormSubmission, RenderMode},
    form::FillSession,
    store::{FormRepository, SubmissionRepository},
};

use super::{options::UiOptions, runtime::App};

/// Full-screen fill flow for one stored form.
///
/// ```no_run
/// use reportflow::prelude::*;
///
/// let mut store = JsonFileStore::new(".reportflow");
/// let submission = FillUI::new("a1b2c3d4e5f6", RenderMode::Public).run(&mut store)?;
/// println!("{}", submission.id);
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug)]
pub struct FillUI {
    form_id: String,
    mode: RenderMode,
    client_id: Option<String>,
    client_name: Option<String>,
    options: UiOptions,
}

impl FillUI {
    pub fn new(form_id: impl Into<String>, mode: RenderMode) -> Self {
        Self {
            form_id: form_id.into(),
            mode,
            client_id: None,
            client_name: None,
            options: UiOptions::default(),
        }
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = Some(name.into());
        self
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    /// Opens the form, runs the terminal UI and returns the recorded
    /// submission. Closing without submitting is an error.
    pub fn run<S>(self, store: &mut S) -> Result<FormSubmission>
    where
        S: FormRepository + SubmissionRepository,
    {
        let FillUI {
            form_id,
            mode,
            client_id,
            client_name,
            options,
        } = self;

        let mut session = FillSession::open(&*store, form_id, mode);
        if let Some(client_id) = client_id {
            session = session.with_client_id(client_id);
        }
        if let Some(name) = client_name {
            session = session.with_client_name(name);
        }
        info!(form = %session.form_id(), phase = session.phase().label(), "fill screen opened");

        let mut app = App::new(session, store, options);
        app.run()
    }
}
