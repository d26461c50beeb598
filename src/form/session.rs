use tracing::{info, warn};

use crate::{
    domain::{FormSubmission, RenderMode, generate_id, now_millis},
    store::{FormRepository, SubmissionRepository},
};

use super::{error::FormError, state::FillState};

/// Lifecycle of a fill screen.
///
/// `Loading → Ready → Submitting → Submitted`, with `NotFound` when the form
/// lookup misses and `Failed` when the store rejects a load or a submission.
/// `Submitting → Ready` is the cancellation path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionPhase {
    Loading,
    NotFound { form_id: String },
    Ready,
    Submitting,
    Submitted { submission_id: String },
    Failed { message: String },
}

impl SubmissionPhase {
    pub fn label(&self) -> &'static str {
        match self {
            SubmissionPhase::Loading => "loading",
            SubmissionPhase::NotFound { .. } => "not found",
            SubmissionPhase::Ready => "ready",
            SubmissionPhase::Submitting => "submitting",
            SubmissionPhase::Submitted { .. } => "submitted",
            SubmissionPhase::Failed { .. } => "failed",
        }
    }

    pub fn accepts_input(&self) -> bool {
        matches!(self, SubmissionPhase::Ready | SubmissionPhase::Failed { .. })
    }
}

#[derive(Debug, Clone)]
pub struct FillSession {
    form_id: String,
    mode: RenderMode,
    phase: SubmissionPhase,
    state: Option<FillState>,
    client_id: Option<String>,
    client_name: Option<String>,
    submission: Option<FormSubmission>,
}

impl FillSession {
    pub fn new(form_id: impl Into<String>, mode: RenderMode) -> Self {
        Self {
            form_id: form_id.into(),
            mode,
            phase: SubmissionPhase::Loading,
            state: None,
            client_id: None,
            client_name: None,
            submission: None,
        }
    }

    pub fn open(repo: &dyn FormRepository, form_id: impl Into<String>, mode: RenderMode) -> Self {
        let mut session = Self::new(form_id, mode);
        if let Err(err) = session.load(repo) {
            warn!(form = %session.form_id, error = %err, "form could not be opened");
        }
        session
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.set_client_name(name);
        self
    }

    pub fn set_client_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.client_name = if name.trim().is_empty() {
            None
        } else {
            Some(name)
        };
    }

    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn phase(&self) -> &SubmissionPhase {
        &self.phase
    }

    pub fn client_name(&self) -> Option<&str> {
        self.client_name.as_deref()
    }

    pub fn state(&self) -> Option<&FillState> {
        self.state.as_ref()
    }

    pub fn state_mut(&mut self) -> Option<&mut FillState> {
        self.state.as_mut()
    }

    pub fn submission(&self) -> Option<&FormSubmission> {
        self.submission.as_ref()
    }

    /// Resolves the form from `repo`. Leaves the session in `Ready`,
    /// `NotFound` or `Failed`.
    pub fn load(&mut self, repo: &dyn FormRepository) -> Result<(), FormError> {
        self.phase = SubmissionPhase::Loading;
        match repo.get_form(&self.form_id) {
            Ok(Some(form)) => {
                info!(form = %form.id, mode = self.mode.label(), "form loaded");
                self.state = Some(FillState::new(form, self.mode));
                self.phase = SubmissionPhase::Ready;
                Ok(())
            }
            Ok(None) => {
                self.phase = SubmissionPhase::NotFound {
                    form_id: self.form_id.clone(),
                };
                Err(FormError::NotFound(self.form_id.clone()))
            }
            Err(err) => {
                let err = FormError::from(err);
                self.phase = SubmissionPhase::Failed {
                    message: err.to_string(),
                };
                Err(err)
            }
        }
    }

    fn transition_error(&self, action: &'static str) -> FormError {
        FormError::InvalidTransition {
            action,
            phase: self.phase.label(),
        }
    }

    /// Enters `Submitting`. Public forms refuse while required answers are
    /// blank; session capture never blocks.
    pub fn begin_submit(&mut self) -> Result<(), FormError> {
        if !self.phase.accepts_input() {
            return Err(self.transition_error("submit"));
        }
        let Some(state) = self.state.as_ref() else {
            return Err(self.transition_error("submit"));
        };
        if self.mode == RenderMode::Public {
            let missing = state
                .missing_required()
                .into_iter()
                .map(|field| field.display_label())
                .collect::<Vec<_>>();
            if !missing.is_empty() {
                return Err(FormError::ValidationFailed { missing });
            }
        }
        self.phase = SubmissionPhase::Submitting;
        Ok(())
    }

    pub fn cancel_submit(&mut self) -> bool {
        if self.phase == SubmissionPhase::Submitting {
            self.phase = SubmissionPhase::Ready;
            true
        } else {
            false
        }
    }

    /// Records the submission and moves to `Submitted`, or to `Failed` when
    /// the store rejects it.
    pub fn complete_submit(
        &mut self,
        repo: &mut dyn SubmissionRepository,
    ) -> Result<&FormSubmission, FormError> {
        if self.phase != SubmissionPhase::Submitting {
            return Err(self.transition_error("complete a submission"));
        }
        let Some(state) = self.state.as_mut() else {
            return Err(self.transition_error("complete a submission"));
        };
        let submission = FormSubmission {
            id: generate_id(),
            form_id: self.form_id.clone(),
            client_id: self.client_id.clone(),
            client_name: self.client_name.clone(),
            answers: state.answers().clone(),
            submitted_at: now_millis(),
        };
        match repo.record_submission(submission.clone()) {
            Ok(()) => {
                state.mark_clean();
                info!(form = %self.form_id, submission = %submission.id, "submission recorded");
                self.phase = SubmissionPhase::Submitted {
                    submission_id: submission.id.clone(),
                };
                Ok(&*self.submission.insert(submission))
            }
            Err(err) => {
                let err = FormError::from(err);
                warn!(form = %self.form_id, error = %err, "submission failed");
                self.phase = SubmissionPhase::Failed {
                    message: err.to_string(),
                };
                Err(err)
            }
        }
    }

    pub fn submit(
        &mut self,
        repo: &mut dyn SubmissionRepository,
    ) -> Result<&FormSubmission, FormError> {
        self.begin_submit()?;
        self.complete_submit(repo)
    }
}
