use std::borrow::Cow;

pub const READY_STATUS: &str = "Ready. Press Ctrl+S to submit.";
const SUBMITTING: &str = "Submitting... press Esc to cancel.";
const CANCELLED: &str = "Submission cancelled";
const SUBMITTED: &str = "Submitted. Press Enter or Ctrl+Q to close.";
const CONFIRM_EXIT: &str = "Unsubmitted answers. Press Ctrl+Q again to quit without submitting.";

#[derive(Debug, Clone)]
pub struct StatusLine {
    message: Cow<'static, str>,
}

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            message: Cow::Borrowed(READY_STATUS),
        }
    }
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_raw(&mut self, message: impl Into<String>) {
        self.message = Cow::Owned(message.into());
    }

    pub fn ready(&mut self) {
        self.message = Cow::Borrowed(READY_STATUS);
    }

    pub fn editing(&mut self, label: &str) {
        self.message = Cow::Owned(format!("Editing {label}"));
    }

    pub fn submitting(&mut self) {
        self.message = Cow::Borrowed(SUBMITTING);
    }

    pub fn submit_cancelled(&mut self) {
        self.message = Cow::Borrowed(CANCELLED);
    }

    pub fn submitted(&mut self) {
        self.message = Cow::Borrowed(SUBMITTED);
    }

    pub fn missing_required(&mut self, labels: &[String]) {
        self.message = Cow::Owned(format!("Please answer: {}", labels.join(", ")));
    }

    pub fn failed(&mut self, reason: &str) {
        self.message = Cow::Owned(format!(
            "Submission failed: {reason}. Press Ctrl+S to retry."
        ));
    }

    pub fn pending_exit(&mut self) {
        self.message = Cow::Borrowed(CONFIRM_EXIT);
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
