//! Repository layer. Every screen and command goes through these traits
//! instead of touching a shared global store, so the backing storage can be
//! swapped for tests.

mod error;
mod json_file;
mod memory;
mod schema_check;

use tracing::info;

use crate::domain::{Form, FormDraft, FormSubmission, PdfTemplate, generate_unique_id, now_millis};

pub use error::{Collection, StoreError};
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use schema_check::collection_schema;

pub trait FormRepository {
    fn list_forms(&self) -> Result<Vec<Form>, StoreError>;

    fn get_form(&self, id: &str) -> Result<Option<Form>, StoreError> {
        Ok(self.list_forms()?.into_iter().find(|form| form.id == id))
    }

    /// Persists the whole draft. Drafts without an id (or with the `new` id)
    /// are appended under a fresh id; drafts with an id overwrite that entry
    /// and keep its original `created_at`.
    fn save_form(&mut self, draft: FormDraft) -> Result<Form, StoreError>;

    fn delete_form(&mut self, id: &str) -> Result<bool, StoreError>;
}

pub trait SubmissionRepository {
    fn record_submission(&mut self, submission: FormSubmission) -> Result<(), StoreError>;

    fn list_submissions(&self, form_id: Option<&str>) -> Result<Vec<FormSubmission>, StoreError>;

    fn get_submission(&self, id: &str) -> Result<Option<FormSubmission>, StoreError> {
        Ok(self
            .list_submissions(None)?
            .into_iter()
            .find(|submission| submission.id == id))
    }
}

pub trait TemplateRepository {
    fn list_templates(&self) -> Result<Vec<PdfTemplate>, StoreError>;

    fn get_template(&self, id: &str) -> Result<Option<PdfTemplate>, StoreError> {
        Ok(self
            .list_templates()?
            .into_iter()
            .find(|template| template.id == id))
    }

    fn save_template(&mut self, template: PdfTemplate) -> Result<PdfTemplate, StoreError>;

    fn delete_template(&mut self, id: &str) -> Result<bool, StoreError>;
}

pub trait Store: FormRepository + SubmissionRepository + TemplateRepository {}

impl<T> Store for T where T: FormRepository + SubmissionRepository + TemplateRepository {}

pub(crate) fn upsert_form(forms: &mut Vec<Form>, draft: FormDraft) -> Result<Form, StoreError> {
    match draft.existing_id().map(str::to_string) {
        Some(id) => {
            let slot = forms
                .iter_mut()
                .find(|form| form.id == id)
                .ok_or_else(|| StoreError::not_found(Collection::Forms, &id))?;
            let created_at = slot.created_at;
            *slot = draft.into_form(id, created_at);
            info!(form = %slot.id, "form overwritten");
            Ok(slot.clone())
        }
        None => {
            let id = generate_unique_id(forms.iter().map(|form| form.id.as_str()));
            let form = draft.into_form(id, now_millis());
            info!(form = %form.id, "form created");
            forms.push(form.clone());
            Ok(form)
        }
    }
}

pub(crate) fn remove_form(forms: &mut Vec<Form>, id: &str) -> bool {
    let before = forms.len();
    forms.retain(|form| form.id != id);
    forms.len() != before
}

pub(crate) fn upsert_template(
    templates: &mut Vec<PdfTemplate>,
    mut template: PdfTemplate,
) -> PdfTemplate {
    if template.id.is_empty() {
        template.id = generate_unique_id(templates.iter().map(|existing| existing.id.as_str()));
    }
    match templates.iter_mut().find(|existing| existing.id == template.id) {
        Some(slot) => *slot = template.clone(),
        None => templates.push(template.clone()),
    }
    template
}

pub(crate) fn filter_submissions(
    submissions: Vec<FormSubmission>,
    form_id: Option<&str>,
) -> Vec<FormSubmission> {
    match form_id {
        Some(form_id) => submissions
            .into_iter()
            .filter(|submission| submission.form_id == form_id)
            .collect(),
        None => submissions,
    }
}
