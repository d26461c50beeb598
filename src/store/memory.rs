use crate::domain::{Form, FormDraft, FormSubmission, PdfTemplate};

use super::{
    FormRepository, StoreError, SubmissionRepository, TemplateRepository, filter_submissions,
    remove_form, upsert_form, upsert_template,
};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    forms: Vec<Form>,
    submissions: Vec<FormSubmission>,
    templates: Vec<PdfTemplate>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_forms(forms: Vec<Form>) -> Self {
        Self {
            forms,
            ..Self::default()
        }
    }
}

impl FormRepository for MemoryStore {
    fn list_forms(&self) -> Result<Vec<Form>, StoreError> {
        Ok(self.forms.clone())
    }

    fn save_form(&mut self, draft: FormDraft) -> Result<Form, StoreError> {
        upsert_form(&mut self.forms, draft)
    }

    fn delete_form(&mut self, id: &str) -> Result<bool, StoreError> {
        Ok(remove_form(&mut self.forms, id))
    }
}

impl SubmissionRepository for MemoryStore {
    fn record_submission(&mut self, submission: FormSubmission) -> Result<(), StoreError> {
        self.submissions.push(submission);
        Ok(())
    }

    fn list_submissions(&self, form_id: Option<&str>) -> Result<Vec<FormSubmission>, StoreError> {
        Ok(filter_submissions(self.submissions.clone(), form_id))
    }
}

impl TemplateRepository for MemoryStore {
    fn list_templates(&self) -> Result<Vec<PdfTemplate>, StoreError> {
        Ok(self.templates.clone())
    }

    fn save_template(&mut self, template: PdfTemplate) -> Result<PdfTemplate, StoreError> {
        Ok(upsert_template(&mut self.templates, template))
    }

    fn delete_template(&mut self, id: &str) -> Result<bool, StoreError> {
        let before = self.templates.len();
        self.templates.retain(|template| template.id != id);
        Ok(self.templates.len() != before)
    }
}
