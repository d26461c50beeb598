use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{Form, FormDraft, FormSubmission, PdfTemplate};

use super::{
    FormRepository, SubmissionRepository, TemplateRepository,
    error::{Collection, StoreError},
    filter_submissions, remove_form,
    schema_check::check_collection,
    upsert_form, upsert_template,
};

/// Directory backed store holding one JSON array per collection.
///
/// Each mutation reads the whole collection, edits it in memory and writes the
/// whole collection back. Concurrent writers are last-write-wins.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn collection_path(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.file_name())
    }

    fn read<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>, StoreError> {
        let path = self.collection_path(collection);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "collection file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        let document: Value = serde_json::from_str(&contents).map_err(|err| {
            warn!(path = %path.display(), error = %err, "collection is not valid JSON");
            StoreError::corrupt(collection, err.to_string())
        })?;
        check_collection(collection, &document)?;
        let entries = serde_json::from_value::<Vec<T>>(document)
            .map_err(|err| StoreError::corrupt(collection, err.to_string()))?;
        debug!(%collection, count = entries.len(), "collection loaded");
        Ok(entries)
    }

    fn write<T: Serialize>(&self, collection: Collection, entries: &[T]) -> Result<(), StoreError> {
        let payload = serde_json::to_string_pretty(entries)
            .map_err(|source| StoreError::Serialize { collection, source })?;
        fs::create_dir_all(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;
        let path = self.collection_path(collection);
        let staging = path.with_extension("json.tmp");
        write_file(&staging, &payload).map_err(|source| StoreError::Io {
            path: staging.clone(),
            source,
        })?;
        fs::rename(&staging, &path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(%collection, count = entries.len(), "collection written");
        Ok(())
    }
}

fn write_file(path: &Path, payload: &str) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(payload.as_bytes())?;
    file.write_all(b"\n")?;
    file.flush()
}

impl FormRepository for JsonFileStore {
    fn list_forms(&self) -> Result<Vec<Form>, StoreError> {
        self.read(Collection::Forms)
    }

    fn save_form(&mut self, draft: FormDraft) -> Result<Form, StoreError> {
        let mut forms = self.list_forms()?;
        let saved = upsert_form(&mut forms, draft)?;
        self.write(Collection::Forms, &forms)?;
        Ok(saved)
    }

    fn delete_form(&mut self, id: &str) -> Result<bool, StoreError> {
        let mut forms = self.list_forms()?;
        let removed = remove_form(&mut forms, id);
        if removed {
            self.write(Collection::Forms, &forms)?;
        }
        Ok(removed)
    }
}

impl SubmissionRepository for JsonFileStore {
    fn record_submission(&mut self, submission: FormSubmission) -> Result<(), StoreError> {
        let mut submissions: Vec<FormSubmission> = self.read(Collection::Submissions)?;
        submissions.push(submission);
        self.write(Collection::Submissions, &submissions)
    }

    fn list_submissions(&self, form_id: Option<&str>) -> Result<Vec<FormSubmission>, StoreError> {
        Ok(filter_submissions(self.read(Collection::Submissions)?, form_id))
    }
}

impl TemplateRepository for JsonFileStore {
    fn list_templates(&self) -> Result<Vec<PdfTemplate>, StoreError> {
        self.read(Collection::Templates)
    }

    fn save_template(&mut self, template: PdfTemplate) -> Result<PdfTemplate, StoreError> {
        let mut templates = self.list_templates()?;
        let saved = upsert_template(&mut templates, template);
        self.write(Collection::Templates, &templates)?;
        Ok(saved)
    }

    fn delete_template(&mut self, id: &str) -> Result<bool, StoreError> {
        let mut templates = self.list_templates()?;
        let before = templates.len();
        templates.retain(|template| template.id != id);
        let removed = templates.len() != before;
        if removed {
            self.write(Collection::Templates, &templates)?;
        }
        Ok(removed)
    }
}
