use std::{collections::HashSet, fs, path::Path};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{DEFAULT_OPTION, FormCategory, FormDraft, FormField, FormStatus};

use super::DocumentFormat;

pub fn parse_document_str(contents: &str, format: DocumentFormat) -> Result<Value> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str::<Value>(contents).context("failed to parse JSON document")
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => {
            serde_yaml::from_str::<Value>(contents).context("failed to parse YAML document")
        }
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => toml::from_str::<toml::Table>(contents)
            .context("failed to parse TOML document")
            .and_then(|table| {
                serde_json::to_value(table).context("failed to convert TOML to JSON")
            }),
    }
}

/// Reads a document from disk. Without an explicit format the file
/// extension decides, falling back to JSON.
pub fn read_document(path: &Path, format: Option<DocumentFormat>) -> Result<Value> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let format = format
        .or_else(|| DocumentFormat::from_path(path))
        .unwrap_or_default();
    parse_document_str(&contents, format)
        .with_context(|| format!("failed to load {}", path.display()))
}

/// Import shape of a form: only the title is mandatory. Ids and timestamps
/// are assigned when the draft is saved.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FormDocument {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_category")]
    category: FormCategory,
    #[serde(default = "default_status")]
    status: FormStatus,
    #[serde(default)]
    fields: Vec<FormField>,
}

fn default_category() -> FormCategory {
    FormCategory::Internal
}

fn default_status() -> FormStatus {
    FormStatus::Active
}

impl TryFrom<FormDocument> for FormDraft {
    type Error = anyhow::Error;

    /// Field ids must be present and unique, since answers are keyed by them.
    /// Choice fields without options get the default one.
    fn try_from(document: FormDocument) -> Result<Self> {
        let mut fields = document.fields;
        let mut seen = HashSet::new();
        for (order, field) in fields.iter_mut().enumerate() {
            if field.id.trim().is_empty() {
                bail!("field #{} has an empty id", order + 1);
            }
            if !seen.insert(field.id.clone()) {
                bail!("field id '{}' is used more than once", field.id);
            }
            if field.field_type.is_choice() && field.options.is_none() {
                field.options = Some(vec![DEFAULT_OPTION.to_string()]);
            }
            field.order = order;
        }
        Ok(FormDraft {
            id: None,
            title: document.title,
            description: document.description,
            category: document.category,
            status: document.status,
            fields,
        })
    }
}

/// Turns a single form object or an array of them into drafts ready to be
/// saved as new forms. Any `id` or `createdAt` in the input is ignored.
pub fn parse_form_documents(value: Value) -> Result<Vec<FormDraft>> {
    let documents = match value {
        Value::Array(items) => items,
        Value::Object(_) => vec![value],
        other => bail!("expected a form object or an array of forms, found {other}"),
    };
    documents
        .into_iter()
        .enumerate()
        .map(|(index, document)| {
            serde_json::from_value::<FormDocument>(document)
                .map_err(anyhow::Error::from)
                .and_then(FormDraft::try_from)
                .with_context(|| format!("form #{} is not a valid form document", index + 1))
        })
        .collect()
}
