use std::sync::LazyLock;

use jsonschema::{Validator, validator_for};
use schemars::{JsonSchema, schema_for};
use serde_json::Value;

use crate::domain::{Form, FormSubmission, PdfTemplate};

use super::error::{Collection, StoreError};

const MAX_REPORTED_ISSUES: usize = 5;

type CompiledSchema = Result<Validator, String>;

static FORMS: LazyLock<CompiledSchema> = LazyLock::new(compile::<Vec<Form>>);
static SUBMISSIONS: LazyLock<CompiledSchema> = LazyLock::new(compile::<Vec<FormSubmission>>);
static TEMPLATES: LazyLock<CompiledSchema> = LazyLock::new(compile::<Vec<PdfTemplate>>);

fn compile<T: JsonSchema>() -> CompiledSchema {
    let schema = serde_json::to_value(schema_for!(T)).map_err(|err| err.to_string())?;
    validator_for(&schema).map_err(|err| err.to_string())
}

pub fn collection_schema(collection: Collection) -> Value {
    let root = match collection {
        Collection::Forms => schema_for!(Vec<Form>),
        Collection::Submissions => schema_for!(Vec<FormSubmission>),
        Collection::Templates => schema_for!(Vec<PdfTemplate>),
    };
    serde_json::to_value(root).unwrap_or(Value::Null)
}

/// Checks a raw collection document before it is deserialized so that the
/// reported problems point at the offending data.
pub(crate) fn check_collection(collection: Collection, document: &Value) -> Result<(), StoreError> {
    let compiled = match collection {
        Collection::Forms => &*FORMS,
        Collection::Submissions => &*SUBMISSIONS,
        Collection::Templates => &*TEMPLATES,
    };
    let validator = compiled.as_ref().map_err(|message| {
        StoreError::corrupt(collection, format!("schema unavailable: {message}"))
    })?;
    let issues = validator
        .iter_errors(document)
        .take(MAX_REPORTED_ISSUES)
        .map(|error| error.to_string())
        .collect::<Vec<_>>();
    if issues.is_empty() {
        Ok(())
    } else {
        Err(StoreError::corrupt(collection, issues.join("; ")))
    }
}
