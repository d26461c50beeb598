use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use serde_json::Value;

use crate::{
    domain::{FieldPatch, FieldType, FormDraft, PdfTemplate},
    store::{
        Collection, FormRepository, JsonFileStore, StoreError, SubmissionRepository,
        TemplateRepository, collection_schema,
    },
};

use super::submission;

struct TempRoot(PathBuf);

impl TempRoot {
    fn new(tag: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        TempRoot(std::env::temp_dir().join(format!("reportflow-{tag}-{nanos}")))
    }
}

impl Drop for TempRoot {
    fn drop(&mut self) {
        fs::remove_dir_all(&self.0).ok();
    }
}

#[test]
fn missing_files_read_as_empty() {
    let root = TempRoot::new("empty");
    let store = JsonFileStore::new(&root.0);
    assert!(store.list_forms().expect("forms").is_empty());
    assert!(store.list_submissions(None).expect("submissions").is_empty());
    assert!(store.list_templates().expect("templates").is_empty());
    assert!(!root.0.exists());
}

#[test]
fn forms_round_trip_through_disk() {
    let root = TempRoot::new("forms");
    let mut store = JsonFileStore::new(&root.0);
    let mut draft = FormDraft::new().with_title("Intake");
    let field = draft.add_field(FieldType::Select, None);
    draft
        .update_field(&field, FieldPatch::new().with_label("Mood"))
        .expect("update");
    let saved = store.save_form(draft).expect("save");

    let reopened = JsonFileStore::new(&root.0);
    let loaded = reopened.get_form(&saved.id).expect("get").expect("present");
    assert_eq!(loaded, saved);

    let raw: Value = serde_json::from_str(
        &fs::read_to_string(store.collection_path(Collection::Forms)).expect("read"),
    )
    .expect("json");
    assert_eq!(raw[0]["fields"][0]["type"], "select");
    assert_eq!(raw[0]["createdAt"], saved.created_at);
    assert!(!root.0.join("forms.json.tmp").exists());
}

#[test]
fn dormant_options_are_not_persisted() {
    let root = TempRoot::new("dormant");
    let mut store = JsonFileStore::new(&root.0);
    let mut draft = FormDraft::new();
    let field = draft.add_field(FieldType::Checkbox, None);
    draft
        .update_field(&field, FieldPatch::new().with_type(FieldType::Text))
        .expect("retype");
    assert!(draft.field(&field).and_then(|f| f.options.as_ref()).is_some());
    let saved = store.save_form(draft).expect("save");
    assert_eq!(saved.fields[0].options, None);
    let contents = fs::read_to_string(store.collection_path(Collection::Forms)).expect("read");
    assert!(!contents.contains("\"options\""));
}

#[test]
fn invalid_json_is_reported_as_corrupt() {
    let root = TempRoot::new("badjson");
    fs::create_dir_all(&root.0).expect("mkdir");
    fs::write(root.0.join("forms.json"), "[{").expect("write");
    let store = JsonFileStore::new(&root.0);
    let err = store.list_forms().expect_err("corrupt");
    assert!(err.is_corrupt());
}

#[test]
fn schema_violations_are_reported_as_corrupt() {
    let root = TempRoot::new("schema");
    fs::create_dir_all(&root.0).expect("mkdir");
    fs::write(
        root.0.join("forms.json"),
        r#"[{"id":"f1","title":"A","category":"public","status":"active",
            "fields":[{"id":"x","type":"image"}],"createdAt":0}]"#,
    )
    .expect("write");
    let store = JsonFileStore::new(&root.0);
    match store.list_forms() {
        Err(StoreError::Corrupt {
            collection,
            details,
        }) => {
            assert_eq!(collection, Collection::Forms);
            assert!(!details.is_empty());
        }
        other => panic!("expected corrupt forms, got {other:?}"),
    }
}

#[test]
fn blank_file_reads_as_empty() {
    let root = TempRoot::new("blank");
    fs::create_dir_all(&root.0).expect("mkdir");
    fs::write(root.0.join("submissions.json"), "  \n").expect("write");
    let store = JsonFileStore::new(&root.0);
    assert!(store.list_submissions(None).expect("list").is_empty());
}

#[test]
fn submissions_and_templates_persist() {
    let root = TempRoot::new("subs");
    let mut store = JsonFileStore::new(&root.0);
    store.record_submission(submission("s1", "f1")).expect("record");
    store.record_submission(submission("s2", "f2")).expect("record");
    let reopened = JsonFileStore::new(&root.0);
    let f2 = reopened.list_submissions(Some("f2")).expect("list");
    assert_eq!(f2.len(), 1);
    assert_eq!(f2[0].id, "s2");

    let template = store
        .save_template(PdfTemplate::new("t1", "f1", "Report").with_default_blocks())
        .expect("save");
    let loaded = reopened.get_template("t1").expect("get").expect("present");
    assert_eq!(loaded, template);
    assert!(store.delete_template("t1").expect("delete"));
    assert!(!store.delete_template("t1").expect("delete again"));
}

#[test]
fn collection_schemas_describe_arrays() {
    for collection in [Collection::Forms, Collection::Submissions, Collection::Templates] {
        let schema = collection_schema(collection);
        assert_eq!(schema["type"], "array", "{collection}");
    }
}
