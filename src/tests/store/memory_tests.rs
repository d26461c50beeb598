use crate::{
    domain::{FieldType, FormDraft, FormStatus, NEW_FORM_ID, PdfTemplate},
    store::{
        FormRepository, MemoryStore, StoreError, SubmissionRepository, TemplateRepository,
    },
};

use super::submission;

#[test]
fn new_drafts_are_appended_with_fresh_ids() {
    let mut store = MemoryStore::new();
    let first = store.save_form(FormDraft::new().with_title("A")).expect("save");
    let mut draft = FormDraft::new().with_title("B");
    draft.id = Some(NEW_FORM_ID.to_string());
    let second = store.save_form(draft).expect("save");
    assert_ne!(first.id, second.id);
    assert_ne!(second.id, NEW_FORM_ID);
    let titles = store
        .list_forms()
        .expect("list")
        .into_iter()
        .map(|form| form.title)
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["A", "B"]);
}

#[test]
fn saving_an_existing_form_keeps_created_at() {
    let mut store = MemoryStore::new();
    let saved = store.save_form(FormDraft::new().with_title("Intake")).expect("save");
    let mut draft = FormDraft::from_form(&saved);
    draft.title = "Intake v2".into();
    draft.status = FormStatus::Archived;
    draft.add_field(FieldType::Date, None);
    let updated = store.save_form(draft).expect("overwrite");
    assert_eq!(updated.id, saved.id);
    assert_eq!(updated.created_at, saved.created_at);
    let forms = store.list_forms().expect("list");
    assert_eq!(forms.len(), 1);
    assert_eq!(forms[0].title, "Intake v2");
    assert_eq!(forms[0].fields.len(), 1);
}

#[test]
fn saving_an_unknown_id_fails() {
    let mut store = MemoryStore::new();
    let mut draft = FormDraft::new();
    draft.id = Some("missing".into());
    let err = store.save_form(draft).expect_err("unknown id");
    assert!(matches!(err, StoreError::NotFound { id, .. } if id == "missing"));
}

#[test]
fn delete_reports_removal() {
    let mut store = MemoryStore::new();
    let saved = store.save_form(FormDraft::new()).expect("save");
    assert!(store.delete_form(&saved.id).expect("delete"));
    assert!(!store.delete_form(&saved.id).expect("delete again"));
    assert_eq!(store.get_form(&saved.id).expect("get"), None);
}

#[test]
fn submissions_filter_by_form() {
    let mut store = MemoryStore::new();
    store.record_submission(submission("s1", "f1")).expect("record");
    store.record_submission(submission("s2", "f2")).expect("record");
    store.record_submission(submission("s3", "f1")).expect("record");
    let ids = |form: Option<&str>| {
        store
            .list_submissions(form)
            .expect("list")
            .into_iter()
            .map(|submission| submission.id)
            .collect::<Vec<_>>()
    };
    assert_eq!(ids(Some("f1")), vec!["s1", "s3"]);
    assert_eq!(ids(None), vec!["s1", "s2", "s3"]);
    assert_eq!(ids(Some("zz")), Vec::<String>::new());
    assert_eq!(
        store.get_submission("s2").expect("get").map(|found| found.form_id),
        Some("f2".to_string())
    );
}

#[test]
fn templates_upsert_by_id() {
    let mut store = MemoryStore::new();
    let created = store
        .save_template(PdfTemplate::new("", "f1", "Report").with_default_blocks())
        .expect("save");
    assert!(!created.id.is_empty());
    let mut renamed = created.clone();
    renamed.name = "Summary".into();
    store.save_template(renamed).expect("update");
    let templates = store.list_templates().expect("list");
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0].name, "Summary");
    assert!(store.delete_template(&created.id).expect("delete"));
    assert!(store.get_template(&created.id).expect("get").is_none());
}
