use std::fs;

use crate::{
    domain::{AnswerValue, FieldPatch, FieldType, FormCategory, FormDraft, RenderMode},
    form::{FillSession, FormError, SubmissionPhase},
    store::{FormRepository, JsonFileStore, MemoryStore, SubmissionRepository},
};

fn store_with_form(required: bool) -> (MemoryStore, String, String) {
    let mut draft = FormDraft::new()
        .with_title("Feedback")
        .with_category(FormCategory::Public);
    let field = draft.add_field(FieldType::Text, None);
    draft
        .update_field(
            &field,
            FieldPatch::new().with_label("Name").with_required(required),
        )
        .expect("update");
    let mut store = MemoryStore::new();
    let form = store.save_form(draft).expect("save");
    (store, form.id, field)
}

fn temp_root(tag: &str) -> std::path::PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    std::env::temp_dir().join(format!("reportflow-{tag}-{nanos}"))
}

#[test]
fn unknown_form_is_not_found() {
    let store = MemoryStore::new();
    let mut session = FillSession::new("nope", RenderMode::Public);
    assert_eq!(session.phase(), &SubmissionPhase::Loading);
    let err = session.load(&store).expect_err("missing form");
    assert!(matches!(err, FormError::NotFound(id) if id == "nope"));
    assert_eq!(
        session.phase(),
        &SubmissionPhase::NotFound {
            form_id: "nope".into()
        }
    );
    assert!(session.state().is_none());
}

#[test]
fn corrupt_store_fails_the_load() {
    let root = temp_root("corrupt");
    fs::create_dir_all(&root).expect("mkdir");
    fs::write(root.join("forms.json"), "{ not json").expect("write");
    let store = JsonFileStore::new(&root);
    let mut session = FillSession::new("f1", RenderMode::Internal);
    let err = session.load(&store).expect_err("corrupt");
    assert!(matches!(err, FormError::StorageCorrupt(_)));
    assert!(matches!(session.phase(), SubmissionPhase::Failed { .. }));
    fs::remove_dir_all(&root).ok();
}

#[test]
fn submit_records_answers_with_client() {
    let (mut store, form_id, field) = store_with_form(false);
    let mut session = FillSession::open(&store, &form_id, RenderMode::Internal)
        .with_client_id("c1")
        .with_client_name("Ada");
    assert_eq!(session.phase(), &SubmissionPhase::Ready);
    session
        .state_mut()
        .expect("state")
        .set_answer(&field, AnswerValue::Text("Ada L.".into()));

    let submission = session.submit(&mut store).expect("submit").clone();
    assert_eq!(submission.form_id, form_id);
    assert_eq!(submission.client_id.as_deref(), Some("c1"));
    assert_eq!(submission.client_name.as_deref(), Some("Ada"));
    assert_eq!(
        session.phase(),
        &SubmissionPhase::Submitted {
            submission_id: submission.id.clone()
        }
    );
    assert!(!session.state().expect("state").is_dirty());
    let stored = store.list_submissions(Some(form_id.as_str())).expect("list");
    assert_eq!(stored, vec![submission]);
}

#[test]
fn blank_client_name_is_dropped() {
    let session = FillSession::new("f1", RenderMode::Internal).with_client_name("   ");
    assert_eq!(session.client_name(), None);
}

#[test]
fn cancel_returns_to_ready_without_recording() {
    let (store, form_id, _) = store_with_form(false);
    let mut session = FillSession::open(&store, &form_id, RenderMode::Public);
    session.begin_submit().expect("begin");
    assert_eq!(session.phase(), &SubmissionPhase::Submitting);
    assert!(session.cancel_submit());
    assert_eq!(session.phase(), &SubmissionPhase::Ready);
    assert!(!session.cancel_submit());
    assert!(store.list_submissions(None).expect("list").is_empty());
}

#[test]
fn public_submit_requires_answers() {
    let (mut store, form_id, field) = store_with_form(true);
    let mut session = FillSession::open(&store, &form_id, RenderMode::Public);
    let err = session.begin_submit().expect_err("required");
    match err {
        FormError::ValidationFailed { missing } => assert_eq!(missing, vec!["Name"]),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(session.phase(), &SubmissionPhase::Ready);

    session
        .state_mut()
        .expect("state")
        .set_answer(&field, AnswerValue::Text("Grace".into()));
    session.submit(&mut store).expect("submit");
}

#[test]
fn session_capture_never_blocks_on_required() {
    let (mut store, form_id, _) = store_with_form(true);
    let mut session = FillSession::open(&store, &form_id, RenderMode::Internal);
    session.submit(&mut store).expect("submit");
    assert!(matches!(session.phase(), SubmissionPhase::Submitted { .. }));
}

#[test]
fn out_of_order_transitions_are_rejected() {
    let (mut store, form_id, _) = store_with_form(false);
    let mut session = FillSession::open(&store, &form_id, RenderMode::Internal);
    let err = session.complete_submit(&mut store).expect_err("not submitting");
    assert!(matches!(err, FormError::InvalidTransition { phase: "ready", .. }));

    let mut missing = FillSession::open(&store, "nope", RenderMode::Public);
    let err = missing.begin_submit().expect_err("not found");
    assert!(matches!(err, FormError::InvalidTransition { phase: "not found", .. }));

    session.submit(&mut store).expect("submit");
    let err = session.begin_submit().expect_err("already submitted");
    assert!(matches!(err, FormError::InvalidTransition { phase: "submitted", .. }));
}
