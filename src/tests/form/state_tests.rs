use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    domain::{AnswerValue, FieldPatch, FieldType, Form, FormDraft, RenderMode},
    form::{FillCommand, FillState, KeyOutcome, apply_command},
};

fn press(state: &mut FillState, code: KeyCode) -> KeyOutcome {
    state.handle_key(&KeyEvent::new(code, KeyModifiers::NONE))
}

fn choice_form(field_type: FieldType, options: &[&str]) -> (Form, String) {
    let mut draft = FormDraft::new().with_title("Choices");
    let id = draft.add_field(field_type, None);
    let options = options.iter().map(|option| option.to_string()).collect();
    draft
        .update_field(&id, FieldPatch::new().with_label("Pick").with_options(options))
        .expect("update");
    (draft.into_form("f1".into(), 0), id)
}

/// One orphan, then sections A (one field), B (empty), C (one field).
fn sectioned_form() -> Form {
    let mut draft = FormDraft::new().with_title("Sections");
    let a = draft.add_field(FieldType::Section, None);
    draft.add_field(FieldType::Section, None);
    let c = draft.add_field(FieldType::Section, None);
    draft.add_field(FieldType::Text, Some(a.as_str()));
    draft.add_field(FieldType::Text, Some(c.as_str()));
    draft.add_field(FieldType::Number, None);
    draft.into_form("f1".into(), 0)
}

#[test]
fn field_focus_wraps_both_ways() {
    let mut state = FillState::new(sectioned_form(), RenderMode::Public);
    assert_eq!(state.fields().len(), 3);
    state.focus_prev_field();
    assert_eq!(state.focus_index(), 2);
    state.focus_next_field();
    assert_eq!(state.focus_index(), 0);
    apply_command(&mut state, FillCommand::FocusNextField);
    assert_eq!(state.focus_index(), 1);
    apply_command(&mut state, FillCommand::FocusPrevField);
    assert_eq!(state.focus_index(), 0);
}

#[test]
fn internal_order_puts_orphans_first() {
    let state = FillState::new(sectioned_form(), RenderMode::Internal);
    let kinds = state
        .fields()
        .iter()
        .map(|field| field.field.field_type)
        .collect::<Vec<_>>();
    assert_eq!(kinds, vec![FieldType::Number, FieldType::Text, FieldType::Text]);
    assert_eq!(state.groups().len(), 4);
    assert!(state.groups()[2].is_empty());
}

#[test]
fn section_steps_skip_empty_sections() {
    let mut state = FillState::new(sectioned_form(), RenderMode::Internal);
    state.focus_next_section(1);
    assert_eq!(state.focus_index(), 1);
    apply_command(&mut state, FillCommand::FocusNextSection(1));
    assert_eq!(state.focus_index(), 2);
    assert_eq!(
        state.focused_group().and_then(|group| group.title.clone()),
        Some("Section title".to_string())
    );
    state.focus_next_section(1);
    assert_eq!(state.focus_index(), 0);
    state.focus_next_section(-1);
    assert_eq!(state.focus_index(), 2);
}

#[test]
fn focus_field_by_id() {
    let (form, id) = choice_form(FieldType::Select, &["A"]);
    let mut state = FillState::new(form, RenderMode::Public);
    assert!(state.focus_field(&id));
    assert!(!state.focus_field("missing"));
}

#[test]
fn select_right_then_space_picks_second_option() {
    let (form, id) = choice_form(FieldType::Select, &["A", "B"]);
    let mut state = FillState::new(form, RenderMode::Public);
    assert!(!state.is_dirty());
    assert_eq!(press(&mut state, KeyCode::Right), KeyOutcome::Moved);
    assert!(!state.is_dirty());
    press(&mut state, KeyCode::Char(' '));
    assert_eq!(state.answers().get(&id), Some(&AnswerValue::Text("B".into())));
    assert!(state.is_dirty());
}

#[test]
fn checkbox_keys_toggle_in_selection_order() {
    let (form, id) = choice_form(FieldType::Checkbox, &["X", "Y"]);
    let mut state = FillState::new(form, RenderMode::Public);
    press(&mut state, KeyCode::Char(' '));
    press(&mut state, KeyCode::Right);
    press(&mut state, KeyCode::Char(' '));
    assert_eq!(
        state.value_of(&id),
        AnswerValue::Choices(vec!["X".into(), "Y".into()])
    );
    press(&mut state, KeyCode::Left);
    press(&mut state, KeyCode::Char(' '));
    assert_eq!(state.value_of(&id), AnswerValue::Choices(vec!["Y".into()]));
}

#[test]
fn direct_answer_setters_mark_dirty() {
    let (form, id) = choice_form(FieldType::Checkbox, &["X", "Y"]);
    let mut state = FillState::new(form, RenderMode::Internal);
    state.toggle_option(&id, "Y");
    assert!(state.is_dirty());
    state.mark_clean();
    assert!(!state.is_dirty());
    assert_eq!(state.clone().into_answers().len(), 1);
}

#[test]
fn empty_form_ignores_navigation() {
    let form = FormDraft::new().into_form("f1".into(), 0);
    let mut state = FillState::new(form, RenderMode::Internal);
    state.focus_next_field();
    state.focus_next_section(1);
    assert_eq!(state.focus_index(), 0);
    assert!(state.focused_field().is_none());
    assert_eq!(press(&mut state, KeyCode::Char('a')), KeyOutcome::Ignored);
}
