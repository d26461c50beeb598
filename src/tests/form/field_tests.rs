use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    domain::{AnswerValue, FieldType, FormField},
    form::{ControlKind, FieldState, KeyOutcome, is_valid_date},
};

fn state(field_type: FieldType, options: &[&str]) -> FieldState {
    let field = FormField {
        id: "q".into(),
        field_type,
        label: "Question".into(),
        required: false,
        options: field_type
            .is_choice()
            .then(|| options.iter().map(|option| option.to_string()).collect()),
        placeholder: None,
        order: 0,
        section_id: None,
    };
    FieldState::from_field(&field).expect("input field")
}

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn text(value: &str) -> AnswerValue {
    AnswerValue::Text(value.into())
}

/// Feeds each key, threading the value through like the fill state does.
fn type_keys(field: &mut FieldState, start: AnswerValue, keys: &[KeyCode]) -> AnswerValue {
    keys.iter().fold(start, |value, code| {
        match field.handle_key(&press(*code), &value) {
            KeyOutcome::Changed(next) => next,
            _ => value,
        }
    })
}

#[test]
fn sections_have_no_control() {
    assert_eq!(ControlKind::for_type(FieldType::Section), None);
    let section = FormField {
        id: "s".into(),
        field_type: FieldType::Section,
        label: "Section".into(),
        required: false,
        options: None,
        placeholder: None,
        order: 0,
        section_id: None,
    };
    assert!(FieldState::from_field(&section).is_none());
}

#[test]
fn single_line_appends_and_deletes() {
    let mut field = state(FieldType::Text, &[]);
    let value = type_keys(
        &mut field,
        text(""),
        &[KeyCode::Char('h'), KeyCode::Char('i'), KeyCode::Char('!'), KeyCode::Backspace],
    );
    assert_eq!(value, text("hi"));
    assert_eq!(field.handle_key(&press(KeyCode::Enter), &value), KeyOutcome::Ignored);
    assert_eq!(
        field.handle_key(&press(KeyCode::Delete), &value),
        KeyOutcome::Changed(text(""))
    );
    assert_eq!(field.handle_key(&press(KeyCode::Backspace), &text("")), KeyOutcome::Ignored);
}

#[test]
fn multi_line_accepts_newlines() {
    let mut field = state(FieldType::Longtext, &[]);
    let value = type_keys(
        &mut field,
        text("a"),
        &[KeyCode::Enter, KeyCode::Char('b')],
    );
    assert_eq!(value, text("a\nb"));
}

#[test]
fn control_chords_are_left_alone() {
    let mut field = state(FieldType::Text, &[]);
    let chord = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
    assert_eq!(field.handle_key(&chord, &text("")), KeyOutcome::Ignored);
}

#[test]
fn numbers_filter_characters() {
    let mut field = state(FieldType::Number, &[]);
    let value = type_keys(
        &mut field,
        text(""),
        &[
            KeyCode::Char('-'),
            KeyCode::Char('1'),
            KeyCode::Char('a'),
            KeyCode::Char('.'),
            KeyCode::Char('5'),
            KeyCode::Char('.'),
            KeyCode::Char('-'),
        ],
    );
    assert_eq!(value, text("-1.5"));
}

#[test]
fn dates_step_by_day_and_cap_length() {
    let mut field = state(FieldType::Date, &[]);
    assert_eq!(
        field.handle_key(&press(KeyCode::Right), &text("2024-02-28")),
        KeyOutcome::Changed(text("2024-02-29"))
    );
    assert_eq!(
        field.handle_key(&press(KeyCode::Left), &text("2024-03-01")),
        KeyOutcome::Changed(text("2024-02-29"))
    );
    assert_eq!(field.handle_key(&press(KeyCode::Right), &text("2024-1")), KeyOutcome::Ignored);
    assert_eq!(
        field.handle_key(&press(KeyCode::Char('9')), &text("2024-01-01")),
        KeyOutcome::Ignored
    );
    assert_eq!(field.handle_key(&press(KeyCode::Char('x')), &text("")), KeyOutcome::Ignored);
    let stepped = field.handle_key(&press(KeyCode::Right), &text(""));
    match stepped {
        KeyOutcome::Changed(AnswerValue::Text(date)) => assert!(is_valid_date(&date)),
        other => panic!("expected a date, got {other:?}"),
    }
}

#[test]
fn single_choice_moves_and_replaces() {
    let mut field = state(FieldType::Select, &["A", "B"]);
    assert_eq!(field.handle_key(&press(KeyCode::Right), &text("")), KeyOutcome::Moved);
    assert_eq!(field.highlighted(), 1);
    assert_eq!(
        field.handle_key(&press(KeyCode::Char(' ')), &text("A")),
        KeyOutcome::Changed(text("B"))
    );
    assert_eq!(field.handle_key(&press(KeyCode::Right), &text("")), KeyOutcome::Moved);
    assert_eq!(field.highlighted(), 0);
    assert_eq!(field.handle_key(&press(KeyCode::Char('x')), &text("")), KeyOutcome::Ignored);
}

#[test]
fn multi_choice_toggles() {
    let mut field = state(FieldType::Checkbox, &["X", "Y"]);
    let empty = AnswerValue::Choices(Vec::new());
    let picked = field.handle_key(&press(KeyCode::Enter), &empty);
    assert_eq!(
        picked,
        KeyOutcome::Changed(AnswerValue::Choices(vec!["X".into()]))
    );
    let current = AnswerValue::Choices(vec!["X".into()]);
    assert_eq!(
        field.handle_key(&press(KeyCode::Char(' ')), &current),
        KeyOutcome::Changed(empty)
    );
}

#[test]
fn choice_without_options_ignores_keys() {
    let mut field = state(FieldType::Select, &[]);
    assert_eq!(field.handle_key(&press(KeyCode::Right), &text("")), KeyOutcome::Ignored);
    assert_eq!(field.handle_key(&press(KeyCode::Enter), &text("")), KeyOutcome::Ignored);
}
