use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    app::{AppCommand, CommandDispatch, InputRouter, Keymap, KeymapContext, default_keymap},
    form::FillCommand,
};

fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

fn router() -> InputRouter {
    InputRouter::new(default_keymap())
}

#[test]
fn ctrl_s_submits_from_any_field() {
    let router = router();
    let save = key(KeyCode::Char('s'), KeyModifiers::CONTROL);
    for context in [KeymapContext::Default, KeymapContext::Choice] {
        assert_eq!(
            router.classify(&save, context),
            CommandDispatch::App(AppCommand::Submit)
        );
    }
}

#[test]
fn quit_and_dismiss_bindings() {
    let router = router();
    for code in [KeyCode::Char('q'), KeyCode::Char('c')] {
        assert_eq!(
            router.classify(&key(code, KeyModifiers::CONTROL), KeymapContext::Default),
            CommandDispatch::App(AppCommand::Quit)
        );
    }
    assert_eq!(
        router.classify(&key(KeyCode::Esc, KeyModifiers::NONE), KeymapContext::Choice),
        CommandDispatch::App(AppCommand::Dismiss)
    );
}

#[test]
fn tab_and_arrows_move_between_fields() {
    let router = router();
    let cases = [
        (key(KeyCode::Tab, KeyModifiers::NONE), FillCommand::FocusNextField),
        (key(KeyCode::Down, KeyModifiers::NONE), FillCommand::FocusNextField),
        (key(KeyCode::BackTab, KeyModifiers::SHIFT), FillCommand::FocusPrevField),
        (key(KeyCode::Up, KeyModifiers::NONE), FillCommand::FocusPrevField),
    ];
    for (event, expected) in cases {
        assert_eq!(
            router.classify(&event, KeymapContext::Default),
            CommandDispatch::Form(expected)
        );
    }
}

#[test]
fn section_jumps() {
    let router = router();
    assert_eq!(
        router.classify(&key(KeyCode::PageDown, KeyModifiers::NONE), KeymapContext::Default),
        CommandDispatch::Form(FillCommand::FocusNextSection(1))
    );
    assert_eq!(
        router.classify(&key(KeyCode::Char('p'), KeyModifiers::CONTROL), KeymapContext::Choice),
        CommandDispatch::Form(FillCommand::FocusNextSection(-1))
    );
}

#[test]
fn typing_goes_to_the_field() {
    let router = router();
    let letter = key(KeyCode::Char('a'), KeyModifiers::NONE);
    assert_eq!(
        router.classify(&letter, KeymapContext::Default),
        CommandDispatch::Input(letter)
    );
    let shifted = key(KeyCode::Char('A'), KeyModifiers::SHIFT);
    assert_eq!(
        router.classify(&shifted, KeymapContext::Default),
        CommandDispatch::Input(shifted)
    );
}

#[test]
fn choice_context_routes_arrows_to_the_field() {
    let router = router();
    let right = key(KeyCode::Right, KeyModifiers::NONE);
    assert_eq!(
        router.classify(&right, KeymapContext::Choice),
        CommandDispatch::Input(right)
    );
    let enter = key(KeyCode::Enter, KeyModifiers::NONE);
    assert_eq!(
        router.classify(&enter, KeymapContext::Choice),
        CommandDispatch::Input(enter)
    );
}

#[test]
fn custom_keymap_replaces_defaults() {
    let source = r#"[
        {"id":"form.submit","description":"send","contexts":["default","choice"],
         "action":{"kind":"submit"},"combos":["Alt+Enter"]}
    ]"#;
    let keymap = Keymap::from_json(source).expect("keymap");
    let router = InputRouter::new(std::sync::Arc::new(keymap));
    let send = key(KeyCode::Enter, KeyModifiers::ALT);
    assert_eq!(
        router.classify(&send, KeymapContext::Default),
        CommandDispatch::App(AppCommand::Submit)
    );
    let save = key(KeyCode::Char('s'), KeyModifiers::CONTROL);
    assert_eq!(
        router.classify(&save, KeymapContext::Default),
        CommandDispatch::Input(save)
    );
    assert_eq!(
        router.help_text(KeymapContext::Choice).as_deref(),
        Some("Alt+Enter -> send")
    );
}
