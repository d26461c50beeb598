use std::sync::Arc;

use crossterm::event::KeyEvent;

use crate::form::FillCommand;

use super::keymap::{Keymap, KeymapContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Submit,
    Quit,
    Dismiss,
    FieldInput,
    FieldStep(i32),
    SectionStep(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    Submit,
    Quit,
    Dismiss,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandDispatch {
    Form(FillCommand),
    App(AppCommand),
    Input(KeyEvent),
}

impl From<(KeyAction, KeyEvent)> for CommandDispatch {
    fn from((action, key): (KeyAction, KeyEvent)) -> Self {
        match action {
            KeyAction::Submit => CommandDispatch::App(AppCommand::Submit),
            KeyAction::Quit => CommandDispatch::App(AppCommand::Quit),
            KeyAction::Dismiss => CommandDispatch::App(AppCommand::Dismiss),
            KeyAction::FieldInput => CommandDispatch::Input(key),
            KeyAction::FieldStep(delta) if delta < 0 => {
                CommandDispatch::Form(FillCommand::FocusPrevField)
            }
            KeyAction::FieldStep(_) => CommandDispatch::Form(FillCommand::FocusNextField),
            KeyAction::SectionStep(delta) => {
                CommandDispatch::Form(FillCommand::FocusNextSection(delta))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct InputRouter {
    keymap: Arc<Keymap>,
}

impl InputRouter {
    pub fn new(keymap: Arc<Keymap>) -> Self {
        Self { keymap }
    }

    pub fn classify(&self, key: &KeyEvent, context: KeymapContext) -> CommandDispatch {
        match self.keymap.classify(key, context) {
            Some(action) => CommandDispatch::from((action, *key)),
            None => CommandDispatch::Input(*key),
        }
    }

    pub fn help_text(&self, context: KeymapContext) -> Option<String> {
        self.keymap.help_text(context)
    }
}
