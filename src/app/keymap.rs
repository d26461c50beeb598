use std::sync::{Arc, LazyLock};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;
use thiserror::Error;

use super::input::KeyAction;

macro_rules! keymap_source {
    () => {
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/keymap/default.keymap.json"
        ))
    };
}

/// Which bindings apply: choice fields claim arrows, Space and Enter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeymapContext {
    Default,
    Choice,
}

impl KeymapContext {
    fn from_str(raw: &str) -> Option<Self> {
        match raw {
            "default" => Some(KeymapContext::Default),
            "choice" => Some(KeymapContext::Choice),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum KeymapError {
    #[error("keymap is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("keymap entry '{id}' declares no known context")]
    NoContext { id: String },
    #[error("keymap entry '{id}' declares no key combos")]
    NoCombos { id: String },
    #[error("failed to parse combo '{combo}' for {id}: {reason}")]
    Combo {
        id: String,
        combo: String,
        reason: String,
    },
}

#[derive(Deserialize)]
struct RawEntry {
    id: String,
    description: String,
    contexts: Vec<String>,
    action: RawAction,
    combos: Vec<String>,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum RawAction {
    Submit,
    Quit,
    Dismiss,
    FieldInput,
    FieldStep { delta: i32 },
    SectionStep { delta: i32 },
}

impl RawAction {
    fn into_action(self) -> KeyAction {
        match self {
            RawAction::Submit => KeyAction::Submit,
            RawAction::Quit => KeyAction::Quit,
            RawAction::Dismiss => KeyAction::Dismiss,
            RawAction::FieldInput => KeyAction::FieldInput,
            RawAction::FieldStep { delta } => KeyAction::FieldStep(delta),
            RawAction::SectionStep { delta } => KeyAction::SectionStep(delta),
        }
    }
}

#[derive(Debug)]
struct KeyBinding {
    action: KeyAction,
    contexts: Vec<KeymapContext>,
    combos: Vec<KeyPattern>,
    snippet: String,
}

impl KeyBinding {
    fn from_raw(raw: RawEntry) -> Result<Self, KeymapError> {
        let contexts = raw
            .contexts
            .iter()
            .filter_map(|ctx| KeymapContext::from_str(ctx))
            .collect::<Vec<_>>();
        if contexts.is_empty() {
            return Err(KeymapError::NoContext { id: raw.id });
        }
        let combos = raw
            .combos
            .iter()
            .map(|combo| {
                KeyPattern::parse(combo).map_err(|reason| KeymapError::Combo {
                    id: raw.id.clone(),
                    combo: combo.clone(),
                    reason,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if combos.is_empty() {
            return Err(KeymapError::NoCombos { id: raw.id });
        }
        let combos_display = combos
            .iter()
            .map(|pattern| pattern.display.as_str())
            .collect::<Vec<_>>()
            .join("/");
        Ok(Self {
            action: raw.action.into_action(),
            contexts,
            snippet: format!("{combos_display} -> {}", raw.description),
            combos,
        })
    }

    fn matches(&self, key: &KeyEvent) -> bool {
        self.combos.iter().any(|pattern| pattern.matches(key))
    }
}

#[derive(Debug)]
pub struct Keymap {
    bindings: Vec<KeyBinding>,
}

impl Keymap {
    pub fn from_json(source: &str) -> Result<Self, KeymapError> {
        let raw_entries: Vec<RawEntry> = serde_json::from_str(source)?;
        let bindings = raw_entries
            .into_iter()
            .map(KeyBinding::from_raw)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { bindings })
    }

    pub fn classify(&self, key: &KeyEvent, context: KeymapContext) -> Option<KeyAction> {
        self.bindings
            .iter()
            .filter(|binding| binding.contexts.contains(&context))
            .find(|binding| binding.matches(key))
            .map(|binding| binding.action)
    }

    pub fn help_text(&self, context: KeymapContext) -> Option<String> {
        let snippets = self
            .bindings
            .iter()
            .filter(|binding| binding.contexts.contains(&context))
            .map(|binding| binding.snippet.as_str())
            .collect::<Vec<_>>();
        if snippets.is_empty() {
            None
        } else {
            Some(snippets.join(" • "))
        }
    }
}

static DEFAULT_KEYMAP: LazyLock<Arc<Keymap>> = LazyLock::new(|| {
    Arc::new(
        Keymap::from_json(keymap_source!()).expect("embedded keymap/default.keymap.json is valid"),
    )
});

pub fn default_keymap() -> Arc<Keymap> {
    DEFAULT_KEYMAP.clone()
}

/// One combo such as `Ctrl+Shift+Tab`. Letters and BackTab also match when
/// the terminal reports an extra Shift.
#[derive(Debug)]
struct KeyPattern {
    key: PatternKey,
    modifiers: KeyModifiers,
    shift_optional: bool,
    display: String,
}

impl KeyPattern {
    fn parse(combo: &str) -> Result<Self, String> {
        let display = combo.trim().to_string();
        let mut parts = display.rsplit('+').map(str::trim);
        let key = match parts.next() {
            Some(token) if !token.is_empty() => PatternKey::parse(token)?,
            _ => return Err("combo must end with a key".into()),
        };
        let modifiers = parts.try_fold(KeyModifiers::empty(), |acc, token| {
            let modifier = match token.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "shift" => KeyModifiers::SHIFT,
                "alt" => KeyModifiers::ALT,
                other => return Err(format!("unsupported modifier '{other}'")),
            };
            Ok(acc | modifier)
        })?;
        Ok(Self {
            shift_optional: key.tolerates_shift() && !modifiers.contains(KeyModifiers::SHIFT),
            key,
            modifiers,
            display,
        })
    }

    fn matches(&self, event: &KeyEvent) -> bool {
        if !self.key.matches(event.code) {
            return false;
        }
        let mut pressed = event.modifiers;
        if self.shift_optional {
            pressed.remove(KeyModifiers::SHIFT);
        }
        pressed == self.modifiers
    }
}

#[derive(Debug, Clone, Copy)]
enum PatternKey {
    Code(KeyCode),
    Letter(char),
}

impl PatternKey {
    fn parse(token: &str) -> Result<Self, String> {
        let code = match token.to_ascii_lowercase().as_str() {
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "enter" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "space" => KeyCode::Char(' '),
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            lowered => {
                let mut chars = lowered.chars();
                return match (chars.next(), chars.next()) {
                    (Some(letter), None) => Ok(PatternKey::Letter(letter)),
                    _ => Err(format!("unsupported key '{token}'")),
                };
            }
        };
        Ok(PatternKey::Code(code))
    }

    fn matches(self, code: KeyCode) -> bool {
        match (self, code) {
            (PatternKey::Code(expected), actual) => expected == actual,
            (PatternKey::Letter(expected), KeyCode::Char(actual)) => {
                actual.to_ascii_lowercase() == expected
            }
            (PatternKey::Letter(_), _) => false,
        }
    }

    fn tolerates_shift(self) -> bool {
        matches!(
            self,
            PatternKey::Letter(_) | PatternKey::Code(KeyCode::BackTab)
        )
    }
}
