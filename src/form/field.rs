use chrono::{Days, Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::domain::{AnswerValue, FieldType, FormField};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    SingleLine,
    MultiLine,
    Numeric,
    DatePicker,
    SingleChoice,
    MultiChoice,
}

impl ControlKind {
    /// `None` for sections, which are containers and never inputs.
    pub fn for_type(field_type: FieldType) -> Option<Self> {
        match field_type {
            FieldType::Text => Some(ControlKind::SingleLine),
            FieldType::Longtext => Some(ControlKind::MultiLine),
            FieldType::Number => Some(ControlKind::Numeric),
            FieldType::Date => Some(ControlKind::DatePicker),
            FieldType::Select => Some(ControlKind::SingleChoice),
            FieldType::Checkbox => Some(ControlKind::MultiChoice),
            FieldType::Section => None,
        }
    }

    pub fn is_choice(self) -> bool {
        matches!(self, ControlKind::SingleChoice | ControlKind::MultiChoice)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    /// Consumed without touching the value, e.g. moving a choice highlight.
    Moved,
    Changed(AnswerValue),
}

/// Interactive state of one input field. The answer itself lives in the
/// answer set; edits are returned as the replacement value.
#[derive(Debug, Clone)]
pub struct FieldState {
    pub field: FormField,
    pub control: ControlKind,
    highlighted: usize,
}

impl FieldState {
    pub fn from_field(field: &FormField) -> Option<Self> {
        let control = ControlKind::for_type(field.field_type)?;
        Some(Self {
            field: field.clone(),
            control,
            highlighted: 0,
        })
    }

    pub fn id(&self) -> &str {
        &self.field.id
    }

    pub fn options(&self) -> &[String] {
        self.field.choices()
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn highlight(&mut self, index: usize) {
        let len = self.options().len();
        if len > 0 {
            self.highlighted = index.min(len - 1);
        }
    }

    fn step_highlight(&mut self, delta: isize) -> KeyOutcome {
        let len = self.options().len();
        if len == 0 {
            return KeyOutcome::Ignored;
        }
        self.highlighted = (self.highlighted as isize + delta).rem_euclid(len as isize) as usize;
        KeyOutcome::Moved
    }

    /// Applies the highlighted option: replaces a single choice, toggles a
    /// multi choice.
    pub fn activate(&self, current: &AnswerValue) -> KeyOutcome {
        let Some(option) = self.options().get(self.highlighted) else {
            return KeyOutcome::Ignored;
        };
        match self.control {
            ControlKind::SingleChoice => KeyOutcome::Changed(AnswerValue::Text(option.clone())),
            ControlKind::MultiChoice => KeyOutcome::Changed(current.toggled(option)),
            _ => KeyOutcome::Ignored,
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent, current: &AnswerValue) -> KeyOutcome {
        if self.control.is_choice() {
            return match key.code {
                KeyCode::Left => self.step_highlight(-1),
                KeyCode::Right => self.step_highlight(1),
                KeyCode::Char(' ') | KeyCode::Enter => self.activate(current),
                _ => KeyOutcome::Ignored,
            };
        }

        let mut buffer = current.as_text().unwrap_or_default().to_string();
        let changed = match key.code {
            KeyCode::Char(c) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return KeyOutcome::Ignored;
                }
                self.accept_char(&mut buffer, c)
            }
            KeyCode::Enter if self.control == ControlKind::MultiLine => {
                buffer.push('\n');
                true
            }
            KeyCode::Backspace => buffer.pop().is_some(),
            KeyCode::Delete => {
                let had_content = !buffer.is_empty();
                buffer.clear();
                had_content
            }
            KeyCode::Left if self.control == ControlKind::DatePicker => {
                step_date(&mut buffer, -1)
            }
            KeyCode::Right if self.control == ControlKind::DatePicker => {
                step_date(&mut buffer, 1)
            }
            _ => return KeyOutcome::Ignored,
        };
        if changed {
            KeyOutcome::Changed(AnswerValue::Text(buffer))
        } else {
            KeyOutcome::Ignored
        }
    }

    fn accept_char(&self, buffer: &mut String, c: char) -> bool {
        let accepted = match self.control {
            ControlKind::SingleLine | ControlKind::MultiLine => true,
            ControlKind::Numeric => {
                c.is_ascii_digit()
                    || (c == '-' && buffer.is_empty())
                    || (c == '.' && !buffer.contains('.'))
            }
            ControlKind::DatePicker => {
                (c.is_ascii_digit() || c == '-') && buffer.chars().count() < DATE_LEN
            }
            ControlKind::SingleChoice | ControlKind::MultiChoice => false,
        };
        if accepted {
            buffer.push(c);
        }
        accepted
    }
}

/// Moves an ISO date by `days`. An empty buffer starts from today; a partial
/// or invalid date is left alone.
fn step_date(buffer: &mut String, days: i64) -> bool {
    let current = if buffer.trim().is_empty() {
        Local::now().date_naive()
    } else {
        match NaiveDate::parse_from_str(buffer.trim(), DATE_FORMAT) {
            Ok(date) => date,
            Err(_) => return false,
        }
    };
    let shifted = if days >= 0 {
        current.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        current.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    match shifted {
        Some(date) => {
            *buffer = date.format(DATE_FORMAT).to_string();
            true
        }
        None => false,
    }
}

pub fn is_valid_date(text: &str) -> bool {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).is_ok()
}
