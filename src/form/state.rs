use crossterm::event::KeyEvent;

use crate::domain::{AnswerSet, AnswerValue, Form, FormField, FormLayout, RenderMode};

use super::{
    field::{FieldState, KeyOutcome},
    section::FieldGroup,
};

#[derive(Debug, Clone)]
pub struct FillState {
    form: Form,
    mode: RenderMode,
    fields: Vec<FieldState>,
    groups: Vec<FieldGroup>,
    answers: AnswerSet,
    focus: usize,
    dirty: bool,
}

impl FillState {
    pub fn new(form: Form, mode: RenderMode) -> Self {
        let layout = FormLayout::build(&form, mode);
        let groups = FieldGroup::collect(&layout);
        let fields = layout
            .ordered_fields()
            .into_iter()
            .filter_map(FieldState::from_field)
            .collect();
        let answers = AnswerSet::for_form(&form);
        Self {
            form,
            mode,
            fields,
            groups,
            answers,
            focus: 0,
            dirty: false,
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn fields(&self) -> &[FieldState] {
        &self.fields
    }

    pub fn groups(&self) -> &[FieldGroup] {
        &self.groups
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn into_answers(self) -> AnswerSet {
        self.answers
    }

    pub fn focus_index(&self) -> usize {
        self.focus
    }

    pub fn focused_field(&self) -> Option<&FieldState> {
        self.fields.get(self.focus)
    }

    pub fn focused_group(&self) -> Option<&FieldGroup> {
        self.groups.iter().find(|group| group.contains(self.focus))
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Current answer for `id`, or the blank value its type starts with.
    pub fn value_of(&self, id: &str) -> AnswerValue {
        if let Some(value) = self.answers.get(id) {
            return value.clone();
        }
        self.form
            .field(id)
            .map(|field| AnswerValue::empty_for(field.field_type))
            .unwrap_or_else(|| AnswerValue::Text(String::new()))
    }

    pub fn set_answer(&mut self, id: &str, value: AnswerValue) {
        self.answers.set(id, value);
        self.dirty = true;
    }

    pub fn select_option(&mut self, id: &str, option: &str) {
        self.answers.select(id, option);
        self.dirty = true;
    }

    pub fn toggle_option(&mut self, id: &str, option: &str) {
        self.answers.toggle(id, option);
        self.dirty = true;
    }

    pub fn missing_required(&self) -> Vec<&FormField> {
        self.answers.missing_required(&self.form)
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> KeyOutcome {
        let Some(field) = self.fields.get_mut(self.focus) else {
            return KeyOutcome::Ignored;
        };
        let current = self
            .answers
            .get(&field.field.id)
            .cloned()
            .unwrap_or_else(|| AnswerValue::empty_for(field.field.field_type));
        let outcome = field.handle_key(key, &current);
        if let KeyOutcome::Changed(value) = &outcome {
            let id = field.field.id.clone();
            self.set_answer(&id, value.clone());
        }
        outcome
    }

    pub fn set_focus(&mut self, index: usize) {
        if index < self.fields.len() {
            self.focus = index;
        }
    }

    pub fn focus_field(&mut self, id: &str) -> bool {
        match self.fields.iter().position(|field| field.id() == id) {
            Some(index) => {
                self.focus = index;
                true
            }
            None => false,
        }
    }

    pub fn focus_next_field(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn focus_prev_field(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = if self.focus == 0 {
            self.fields.len() - 1
        } else {
            self.focus - 1
        };
    }

    /// Jumps to the first field of the next (or previous) non-empty group.
    pub fn focus_next_section(&mut self, delta: i32) {
        let populated = self
            .groups
            .iter()
            .filter(|group| !group.is_empty())
            .collect::<Vec<_>>();
        if populated.is_empty() {
            return;
        }
        let current = populated
            .iter()
            .position(|group| group.contains(self.focus))
            .unwrap_or(0) as i64;
        let len = populated.len() as i64;
        let next = (current + i64::from(delta)).rem_euclid(len) as usize;
        self.focus = populated[next].start;
    }
}
