use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::schema::{FieldType, Form, FormField};

/// Value captured for one field. Checkbox answers are always list valued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Choices(Vec<String>),
}

impl AnswerValue {
    pub fn empty_for(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Checkbox => AnswerValue::Choices(Vec::new()),
            _ => AnswerValue::Text(String::new()),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            AnswerValue::Text(text) => text.trim().is_empty(),
            AnswerValue::Choices(items) => items.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(text) => Some(text),
            AnswerValue::Choices(_) => None,
        }
    }

    pub fn as_choices(&self) -> Option<&[String]> {
        match self {
            AnswerValue::Choices(items) => Some(items),
            AnswerValue::Text(_) => None,
        }
    }

    /// Returns the list with `option` added, or removed when it was present.
    pub fn toggled(&self, option: &str) -> AnswerValue {
        let mut items = self.as_choices().map(<[String]>::to_vec).unwrap_or_default();
        if let Some(index) = items.iter().position(|item| item == option) {
            items.remove(index);
        } else {
            items.push(option.to_string());
        }
        AnswerValue::Choices(items)
    }

    pub fn display(&self) -> String {
        match self {
            AnswerValue::Text(text) => text.clone(),
            AnswerValue::Choices(items) => items.join(", "),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct AnswerSet(IndexMap<String, AnswerValue>);

impl AnswerSet {
    pub fn for_form(form: &Form) -> Self {
        let entries = form
            .input_fields()
            .map(|field| (field.id.clone(), AnswerValue::empty_for(field.field_type)))
            .collect();
        AnswerSet(entries)
    }

    pub fn get(&self, id: &str) -> Option<&AnswerValue> {
        self.0.get(id)
    }

    pub fn set(&mut self, id: impl Into<String>, value: AnswerValue) {
        self.0.insert(id.into(), value);
    }

    pub fn set_text(&mut self, id: &str, text: impl Into<String>) {
        self.set(id, AnswerValue::Text(text.into()));
    }

    pub fn select(&mut self, id: &str, option: &str) {
        self.set_text(id, option);
    }

    pub fn toggle(&mut self, id: &str, option: &str) {
        let next = match self.0.get(id) {
            Some(current) => current.toggled(option),
            None => AnswerValue::Choices(vec![option.to_string()]),
        };
        self.set(id, next);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.0.iter()
    }

    pub fn missing_required<'a>(&self, form: &'a Form) -> Vec<&'a FormField> {
        form.input_fields()
            .filter(|field| field.required)
            .filter(|field| self.get(&field.id).is_none_or(AnswerValue::is_blank))
            .collect()
    }
}

impl FromIterator<(String, AnswerValue)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (String, AnswerValue)>>(iter: I) -> Self {
        AnswerSet(iter.into_iter().collect())
    }
}
