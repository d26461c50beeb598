use std::{fmt, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Longtext,
    Number,
    Date,
    Select,
    Checkbox,
    Section,
}

impl FieldType {
    pub const ALL: [FieldType; 7] = [
        FieldType::Text,
        FieldType::Longtext,
        FieldType::Number,
        FieldType::Date,
        FieldType::Select,
        FieldType::Checkbox,
        FieldType::Section,
    ];

    pub fn is_choice(self) -> bool {
        matches!(self, FieldType::Select | FieldType::Checkbox)
    }

    pub fn is_section(self) -> bool {
        matches!(self, FieldType::Section)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Longtext => "longtext",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Select => "select",
            FieldType::Checkbox => "checkbox",
            FieldType::Section => "section",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            FieldType::Text => "Short text",
            FieldType::Longtext => "Long text",
            FieldType::Number => "Number",
            FieldType::Date => "Date",
            FieldType::Select => "Multiple choice",
            FieldType::Checkbox => "Checkboxes",
            FieldType::Section => "Section",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseKindError {
    kind: &'static str,
    value: String,
    expected: String,
}

impl ParseKindError {
    pub(crate) fn new(kind: &'static str, value: &str, expected: &[&str]) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected: expected.join(", "),
        }
    }
}

impl FromStr for FieldType {
    type Err = ParseKindError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        FieldType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| {
                let names = FieldType::ALL.map(FieldType::as_str);
                ParseKindError::new("field type", raw, &names)
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FormCategory {
    Public,
    Internal,
}

impl FormCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            FormCategory::Public => "public",
            FormCategory::Internal => "internal",
        }
    }
}

impl fmt::Display for FormCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormCategory {
    type Err = ParseKindError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(FormCategory::Public),
            "internal" => Ok(FormCategory::Internal),
            _ => Err(ParseKindError::new(
                "form category",
                raw,
                &["public", "internal"],
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    Draft,
    Active,
    Archived,
}

impl fmt::Display for FormStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FormStatus::Draft => "draft",
            FormStatus::Active => "active",
            FormStatus::Archived => "archived",
        };
        f.write_str(label)
    }
}

impl FromStr for FormStatus {
    type Err = ParseKindError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(FormStatus::Draft),
            "active" => Ok(FormStatus::Active),
            "archived" => Ok(FormStatus::Archived),
            _ => Err(ParseKindError::new(
                "form status",
                raw,
                &["draft", "active", "archived"],
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub order: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
}

impl FormField {
    /// Options that are live for the current type. Dormant options kept on a
    /// field whose type moved away from a choice type are not reported.
    pub fn choices(&self) -> &[String] {
        if self.field_type.is_choice() {
            self.options.as_deref().unwrap_or_default()
        } else {
            &[]
        }
    }

    pub fn helper_text(&self) -> Option<&str> {
        self.placeholder
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    pub fn display_label(&self) -> String {
        let label = self.label.trim();
        if label.is_empty() {
            format!("Untitled {}", self.field_type.display_name().to_lowercase())
        } else {
            label.to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: FormCategory,
    pub status: FormStatus,
    #[serde(default)]
    pub fields: Vec<FormField>,
    pub created_at: i64,
}

impl Form {
    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.id == id)
    }

    pub fn input_fields(&self) -> impl Iterator<Item = &FormField> {
        self.fields
            .iter()
            .filter(|field| !field.field_type.is_section())
    }

    pub fn sections(&self) -> impl Iterator<Item = &FormField> {
        self.fields.iter().filter(|field| field.field_type.is_section())
    }

    pub fn has_section(&self, id: &str) -> bool {
        self.sections().any(|section| section.id == id)
    }
}
