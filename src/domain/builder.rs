use thiserror::Error;
use tracing::debug;

use super::{
    ids::generate_unique_id,
    schema::{FieldType, Form, FormCategory, FormField, FormStatus},
};

pub const DEFAULT_OPTION: &str = "Option 1";
pub const NEW_OPTION: &str = "New option";
pub const DEFAULT_SECTION_LABEL: &str = "Section title";
pub const DEFAULT_FORM_TITLE: &str = "New form";

pub const NEW_FORM_ID: &str = "new";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
    #[error("form has no field with id '{0}'")]
    UnknownField(String),
    #[error("field '{0}' does not take options")]
    NotAChoiceField(String),
    #[error("option index {index} is out of range for field '{field}' ({len} options)")]
    OptionOutOfRange {
        field: String,
        index: usize,
        len: usize,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPatch {
    pub field_type: Option<FieldType>,
    pub label: Option<String>,
    pub required: Option<bool>,
    pub options: Option<Vec<String>>,
    pub placeholder: Option<Option<String>>,
    pub section_id: Option<Option<String>>,
}

impl FieldPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_placeholder(mut self, placeholder: Option<String>) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn with_section(mut self, section_id: Option<String>) -> Self {
        self.section_id = Some(section_id);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == FieldPatch::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormDraft {
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub category: FormCategory,
    pub status: FormStatus,
    pub fields: Vec<FormField>,
}

impl Default for FormDraft {
    fn default() -> Self {
        Self {
            id: None,
            title: DEFAULT_FORM_TITLE.to_string(),
            description: String::new(),
            category: FormCategory::Internal,
            status: FormStatus::Active,
            fields: Vec::new(),
        }
    }
}

impl FormDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: FormCategory) -> Self {
        self.category = category;
        self
    }

    pub fn from_form(form: &Form) -> Self {
        Self {
            id: Some(form.id.clone()),
            title: form.title.clone(),
            description: form.description.clone(),
            category: form.category,
            status: form.status,
            fields: form.fields.clone(),
        }
    }

    pub fn existing_id(&self) -> Option<&str> {
        self.id
            .as_deref()
            .filter(|id| !id.is_empty() && *id != NEW_FORM_ID)
    }

    /// Finalizes the draft into a storable document. Options left dormant on
    /// non-choice fields are dropped here.
    pub fn into_form(self, id: String, created_at: i64) -> Form {
        let fields = self
            .fields
            .into_iter()
            .map(|mut field| {
                if !field.field_type.is_choice() {
                    field.options = None;
                }
                field
            })
            .collect();
        Form {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            status: self.status,
            fields,
            created_at,
        }
    }

    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.id == id)
    }

    fn field_mut(&mut self, id: &str) -> Result<&mut FormField, BuilderError> {
        self.fields
            .iter_mut()
            .find(|field| field.id == id)
            .ok_or_else(|| BuilderError::UnknownField(id.to_string()))
    }

    pub fn add_field(&mut self, field_type: FieldType, section_id: Option<&str>) -> String {
        let id = generate_unique_id(self.fields.iter().map(|field| field.id.as_str()));
        let label = if field_type.is_section() {
            DEFAULT_SECTION_LABEL.to_string()
        } else {
            String::new()
        };
        let options = field_type
            .is_choice()
            .then(|| vec![DEFAULT_OPTION.to_string()]);
        self.fields.push(FormField {
            id: id.clone(),
            field_type,
            label,
            required: false,
            options,
            placeholder: None,
            order: self.fields.len(),
            section_id: section_id.map(str::to_string),
        });
        debug!(field = %id, kind = %field_type, "field added");
        id
    }

    /// Removes a single field. Fields that pointed at a removed section keep
    /// their `section_id` and are rendered as orphans.
    pub fn remove_field(&mut self, id: &str) -> Option<FormField> {
        let index = self.fields.iter().position(|field| field.id == id)?;
        let removed = self.fields.remove(index);
        if removed.field_type.is_section() {
            let orphaned = self.section_children(&removed.id).count();
            debug!(section = %removed.id, orphaned, "section removed");
        } else {
            debug!(field = %removed.id, "field removed");
        }
        Some(removed)
    }

    pub fn update_field(
        &mut self,
        id: &str,
        patch: FieldPatch,
    ) -> Result<&FormField, BuilderError> {
        let field = self.field_mut(id)?;
        let FieldPatch {
            field_type,
            label,
            required,
            options,
            placeholder,
            section_id,
        } = patch;
        if let Some(field_type) = field_type {
            field.field_type = field_type;
        }
        if let Some(label) = label {
            field.label = label;
        }
        if let Some(required) = required {
            field.required = required;
        }
        if let Some(options) = options {
            field.options = Some(options);
        }
        if let Some(placeholder) = placeholder {
            field.placeholder = placeholder;
        }
        if let Some(section_id) = section_id {
            field.section_id = section_id;
        }
        if field.field_type.is_choice() && field.options.is_none() {
            field.options = Some(vec![DEFAULT_OPTION.to_string()]);
        }
        Ok(&*field)
    }

    fn options_mut(&mut self, id: &str) -> Result<&mut Vec<String>, BuilderError> {
        let field = self.field_mut(id)?;
        if !field.field_type.is_choice() {
            return Err(BuilderError::NotAChoiceField(id.to_string()));
        }
        Ok(field.options.get_or_insert_with(Vec::new))
    }

    pub fn add_option(&mut self, id: &str, text: Option<&str>) -> Result<usize, BuilderError> {
        let options = self.options_mut(id)?;
        options.push(text.unwrap_or(NEW_OPTION).to_string());
        Ok(options.len() - 1)
    }

    pub fn set_option(
        &mut self,
        id: &str,
        index: usize,
        text: impl Into<String>,
    ) -> Result<(), BuilderError> {
        let options = self.options_mut(id)?;
        let len = options.len();
        let slot = options
            .get_mut(index)
            .ok_or_else(|| out_of_range(id, index, len))?;
        *slot = text.into();
        Ok(())
    }

    pub fn remove_option(&mut self, id: &str, index: usize) -> Result<String, BuilderError> {
        let options = self.options_mut(id)?;
        if index >= options.len() {
            return Err(out_of_range(id, index, options.len()));
        }
        Ok(options.remove(index))
    }

    pub fn move_option(&mut self, id: &str, from: usize, to: usize) -> Result<(), BuilderError> {
        let options = self.options_mut(id)?;
        let len = options.len();
        if from >= len {
            return Err(out_of_range(id, from, len));
        }
        if to >= len {
            return Err(out_of_range(id, to, len));
        }
        let option = options.remove(from);
        options.insert(to, option);
        Ok(())
    }

    pub fn sections(&self) -> impl Iterator<Item = &FormField> {
        self.fields.iter().filter(|field| field.field_type.is_section())
    }

    pub fn section_children<'a>(
        &'a self,
        section_id: &'a str,
    ) -> impl Iterator<Item = &'a FormField> + 'a {
        self.fields.iter().filter(move |field| {
            !field.field_type.is_section() && field.section_id.as_deref() == Some(section_id)
        })
    }
}

fn out_of_range(field: &str, index: usize, len: usize) -> BuilderError {
    BuilderError::OptionOutOfRange {
        field: field.to_string(),
        index,
        len,
    }
}
