use super::schema::{Form, FormField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Internal,
    Public,
}

impl RenderMode {
    pub fn label(self) -> &'static str {
        match self {
            RenderMode::Internal => "session",
            RenderMode::Public => "public",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionGroup<'a> {
    pub section: &'a FormField,
    pub fields: Vec<&'a FormField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormLayout<'a> {
    pub loose: Vec<&'a FormField>,
    pub sections: Vec<SectionGroup<'a>>,
}

impl<'a> FormLayout<'a> {
    pub fn build(form: &'a Form, mode: RenderMode) -> Self {
        match mode {
            RenderMode::Internal => Self::grouped(form),
            RenderMode::Public => Self::flat(form),
        }
    }

    /// Orphans first, then each section with the fields that reference it.
    /// A field is orphaned when its `section_id` is unset or dangling.
    pub fn grouped(form: &'a Form) -> Self {
        let loose = form
            .input_fields()
            .filter(|field| {
                field
                    .section_id
                    .as_deref()
                    .is_none_or(|section| !form.has_section(section))
            })
            .collect();
        let sections = form
            .sections()
            .map(|section| SectionGroup {
                section,
                fields: form
                    .input_fields()
                    .filter(|field| field.section_id.as_deref() == Some(section.id.as_str()))
                    .collect(),
            })
            .collect();
        FormLayout { loose, sections }
    }

    pub fn flat(form: &'a Form) -> Self {
        FormLayout {
            loose: form.input_fields().collect(),
            sections: Vec::new(),
        }
    }

    pub fn ordered_fields(&self) -> Vec<&'a FormField> {
        let mut fields = self.loose.clone();
        for group in &self.sections {
            fields.extend(group.fields.iter().copied());
        }
        fields
    }

    pub fn is_orphaned(&self, id: &str) -> bool {
        self.loose.iter().any(|field| field.id == id)
    }
}
