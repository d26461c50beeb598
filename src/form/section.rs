use crate::domain::{FormLayout, SectionGroup};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldGroup {
    /// `None` for the standalone (orphaned) fields.
    pub section_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub start: usize,
    pub len: usize,
}

impl FieldGroup {
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.start + self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn from_section(group: &SectionGroup<'_>, start: usize) -> Self {
        FieldGroup {
            section_id: Some(group.section.id.clone()),
            title: Some(group.section.display_label()),
            description: group.section.helper_text().map(str::to_string),
            start,
            len: group.fields.len(),
        }
    }

    /// Groups in display order. Standalone fields come first and only get a
    /// group when there are any; every section gets one, even when empty.
    pub fn collect(layout: &FormLayout<'_>) -> Vec<FieldGroup> {
        let mut groups = Vec::with_capacity(layout.sections.len() + 1);
        let mut start = 0;
        if !layout.loose.is_empty() {
            groups.push(FieldGroup {
                section_id: None,
                title: None,
                description: None,
                start,
                len: layout.loose.len(),
            });
            start += layout.loose.len();
        }
        for section in &layout.sections {
            let group = FieldGroup::from_section(section, start);
            start += group.len;
            groups.push(group);
        }
        groups
    }
}
