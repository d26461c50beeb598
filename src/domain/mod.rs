mod answers;
mod builder;
mod ids;
mod layout;
mod link;
mod schema;
mod submission;
mod template;

pub use answers::{AnswerSet, AnswerValue};
pub use builder::{
    BuilderError, DEFAULT_OPTION, DEFAULT_SECTION_LABEL, FieldPatch, FormDraft, NEW_FORM_ID,
    NEW_OPTION,
};
pub use ids::{generate_id, generate_unique_id, now_millis};
pub use layout::{FormLayout, RenderMode, SectionGroup};
pub use link::{parse_public_path, public_link, public_path};
pub use schema::{FieldType, Form, FormCategory, FormField, FormStatus, ParseKindError};
pub use submission::FormSubmission;
pub use template::{BlockType, PdfBlock, PdfTemplate, TemplateError, compose_preview};
