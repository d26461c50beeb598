#![deny(rust_2018_idioms)]

//! Intake forms for practitioners: author forms from the command line, fill
//! them in a terminal UI (session capture or public submission), keep
//! everything in a JSON store and compose report previews from submissions.

pub mod app;
pub mod domain;
pub mod form;
pub mod io;
pub mod presentation;
pub mod store;

pub use app::{FillUI, UiOptions};

pub mod prelude {
    pub use super::{
        FillUI, UiOptions,
        domain::{
            AnswerSet, AnswerValue, FieldPatch, FieldType, Form, FormCategory, FormDraft,
            FormField, FormSubmission, PdfTemplate, RenderMode,
        },
        form::{FillSession, FormError, SubmissionPhase},
        store::{
            FormRepository, JsonFileStore, MemoryStore, Store, StoreError, SubmissionRepository,
            TemplateRepository,
        },
    };
}

#[cfg(test)]
mod tests;
