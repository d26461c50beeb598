use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("form '{0}' was not found")]
    NotFound(String),
    #[error("required fields are missing: {}", .missing.join(", "))]
    ValidationFailed { missing: Vec<String> },
    #[error("stored data is corrupt: {0}")]
    StorageCorrupt(String),
    #[error("cannot {action} while the form is {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: &'static str,
    },
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for FormError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Corrupt { .. } => FormError::StorageCorrupt(err.to_string()),
            other => FormError::Store(other),
        }
    }
}
