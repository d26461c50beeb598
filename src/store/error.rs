use std::{fmt, io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Forms,
    Submissions,
    Templates,
}

impl Collection {
    pub fn file_name(self) -> &'static str {
        match self {
            Collection::Forms => "forms.json",
            Collection::Submissions => "submissions.json",
            Collection::Templates => "templates.json",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Collection::Forms => "forms",
            Collection::Submissions => "submissions",
            Collection::Templates => "templates",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{collection} has no entry with id '{id}'")]
    NotFound { collection: Collection, id: String },
    #[error("stored {collection} are corrupt: {details}")]
    Corrupt {
        collection: Collection,
        details: String,
    },
    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize {collection}")]
    Serialize {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn not_found(collection: Collection, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            collection,
            id: id.into(),
        }
    }

    pub fn corrupt(collection: Collection, details: impl Into<String>) -> Self {
        StoreError::Corrupt {
            collection,
            details: details.into(),
        }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::Corrupt { .. })
    }
}
