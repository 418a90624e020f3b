use thiserror::Error;

use palu_triage::error::StoreError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no object at {key}")]
    NotFound { key: String },

    /// The conditional write lost: the object exists, or its ETag moved.
    #[error("{key} changed since it was read")]
    PreconditionFailed { key: String },

    #[error("malformed JSON document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("reading object failed: {0}")]
    GetObject(String),

    #[error("writing object failed: {0}")]
    PutObject(String),

    #[error("listing objects failed: {0}")]
    ListObjects(String),
}

impl From<StorageError> for StoreError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { key } => StoreError::NotFound(key),
            StorageError::PreconditionFailed { key } => StoreError::Conflict(key),
            other => StoreError::Backend(other.to_string()),
        }
    }
}
