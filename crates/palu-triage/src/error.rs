use thiserror::Error;
use uuid::Uuid;

use palu_core::error::CoreError;

#[derive(Debug, Error)]
pub enum TriageError {
    #[error("unknown question: {0}")]
    InvalidQuestion(String),

    #[error("invalid answer: {0}")]
    InvalidValue(CoreError),

    #[error("invalid symptom payload: {0}")]
    InvalidPayload(CoreError),

    #[error("session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("session {0} was modified concurrently; reload and retry")]
    Conflict(Uuid),

    #[error("session {0} is marked completed but has no final result")]
    Inconsistent(Uuid),

    #[error("store error: {0}")]
    Store(String),
}

impl TriageError {
    /// Caller input was rejected; nothing was written.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TriageError::InvalidQuestion(_)
                | TriageError::InvalidValue(_)
                | TriageError::InvalidPayload(_)
        )
    }

    pub(crate) fn from_store(session_id: Uuid, err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => TriageError::SessionNotFound(session_id),
            StoreError::Conflict(_) => TriageError::Conflict(session_id),
            StoreError::Backend(msg) => TriageError::Store(msg),
        }
    }
}

/// Failure reported by a persistence backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("version mismatch for {0}")]
    Conflict(String),

    #[error("{0}")]
    Backend(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Backend(format!("serialization error: {e}"))
    }
}
