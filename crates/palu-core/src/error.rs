use thiserror::Error;

use crate::symptoms::{SymptomKey, ValueKind};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown symptom: {0}")]
    UnknownSymptom(String),

    #[error("invalid {expected} value for '{key}': {value}")]
    InvalidValue {
        key: SymptomKey,
        expected: ValueKind,
        value: String,
    },

    #[error("symptom payload must be a JSON object")]
    NotAnObject,

    #[error("invalid RDT result: {0}")]
    InvalidRdtResult(String),
}
