use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::rdt::RdtResult;
use crate::symptoms::{SymptomKey, SymptomSet};

pub const PROTOCOL_VERSION: &str = "v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TestType {
    #[serde(rename = "RDT")]
    Rdt,
    /// Thick blood smear ("goutte épaisse").
    #[serde(rename = "GO")]
    ThickSmear,
    #[serde(rename = "NONE")]
    NotPerformed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum Classification {
    Simple,
    Grave,
    NonSuspect,
}

/// A malaria diagnostic derived from a completed triage session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiagnosticRecord {
    /// Time-ordered (UUID v7), so later records sort after earlier ones.
    pub id: Uuid,
    pub session_id: Uuid,
    pub patient_id: Option<Uuid>,
    pub relais_id: Option<Uuid>,
    #[serde(rename = "symptomes")]
    pub symptoms: SymptomSet,
    pub test_type: TestType,
    pub test_result: Option<RdtResult>,
    pub classification: Classification,
    pub danger_signs: Vec<SymptomKey>,
    pub recommendation: String,
    pub protocol_version: String,
    pub created_at: jiff::Timestamp,
}
