use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::rdt::RdtResult;
use super::result::EngineResult;
use crate::symptoms::{SymptomKey, SymptomSet, SymptomValue};

/// A multi-turn triage interview.
///
/// `symptoms` is the scoring input and `answered` tracks the interview's own
/// answers. Both are only written through [`TriageSession::record_answer`],
/// which keeps `symptoms` a superset of `answered`. `final_output` is set
/// exactly when `completed` is, and a completed session is never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TriageSession {
    pub id: Uuid,
    pub patient_id: Option<Uuid>,
    pub relais_id: Option<Uuid>,
    pub rdt_result: Option<RdtResult>,
    pub weight_kg: Option<f64>,
    #[serde(rename = "symptomes")]
    pub symptoms: SymptomSet,
    #[serde(default)]
    pub answered: SymptomSet,
    #[serde(default)]
    pub completed: bool,
    pub engine_output: Option<EngineResult>,
    pub final_output: Option<EngineResult>,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl TriageSession {
    /// An empty, open session.
    pub fn new(
        patient_id: Option<Uuid>,
        relais_id: Option<Uuid>,
        weight_kg: Option<f64>,
        rdt_result: Option<RdtResult>,
    ) -> Self {
        let now = jiff::Timestamp::now();
        Self {
            id: Uuid::new_v4(),
            patient_id,
            relais_id,
            rdt_result,
            weight_kg,
            symptoms: SymptomSet::new(),
            answered: SymptomSet::new(),
            completed: false,
            engine_output: None,
            final_output: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge one interview answer into both maps (last write wins).
    pub fn record_answer(&mut self, key: SymptomKey, value: SymptomValue) {
        self.answered.insert(key, value);
        self.symptoms.insert(key, value);
        self.touch();
    }

    /// Store a non-authoritative result for an open session.
    pub fn set_preview(&mut self, preview: EngineResult) {
        self.engine_output = Some(preview);
        self.touch();
    }

    /// Close the session with its authoritative result.
    pub fn complete(&mut self, result: EngineResult) {
        self.engine_output = Some(result.clone());
        self.final_output = Some(result);
        self.completed = true;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = jiff::Timestamp::now();
    }
}
