use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::dosage::Dosage;
use super::hypothesis::{Hypothesis, HypothesisCode};
use crate::symptoms::SymptomKey;

/// The engine's recommendation branches. The texts are the ones shown to
/// relais in the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    ReferImmediately,
    InitiateTreatment,
    ReferAfterInitialMeasures,
    ConfirmWithRdt,
    ContinueEvaluation,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::ReferImmediately => {
                "Référer immédiatement au centre de santé (signes de gravité)."
            }
            Recommendation::InitiateTreatment => "Initier traitement ACT selon poids.",
            Recommendation::ReferAfterInitialMeasures => {
                "Référer (paludisme grave) après mesures initiales."
            }
            Recommendation::ConfirmWithRdt => "Effectuer un test RDT pour confirmer le paludisme.",
            Recommendation::ContinueEvaluation => {
                "Continuer l'évaluation clinique et surveiller la fièvre."
            }
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of one scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EngineResult {
    /// Descending by score.
    pub hypotheses: Vec<Hypothesis>,
    pub danger_signs: Vec<SymptomKey>,
    /// At most three unanswered keys, by question priority.
    pub next_questions: Vec<SymptomKey>,
    pub recommendation: String,
    pub dosage: Option<Dosage>,
}

impl EngineResult {
    pub fn top(&self) -> Option<&Hypothesis> {
        self.hypotheses.first()
    }

    pub fn top_code(&self) -> Option<HypothesisCode> {
        self.top().map(|h| h.code)
    }

    pub fn score_of(&self, code: HypothesisCode) -> Option<f64> {
        self.hypotheses.iter().find(|h| h.code == code).map(|h| h.score)
    }

    pub fn has_danger_signs(&self) -> bool {
        !self.danger_signs.is_empty()
    }

    /// Malaria is the leading hypothesis.
    pub fn suspects_malaria(&self) -> bool {
        self.top_code().is_some_and(|c| c.is_malaria())
    }
}
