//! Static rule tables. Process-wide constants, never mutated.

use palu_core::models::hypothesis::HypothesisCode;
use palu_core::symptoms::{SymptomKey, SymptomSet};
use serde::Serialize;

/// Additive scoring rule for one hypothesis.
#[derive(Debug, Serialize)]
pub struct HypothesisDefinition {
    pub code: HypothesisCode,
    pub base: f64,
    pub positive_weights: &'static [(SymptomKey, f64)],
    pub negative_weights: &'static [(SymptomKey, f64)],
}

impl HypothesisDefinition {
    /// Base, then each truthy positive added and each truthy negative
    /// subtracted in table order, floored at 0. There is no upper clamp;
    /// normalization handles the scale.
    pub fn raw_score(&self, symptoms: &SymptomSet) -> f64 {
        let mut score = self.base;
        for (key, weight) in self.positive_weights {
            if symptoms.is_truthy(*key) {
                score += weight;
            }
        }
        for (key, weight) in self.negative_weights {
            if symptoms.is_truthy(*key) {
                score -= weight;
            }
        }
        score.max(0.0)
    }
}

/// In enumeration order: PALU_SIMPLE, PALU_GRAVE, AUTRE_INFECTION.
pub static HYPOTHESES: [HypothesisDefinition; 3] = [
    HypothesisDefinition {
        code: HypothesisCode::PaluSimple,
        base: 0.40,
        positive_weights: &[
            (SymptomKey::Fievre, 0.20),
            (SymptomKey::Frissons, 0.15),
            (SymptomKey::PaludismeRecent, 0.10),
        ],
        // Respiratory or digestive presentations point away from malaria.
        negative_weights: &[(SymptomKey::Toux, 0.05), (SymptomKey::Diarrhee, 0.05)],
    },
    HypothesisDefinition {
        code: HypothesisCode::PaluGrave,
        base: 0.15,
        positive_weights: &[
            (SymptomKey::Fievre, 0.10),
            (SymptomKey::Convulsions, 0.40),
            (SymptomKey::Prostration, 0.30),
            (SymptomKey::IncapaciteAManger, 0.20),
        ],
        negative_weights: &[],
    },
    HypothesisDefinition {
        code: HypothesisCode::AutreInfection,
        base: 0.30,
        positive_weights: &[
            (SymptomKey::Toux, 0.25),
            (SymptomKey::Diarrhee, 0.25),
            (SymptomKey::Vomissements, 0.15),
        ],
        negative_weights: &[(SymptomKey::Frissons, 0.10)],
    },
];

/// Symptoms that force urgent referral, in reporting order.
pub const DANGER_SIGNS: [SymptomKey; 3] = [
    SymptomKey::Convulsions,
    SymptomKey::Prostration,
    SymptomKey::IncapaciteAManger,
];

/// Canonical ask order of the interview.
pub const QUESTION_PRIORITIES: [SymptomKey; 11] = [
    SymptomKey::Fievre,
    SymptomKey::Temperature,
    SymptomKey::DureeFievreJours,
    SymptomKey::Frissons,
    SymptomKey::Convulsions,
    SymptomKey::Prostration,
    SymptomKey::IncapaciteAManger,
    SymptomKey::Toux,
    SymptomKey::Diarrhee,
    SymptomKey::Vomissements,
    SymptomKey::PaludismeRecent,
];

/// Minimal answer set that closes an interview without danger signs.
pub const CORE_QUESTIONS: [SymptomKey; 7] = [
    SymptomKey::Fievre,
    SymptomKey::Frissons,
    SymptomKey::Temperature,
    SymptomKey::DureeFievreJours,
    SymptomKey::Convulsions,
    SymptomKey::Prostration,
    SymptomKey::IncapaciteAManger,
];

/// Maximum number of suggestions in [`EngineResult::next_questions`].
///
/// [`EngineResult::next_questions`]: palu_core::models::result::EngineResult::next_questions
pub const MAX_NEXT_QUESTIONS: usize = 3;

/// The scoring tables, in enumeration order.
pub fn hypothesis_definitions() -> &'static [HypothesisDefinition] {
    &HYPOTHESES
}

pub fn definition(code: HypothesisCode) -> &'static HypothesisDefinition {
    match code {
        HypothesisCode::PaluSimple => &HYPOTHESES[0],
        HypothesisCode::PaluGrave => &HYPOTHESES[1],
        HypothesisCode::AutreInfection => &HYPOTHESES[2],
    }
}
