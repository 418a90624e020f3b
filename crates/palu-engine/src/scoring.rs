use palu_core::models::dosage::Dosage;
use palu_core::models::hypothesis::{Hypothesis, HypothesisCode};
use palu_core::models::rdt::RdtResult;
use palu_core::models::result::{EngineResult, Recommendation};
use palu_core::symptoms::SymptomSet;

use crate::dosage::dosage;
use crate::questions::{danger_signs, next_questions};
use crate::rules::HYPOTHESES;

/// Score a symptom set.
///
/// Total and deterministic: absent keys simply do not contribute. Scores are
/// divided by the highest raw score, so without danger signs the leading
/// hypothesis is always exactly 1.0. Any danger sign forces PALU_GRAVE to
/// 1.0 after normalization and short-circuits the recommendation to an
/// immediate referral, with no dosage.
pub fn score(
    symptoms: &SymptomSet,
    weight_kg: Option<f64>,
    rdt_result: Option<RdtResult>,
) -> EngineResult {
    let raw: Vec<(HypothesisCode, f64)> = HYPOTHESES
        .iter()
        .map(|def| (def.code, def.raw_score(symptoms)))
        .collect();

    let max = raw.iter().map(|(_, s)| *s).fold(0.0, f64::max);
    let divisor = if max == 0.0 { 1.0 } else { max };

    let danger = danger_signs(symptoms);

    let mut hypotheses: Vec<Hypothesis> = raw
        .into_iter()
        .map(|(code, raw_score)| {
            let score = if code == HypothesisCode::PaluGrave && !danger.is_empty() {
                1.0
            } else {
                round2(raw_score / divisor)
            };
            Hypothesis {
                code,
                label: code.label().to_string(),
                score,
            }
        })
        .collect();

    // Stable: equal scores keep enumeration order.
    hypotheses.sort_by(|a, b| b.score.total_cmp(&a.score));

    let top = hypotheses.first().map(|h| h.code);
    let (recommendation, dosage) = recommend(top, !danger.is_empty(), weight_kg, rdt_result);

    EngineResult {
        next_questions: next_questions(symptoms),
        hypotheses,
        danger_signs: danger,
        recommendation: recommendation.as_str().to_string(),
        dosage,
    }
}

fn recommend(
    top: Option<HypothesisCode>,
    has_danger: bool,
    weight_kg: Option<f64>,
    rdt_result: Option<RdtResult>,
) -> (Recommendation, Option<Dosage>) {
    if has_danger {
        return (Recommendation::ReferImmediately, None);
    }

    match top {
        Some(code) if code.is_malaria() && rdt_result == Some(RdtResult::Pos) => {
            let recommendation = if code == HypothesisCode::PaluSimple {
                Recommendation::InitiateTreatment
            } else {
                Recommendation::ReferAfterInitialMeasures
            };
            // Zero means not weighed; a negative weight falls in the referral band.
            let dosage = weight_kg.filter(|w| *w != 0.0 && !w.is_nan()).map(dosage);
            (recommendation, dosage)
        }
        Some(code) if code.is_malaria() => (Recommendation::ConfirmWithRdt, None),
        _ => (Recommendation::ContinueEvaluation, None),
    }
}

/// Two decimals, exact halves to even: 0.625 becomes 0.62.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
