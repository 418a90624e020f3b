use palu_core::symptoms::{SymptomKey, SymptomSet};

use crate::rules::{CORE_QUESTIONS, DANGER_SIGNS, MAX_NEXT_QUESTIONS, QUESTION_PRIORITIES};

/// Truthy danger signs, in [`DANGER_SIGNS`] order.
pub fn danger_signs(symptoms: &SymptomSet) -> Vec<SymptomKey> {
    DANGER_SIGNS
        .into_iter()
        .filter(|key| symptoms.is_truthy(*key))
        .collect()
}

/// Up to three keys absent from `symptoms`, by question priority.
pub fn next_questions(symptoms: &SymptomSet) -> Vec<SymptomKey> {
    QUESTION_PRIORITIES
        .into_iter()
        .filter(|key| !symptoms.contains(*key))
        .take(MAX_NEXT_QUESTIONS)
        .collect()
}

/// First key absent from `answered`, by question priority.
pub fn next_question(answered: &SymptomSet) -> Option<SymptomKey> {
    QUESTION_PRIORITIES
        .into_iter()
        .find(|key| !answered.contains(*key))
}

/// An interview is complete as soon as a danger sign is confirmed, or once
/// every core question has an answer (false and zero count as answers).
pub fn is_completed(answered: &SymptomSet) -> bool {
    if DANGER_SIGNS.iter().any(|key| answered.is_truthy(*key)) {
        return true;
    }
    CORE_QUESTIONS.iter().all(|key| answered.contains(*key))
}
