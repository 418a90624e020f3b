//! palu-engine
//!
//! Malaria triage decision engine. Pure rules, no I/O.
//! Converts a partial or complete symptom set into ranked hypotheses,
//! danger signs, the next questions to ask, a recommendation and, when the
//! weight is known, an ACT dosage.

pub mod dosage;
pub mod questions;
pub mod rules;
pub mod scoring;

pub use dosage::dosage;
pub use questions::{is_completed, next_question};
pub use rules::hypothesis_definitions;
pub use scoring::score;
