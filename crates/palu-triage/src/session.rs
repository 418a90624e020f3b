//! Pure session transitions. No I/O: callers load and persist the session.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use palu_core::coerce::coerce;
use palu_core::models::diagnostic::{Classification, DiagnosticRecord, PROTOCOL_VERSION, TestType};
use palu_core::models::hypothesis::{Hypothesis, HypothesisCode};
use palu_core::models::rdt::RdtResult;
use palu_core::models::result::EngineResult;
use palu_core::models::session::TriageSession;
use palu_core::symptoms::SymptomKey;
use palu_engine::{is_completed, next_question, score};

use crate::error::TriageError;

/// Context captured when an interview starts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartParams {
    pub patient_id: Option<Uuid>,
    pub relais_id: Option<Uuid>,
    pub weight_kg: Option<f64>,
    pub rdt_result: Option<RdtResult>,
}

/// What one answer did to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerOutcome {
    /// Still open. The preview is not authoritative.
    Preview {
        next_question: Option<SymptomKey>,
        preview_hypotheses: Vec<Hypothesis>,
        danger_signs: Vec<SymptomKey>,
    },
    /// This answer closed the interview.
    Completed {
        final_output: EngineResult,
        /// Present when malaria leads the final ranking.
        diagnostic: Option<DiagnosticRecord>,
    },
    /// The session was already closed; nothing changed.
    AlreadyCompleted { final_output: EngineResult },
}

/// Open a new, empty session and pick its first question.
pub fn start(params: StartParams) -> (TriageSession, Option<SymptomKey>) {
    let session = TriageSession::new(
        params.patient_id,
        params.relais_id,
        params.weight_kg,
        params.rdt_result,
    );
    let question = next_question(&session.answered);

    info!(
        session_id = %session.id,
        first_question = question.map(|q| q.as_str()),
        "triage session started"
    );
    (session, question)
}

/// Apply one answer.
///
/// Unknown keys and values that cannot be coerced are rejected before the
/// session is touched. Re-answering a key overwrites the earlier value.
/// Answers sent to a completed session are ignored and its stored final
/// result is returned unchanged.
pub fn answer(
    session: &mut TriageSession,
    question: &str,
    raw: &Value,
) -> Result<AnswerOutcome, TriageError> {
    if session.completed {
        let final_output = session
            .final_output
            .clone()
            .ok_or(TriageError::Inconsistent(session.id))?;
        debug!(session_id = %session.id, question, "answer ignored, session already completed");
        return Ok(AnswerOutcome::AlreadyCompleted { final_output });
    }

    let key = SymptomKey::parse(question)
        .ok_or_else(|| TriageError::InvalidQuestion(question.to_string()))?;
    let value = coerce(key, raw).map_err(TriageError::InvalidValue)?;

    session.record_answer(key, value);
    let result = score(&session.symptoms, session.weight_kg, session.rdt_result);

    if is_completed(&session.answered) {
        let diagnostic = derive_diagnostic(session, &result);
        session.complete(result.clone());

        info!(
            session_id = %session.id,
            answers = session.answered.len(),
            top = result.top_code().map(|c| c.as_str()),
            danger_signs = result.danger_signs.len(),
            "triage session completed"
        );
        return Ok(AnswerOutcome::Completed {
            final_output: result,
            diagnostic,
        });
    }

    let next = next_question(&session.answered);
    debug!(
        session_id = %session.id,
        question = key.as_str(),
        next_question = next.map(|q| q.as_str()),
        "triage preview updated"
    );
    session.set_preview(result.clone());

    Ok(AnswerOutcome::Preview {
        next_question: next,
        preview_hypotheses: result.hypotheses,
        danger_signs: result.danger_signs,
    })
}

/// Build the diagnostic record for a final result in which malaria leads.
///
/// Classified GRAVE when severe malaria leads or any danger sign was
/// reported, SIMPLE otherwise.
pub fn derive_diagnostic(
    session: &TriageSession,
    result: &EngineResult,
) -> Option<DiagnosticRecord> {
    if !result.suspects_malaria() {
        return None;
    }
    let top = result.top_code()?;

    let classification = if top == HypothesisCode::PaluGrave || result.has_danger_signs() {
        Classification::Grave
    } else {
        Classification::Simple
    };
    let test_type = if session.rdt_result.is_some() {
        TestType::Rdt
    } else {
        TestType::NotPerformed
    };

    Some(DiagnosticRecord {
        id: Uuid::now_v7(),
        session_id: session.id,
        patient_id: session.patient_id,
        relais_id: session.relais_id,
        symptoms: session.symptoms.clone(),
        test_type,
        test_result: session.rdt_result,
        classification,
        danger_signs: result.danger_signs.clone(),
        recommendation: result.recommendation.clone(),
        protocol_version: PROTOCOL_VERSION.to_string(),
        created_at: jiff::Timestamp::now(),
    })
}
