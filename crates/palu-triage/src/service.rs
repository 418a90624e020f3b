use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use palu_core::models::diagnostic::DiagnosticRecord;
use palu_core::models::hypothesis::Hypothesis;
use palu_core::models::rdt::RdtResult;
use palu_core::models::result::EngineResult;
use palu_core::models::session::TriageSession;
use palu_core::symptoms::{SymptomKey, SymptomSet};

use crate::error::TriageError;
use crate::session::{self, AnswerOutcome, StartParams};
use crate::store::{DiagnosticStore, SessionStore, Version, Versioned};

#[derive(Debug, Clone, Serialize)]
pub struct StartResponse {
    pub session_id: Uuid,
    pub question: Option<SymptomKey>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AnswerResponse {
    Preview(PreviewResponse),
    Final(FinalResponse),
}

impl AnswerResponse {
    pub fn is_completed(&self) -> bool {
        matches!(self, AnswerResponse::Final(_))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PreviewResponse {
    pub session_id: Uuid,
    pub completed: bool,
    pub next_question: Option<SymptomKey>,
    pub preview_hypotheses: Vec<Hypothesis>,
    pub danger_signs: Vec<SymptomKey>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinalResponse {
    pub session_id: Uuid,
    pub completed: bool,
    pub final_output: EngineResult,
    /// True when this call found the session already closed.
    pub already_completed: bool,
    pub diagnostic_created: bool,
    /// Why the diagnostic record could not be written. The final result
    /// is valid regardless.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic_error: Option<String>,
}

/// One-shot scoring request, optionally recorded as a session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockTriageRequest {
    #[serde(rename = "symptomes")]
    pub symptoms: Value,
    pub weight_kg: Option<f64>,
    pub rdt_result: Option<RdtResult>,
    pub patient_id: Option<Uuid>,
    pub relais_id: Option<Uuid>,
    #[serde(default)]
    pub save: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlockTriageResponse {
    #[serde(flatten)]
    pub result: EngineResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
}

/// Runs session transitions against the persistence collaborators.
pub struct TriageService<S, D> {
    sessions: S,
    diagnostics: D,
}

impl<S: SessionStore, D: DiagnosticStore> TriageService<S, D> {
    pub fn new(sessions: S, diagnostics: D) -> Self {
        Self {
            sessions,
            diagnostics,
        }
    }

    /// Create and store an empty session, returning its first question.
    pub async fn start(&self, params: StartParams) -> Result<StartResponse, TriageError> {
        let (session, question) = session::start(params);
        self.sessions
            .create_session(&session)
            .await
            .map_err(|e| TriageError::from_store(session.id, e))?;

        Ok(StartResponse {
            session_id: session.id,
            question,
        })
    }

    /// Record one answer.
    ///
    /// The session is saved conditionally on the version it was loaded at;
    /// a concurrent writer yields [`TriageError::Conflict`] and nothing is
    /// written. When the answer completes the interview, the derived
    /// diagnostic is written after the session. A failed diagnostic write
    /// is reported in the response and does not undo the completion.
    pub async fn answer(
        &self,
        session_id: Uuid,
        question: &str,
        raw: &Value,
    ) -> Result<AnswerResponse, TriageError> {
        let Versioned {
            value: mut session,
            version,
        } = self
            .sessions
            .load_session(session_id)
            .await
            .map_err(|e| TriageError::from_store(session_id, e))?;

        match session::answer(&mut session, question, raw)? {
            AnswerOutcome::AlreadyCompleted { final_output } => {
                Ok(AnswerResponse::Final(FinalResponse {
                    session_id,
                    completed: true,
                    final_output,
                    already_completed: true,
                    diagnostic_created: false,
                    diagnostic_error: None,
                }))
            }
            AnswerOutcome::Preview {
                next_question,
                preview_hypotheses,
                danger_signs,
            } => {
                self.save(&session, &version).await?;
                Ok(AnswerResponse::Preview(PreviewResponse {
                    session_id,
                    completed: false,
                    next_question,
                    preview_hypotheses,
                    danger_signs,
                }))
            }
            AnswerOutcome::Completed {
                final_output,
                diagnostic,
            } => {
                self.save(&session, &version).await?;

                let (diagnostic_created, diagnostic_error) = match diagnostic {
                    Some(record) => self.record_diagnostic(&record).await,
                    None => (false, None),
                };

                Ok(AnswerResponse::Final(FinalResponse {
                    session_id,
                    completed: true,
                    final_output,
                    already_completed: false,
                    diagnostic_created,
                    diagnostic_error,
                }))
            }
        }
    }

    pub async fn get_session(&self, session_id: Uuid) -> Result<TriageSession, TriageError> {
        self.sessions
            .load_session(session_id)
            .await
            .map(|v| v.value)
            .map_err(|e| TriageError::from_store(session_id, e))
    }

    /// Score a complete symptom payload in one call.
    ///
    /// With `save`, the payload and its result are stored as an open session
    /// (no interview answers) and its id is returned.
    pub async fn triage_block(
        &self,
        request: BlockTriageRequest,
    ) -> Result<BlockTriageResponse, TriageError> {
        let symptoms =
            SymptomSet::from_json(&request.symptoms).map_err(TriageError::InvalidPayload)?;
        let result = palu_engine::score(&symptoms, request.weight_kg, request.rdt_result);

        let session_id = if request.save {
            let mut session = TriageSession::new(
                request.patient_id,
                request.relais_id,
                request.weight_kg,
                request.rdt_result,
            );
            session.symptoms = symptoms;
            session.set_preview(result.clone());
            self.sessions
                .create_session(&session)
                .await
                .map_err(|e| TriageError::from_store(session.id, e))?;
            info!(session_id = %session.id, "block triage saved");
            Some(session.id)
        } else {
            None
        };

        Ok(BlockTriageResponse { result, session_id })
    }

    pub async fn latest_diagnostic(
        &self,
        patient_id: Uuid,
    ) -> Result<Option<DiagnosticRecord>, TriageError> {
        self.diagnostics
            .latest_for_patient(patient_id)
            .await
            .map_err(|e| TriageError::Store(e.to_string()))
    }

    async fn save(&self, session: &TriageSession, version: &Version) -> Result<(), TriageError> {
        match self.sessions.save_session(session, version).await {
            Ok(_) => Ok(()),
            Err(e) => {
                let err = TriageError::from_store(session.id, e);
                if matches!(err, TriageError::Conflict(_)) {
                    warn!(session_id = %session.id, "concurrent session write rejected");
                }
                Err(err)
            }
        }
    }

    async fn record_diagnostic(&self, record: &DiagnosticRecord) -> (bool, Option<String>) {
        match self.diagnostics.create_diagnostic(record).await {
            Ok(()) => {
                info!(
                    session_id = %record.session_id,
                    diagnostic_id = %record.id,
                    classification = ?record.classification,
                    "diagnostic recorded"
                );
                (true, None)
            }
            Err(e) => {
                warn!(
                    session_id = %record.session_id,
                    error = %e,
                    "diagnostic creation failed; final result kept"
                );
                (false, Some(e.to_string()))
            }
        }
    }
}
