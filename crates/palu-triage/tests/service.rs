use palu_core::models::diagnostic::{Classification, DiagnosticRecord};
use palu_core::models::hypothesis::HypothesisCode;
use palu_core::models::rdt::RdtResult;
use palu_core::symptoms::SymptomKey;
use palu_triage::error::{StoreError, TriageError};
use palu_triage::memory::MemoryStore;
use palu_triage::service::{AnswerResponse, BlockTriageRequest, TriageService};
use palu_triage::session::StartParams;
use palu_triage::store::{DiagnosticStore, SessionStore};
use serde_json::json;
use uuid::Uuid;

/// Diagnostic backend that always refuses writes.
struct RejectingDiagnostics;

impl DiagnosticStore for RejectingDiagnostics {
    async fn create_diagnostic(&self, _record: &DiagnosticRecord) -> Result<(), StoreError> {
        Err(StoreError::Backend("patient record is missing".to_string()))
    }

    async fn latest_for_patient(
        &self,
        _patient_id: Uuid,
    ) -> Result<Option<DiagnosticRecord>, StoreError> {
        Ok(None)
    }
}

fn service() -> (TriageService<MemoryStore, MemoryStore>, MemoryStore) {
    let store = MemoryStore::new();
    (TriageService::new(store.clone(), store.clone()), store)
}

#[tokio::test]
async fn start_persists_an_open_session() {
    let (service, store) = service();
    let started = service.start(StartParams::default()).await.unwrap();

    assert_eq!(started.question, Some(SymptomKey::Fievre));
    assert_eq!(store.session_count(), 1);

    let session = service.get_session(started.session_id).await.unwrap();
    assert!(!session.completed);
    assert!(session.answered.is_empty());
}

#[tokio::test]
async fn preview_answers_are_persisted() {
    let (service, _) = service();
    let started = service.start(StartParams::default()).await.unwrap();

    let response = service
        .answer(started.session_id, "fievre", &json!("oui"))
        .await
        .unwrap();
    let AnswerResponse::Preview(preview) = response else {
        panic!("expected a preview");
    };
    assert!(!preview.completed);
    assert_eq!(preview.next_question, Some(SymptomKey::Temperature));

    let session = service.get_session(started.session_id).await.unwrap();
    assert_eq!(session.answered.len(), 1);
    assert!(session.engine_output.is_some());
    assert!(session.final_output.is_none());
}

#[tokio::test]
async fn completion_records_a_diagnostic() {
    let (service, store) = service();
    let patient = Uuid::new_v4();
    let started = service
        .start(StartParams {
            patient_id: Some(patient),
            rdt_result: Some(RdtResult::Pos),
            weight_kg: Some(30.0),
            ..Default::default()
        })
        .await
        .unwrap();

    let response = service
        .answer(started.session_id, "prostration", &json!(true))
        .await
        .unwrap();
    let AnswerResponse::Final(done) = response else {
        panic!("expected completion");
    };
    assert!(done.diagnostic_created);
    assert!(done.diagnostic_error.is_none());
    assert!(!done.already_completed);
    assert_eq!(done.final_output.top_code(), Some(HypothesisCode::PaluGrave));

    assert_eq!(store.diagnostics_for_session(started.session_id).len(), 1);
    let latest = service.latest_diagnostic(patient).await.unwrap().unwrap();
    assert_eq!(latest.classification, Classification::Grave);
    assert_eq!(latest.danger_signs, vec![SymptomKey::Prostration]);
}

#[tokio::test]
async fn diagnostic_failure_does_not_undo_completion() {
    let store = MemoryStore::new();
    let service = TriageService::new(store.clone(), RejectingDiagnostics);
    let started = service.start(StartParams::default()).await.unwrap();

    let response = service
        .answer(started.session_id, "convulsions", &json!(1))
        .await
        .unwrap();
    let AnswerResponse::Final(done) = response else {
        panic!("expected completion");
    };
    assert!(done.completed);
    assert!(!done.diagnostic_created);
    assert_eq!(
        done.diagnostic_error.as_deref(),
        Some("patient record is missing")
    );

    let session = service.get_session(started.session_id).await.unwrap();
    assert!(session.completed);
    assert_eq!(session.final_output, Some(done.final_output));
}

#[tokio::test]
async fn answering_a_completed_session_returns_the_stored_result() {
    let (service, store) = service();
    let started = service.start(StartParams::default()).await.unwrap();
    let AnswerResponse::Final(first) = service
        .answer(started.session_id, "incapacite_a_manger", &json!("vrai"))
        .await
        .unwrap()
    else {
        panic!("expected completion");
    };

    let again = service
        .answer(started.session_id, "toux", &json!(true))
        .await
        .unwrap();
    let AnswerResponse::Final(again) = again else {
        panic!("expected the stored final result");
    };
    assert!(again.already_completed);
    assert!(!again.diagnostic_created);
    assert_eq!(again.final_output, first.final_output);

    let session = service.get_session(started.session_id).await.unwrap();
    assert!(!session.answered.contains(SymptomKey::Toux));
    assert_eq!(store.diagnostics_for_session(started.session_id).len(), 1);
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let (service, _) = service();
    let missing = Uuid::new_v4();
    let err = service
        .answer(missing, "fievre", &json!(true))
        .await
        .unwrap_err();
    assert!(matches!(err, TriageError::SessionNotFound(id) if id == missing));
    assert!(!err.is_validation());
}

#[tokio::test]
async fn invalid_answer_leaves_stored_session_untouched() {
    let (service, _) = service();
    let started = service.start(StartParams::default()).await.unwrap();
    let before = service.get_session(started.session_id).await.unwrap();

    let err = service
        .answer(started.session_id, "temperature", &json!([38]))
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(service.get_session(started.session_id).await.unwrap(), before);
}

#[tokio::test]
async fn stale_version_is_rejected_as_conflict() {
    let store = MemoryStore::new();
    let (session, _) = palu_triage::session::start(StartParams::default());
    let initial = store.create_session(&session).await.unwrap();

    let loaded = store.load_session(session.id).await.unwrap();
    store.save_session(&loaded.value, &loaded.version).await.unwrap();

    let err = store.save_session(&session, &initial).await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));
}

#[tokio::test]
async fn block_triage_scores_and_optionally_saves() {
    let (service, store) = service();

    let response = service
        .triage_block(BlockTriageRequest {
            symptoms: json!({"fievre": true, "frissons": "oui", "paludisme_recent": 1}),
            weight_kg: Some(20.0),
            rdt_result: Some(RdtResult::Pos),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(response.session_id.is_none());
    assert_eq!(response.result.dosage.and_then(|d| d.total_tablets), Some(12));
    assert_eq!(store.session_count(), 0);

    let saved = service
        .triage_block(BlockTriageRequest {
            symptoms: json!({"toux": true}),
            save: true,
            ..Default::default()
        })
        .await
        .unwrap();
    let session = service.get_session(saved.session_id.unwrap()).await.unwrap();
    assert!(session.symptoms.contains(SymptomKey::Toux));
    assert!(session.answered.is_empty());
    assert_eq!(session.engine_output, Some(saved.result));
    // block triage never records a diagnostic
    assert_eq!(store.diagnostic_count(), 0);
}

#[tokio::test]
async fn block_triage_does_not_ask_again_for_null_keys() {
    let (service, _) = service();
    let response = service
        .triage_block(BlockTriageRequest {
            symptoms: json!({"fievre": null, "frissons": true}),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(
        response.result.next_questions,
        vec![
            SymptomKey::Temperature,
            SymptomKey::DureeFievreJours,
            SymptomKey::Convulsions,
        ]
    );
    // fievre is known but not truthy, so it adds nothing to the scores.
    assert_eq!(response.result.top_code(), Some(HypothesisCode::PaluSimple));
}

#[tokio::test]
async fn block_triage_rejects_non_object_payload() {
    let (service, _) = service();
    let err = service
        .triage_block(BlockTriageRequest {
            symptoms: json!("fievre"),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, TriageError::InvalidPayload(_)));
}

#[tokio::test]
async fn final_response_serializes_flat() {
    let (service, _) = service();
    let started = service.start(StartParams::default()).await.unwrap();
    let response = service
        .answer(started.session_id, "convulsions", &json!(true))
        .await
        .unwrap();
    assert!(response.is_completed());

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["completed"], true);
    assert_eq!(value["diagnostic_created"], true);
    assert!(value.get("diagnostic_error").is_none());
    assert_eq!(value["final_output"]["danger_signs"], json!(["convulsions"]));
}
