use std::io::Cursor;

use palu_cli::interview::run_interview;
use palu_core::models::hypothesis::HypothesisCode;
use palu_core::models::rdt::RdtResult;
use palu_core::symptoms::{SymptomKey, SymptomValue};
use palu_triage::memory::MemoryStore;
use palu_triage::service::TriageService;
use palu_triage::session::StartParams;
use uuid::Uuid;

fn service() -> (TriageService<MemoryStore, MemoryStore>, MemoryStore) {
    let store = MemoryStore::new();
    (TriageService::new(store.clone(), store.clone()), store)
}

#[tokio::test]
async fn scripted_interview_reaches_a_final_result() {
    let (service, store) = service();
    // fievre, temperature, duree, frissons, then the three danger signs
    let mut input = Cursor::new("oui\n38,5\n3\noui\nnon\nnon\nnon\n");
    let mut output = Vec::new();

    let done = run_interview(
        &service,
        StartParams {
            patient_id: Some(Uuid::new_v4()),
            weight_kg: Some(20.0),
            rdt_result: Some(RdtResult::Pos),
            ..Default::default()
        },
        &mut input,
        &mut output,
    )
    .await
    .unwrap();

    assert!(done.completed);
    assert_eq!(done.final_output.top_code(), Some(HypothesisCode::PaluSimple));
    assert!(done.final_output.danger_signs.is_empty());
    assert_eq!(
        done.final_output.dosage.as_ref().and_then(|d| d.total_tablets),
        Some(12)
    );

    let session = service.get_session(done.session_id).await.unwrap();
    assert!(session.completed);
    assert_eq!(session.answered.len(), 7);
    assert_eq!(
        session.answered.get(SymptomKey::Temperature),
        Some(SymptomValue::Number(38.5))
    );
    assert_eq!(store.diagnostics_for_session(done.session_id).len(), 1);

    let printed = String::from_utf8(output).unwrap();
    assert!(printed.contains(SymptomKey::Fievre.prompt()));
    assert!(printed.contains(&done.final_output.recommendation));
}

#[tokio::test]
async fn rejected_answer_asks_the_same_question_again() {
    let (service, _) = service();
    let mut input = Cursor::new("peut-être\noui\nchaud\n39\n2\nnon\noui\n");
    let mut output = Vec::new();

    let done = run_interview(&service, StartParams::default(), &mut input, &mut output)
        .await
        .unwrap();

    // convulsions closes the interview early
    assert_eq!(done.final_output.danger_signs, vec![SymptomKey::Convulsions]);
    assert_eq!(done.final_output.top_code(), Some(HypothesisCode::PaluGrave));

    let printed = String::from_utf8(output).unwrap();
    assert_eq!(printed.matches(SymptomKey::Fievre.prompt()).count(), 2);
    assert_eq!(printed.matches(SymptomKey::Temperature.prompt()).count(), 2);
    assert_eq!(printed.matches("  ! ").count(), 2);
}

#[tokio::test]
async fn closed_input_is_an_error() {
    let (service, store) = service();
    let mut input = Cursor::new("oui\n");
    let mut output = Vec::new();

    let err = run_interview(&service, StartParams::default(), &mut input, &mut output)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("input closed"));

    // the partial session stays stored
    assert_eq!(store.session_count(), 1);
}
