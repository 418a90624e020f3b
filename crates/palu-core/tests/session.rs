use palu_core::models::rdt::RdtResult;
use palu_core::models::result::EngineResult;
use palu_core::models::session::TriageSession;
use palu_core::s3_keys;
use palu_core::symptoms::{SymptomKey, SymptomValue};
use uuid::Uuid;

fn empty_result() -> EngineResult {
    EngineResult {
        hypotheses: Vec::new(),
        danger_signs: Vec::new(),
        next_questions: Vec::new(),
        recommendation: String::new(),
        dosage: None,
    }
}

#[test]
fn new_session_is_open_and_empty() {
    let session = TriageSession::new(None, None, Some(20.0), Some(RdtResult::Pos));
    assert!(!session.completed);
    assert!(session.answered.is_empty());
    assert!(session.symptoms.is_empty());
    assert!(session.final_output.is_none());
}

#[test]
fn record_answer_keeps_symptoms_superset_of_answered() {
    let mut session = TriageSession::new(None, None, None, None);
    session.record_answer(SymptomKey::Fievre, SymptomValue::Bool(true));
    session.record_answer(SymptomKey::Fievre, SymptomValue::Bool(false));
    session.record_answer(SymptomKey::Temperature, SymptomValue::Number(37.2));

    assert_eq!(session.answered.len(), 2);
    assert_eq!(session.answered.get(SymptomKey::Fievre), Some(SymptomValue::Bool(false)));
    assert!(session.symptoms.is_superset_of(&session.answered));
}

#[test]
fn complete_sets_final_output_and_flag_together() {
    let mut session = TriageSession::new(None, None, None, None);
    session.set_preview(empty_result());
    assert!(session.final_output.is_none());

    session.complete(empty_result());
    assert!(session.completed);
    assert_eq!(session.final_output, session.engine_output);
}

#[test]
fn session_uses_symptomes_wire_name() {
    let session = TriageSession::new(None, None, None, Some(RdtResult::Neg));
    let value = serde_json::to_value(&session).unwrap();
    assert!(value.get("symptomes").is_some());
    assert_eq!(value["rdt_result"], "NEG");
}

#[test]
fn rdt_result_parses_case_insensitively() {
    assert_eq!("pos".parse::<RdtResult>().unwrap(), RdtResult::Pos);
    assert_eq!("IND".parse::<RdtResult>().unwrap(), RdtResult::Ind);
    assert!("positive".parse::<RdtResult>().is_err());
}

#[test]
fn diagnostics_are_grouped_by_patient() {
    let patient = Uuid::new_v4();
    let record = Uuid::now_v7();
    assert_eq!(
        s3_keys::diagnostic(Some(patient), record),
        format!("diagnostics/{patient}/{record}.json")
    );
    assert!(s3_keys::diagnostic(None, record).starts_with("diagnostics/_unlinked/"));
    assert_eq!(s3_keys::session(record), format!("sessions/{record}.json"));
    assert!(s3_keys::session(record).starts_with(s3_keys::SESSIONS_PREFIX));
    assert!(s3_keys::diagnostic(None, record).starts_with(s3_keys::DIAGNOSTICS_PREFIX));
}
