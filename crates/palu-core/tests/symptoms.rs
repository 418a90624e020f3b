use palu_core::coerce::coerce;
use palu_core::error::CoreError;
use palu_core::symptoms::{SymptomKey, SymptomSet, SymptomValue, ValueKind};
use serde_json::json;

#[test]
fn wire_names_round_trip_through_parse_and_serde() {
    for key in SymptomKey::ALL {
        assert_eq!(SymptomKey::parse(key.as_str()), Some(key));
        assert_eq!(serde_json::to_value(key).unwrap(), json!(key.as_str()));
    }
}

#[test]
fn parse_rejects_unknown_and_differently_cased_names() {
    assert_eq!(SymptomKey::parse("headache"), None);
    assert_eq!(SymptomKey::parse("Fievre"), None);
    assert!(matches!(
        "cephalees".parse::<SymptomKey>(),
        Err(CoreError::UnknownSymptom(name)) if name == "cephalees"
    ));
}

#[test]
fn only_temperature_and_fever_duration_are_numeric() {
    let numeric: Vec<_> = SymptomKey::ALL
        .into_iter()
        .filter(|k| k.kind() == ValueKind::Number)
        .collect();
    assert_eq!(
        numeric,
        vec![SymptomKey::Temperature, SymptomKey::DureeFievreJours]
    );
}

#[test]
fn boolean_tokens_are_case_insensitive() {
    for token in ["true", "1", "oui", "VRAI", "Yes", "y"] {
        assert_eq!(
            coerce(SymptomKey::Fievre, &json!(token)).unwrap(),
            SymptomValue::Bool(true),
            "token {token}"
        );
    }
    for token in ["false", "0", "NON", "faux", "No", "n"] {
        assert_eq!(
            coerce(SymptomKey::Fievre, &json!(token)).unwrap(),
            SymptomValue::Bool(false),
            "token {token}"
        );
    }
}

#[test]
fn boolean_keys_accept_numeric_truthiness() {
    assert_eq!(coerce(SymptomKey::Toux, &json!(2)).unwrap(), SymptomValue::Bool(true));
    assert_eq!(coerce(SymptomKey::Toux, &json!(0.0)).unwrap(), SymptomValue::Bool(false));
}

#[test]
fn boolean_keys_reject_other_values() {
    for raw in [json!("peut-être"), json!(" oui"), json!(null), json!([true]), json!({})] {
        let err = coerce(SymptomKey::Convulsions, &raw).unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidValue { key: SymptomKey::Convulsions, expected: ValueKind::Bool, .. }),
            "raw {raw}"
        );
    }
}

#[test]
fn numeric_keys_accept_comma_decimal_separator() {
    assert_eq!(
        coerce(SymptomKey::Temperature, &json!("38,5")).unwrap(),
        SymptomValue::Number(38.5)
    );
    assert_eq!(
        coerce(SymptomKey::Temperature, &json!(" 39.2 ")).unwrap(),
        SymptomValue::Number(39.2)
    );
    assert_eq!(
        coerce(SymptomKey::DureeFievreJours, &json!(3)).unwrap(),
        SymptomValue::Number(3.0)
    );
}

#[test]
fn numeric_keys_reject_booleans_garbage_and_non_finite() {
    for raw in [json!(true), json!("chaud"), json!("NaN"), json!("inf"), json!(null)] {
        assert!(
            coerce(SymptomKey::Temperature, &raw).is_err(),
            "raw {raw}"
        );
    }
}

#[test]
fn from_json_ignores_unknown_keys() {
    let set = SymptomSet::from_json(&json!({
        "fievre": true,
        "temperature": "38,7",
        "cephalees": true,
    }))
    .unwrap();

    assert_eq!(set.len(), 2);
    assert_eq!(set.get(SymptomKey::Temperature), Some(SymptomValue::Number(38.7)));
}

#[test]
fn from_json_keeps_null_keys_as_present_but_not_truthy() {
    let set = SymptomSet::from_json(&json!({
        "toux": null,
        "temperature": null,
    }))
    .unwrap();

    assert!(set.contains(SymptomKey::Toux));
    assert!(!set.is_truthy(SymptomKey::Toux));
    assert_eq!(set.get(SymptomKey::Toux), Some(SymptomValue::Bool(false)));
    assert_eq!(set.get(SymptomKey::Temperature), Some(SymptomValue::Number(0.0)));
}

#[test]
fn from_json_rejects_non_objects_and_bad_values() {
    assert!(matches!(
        SymptomSet::from_json(&json!(["fievre"])),
        Err(CoreError::NotAnObject)
    ));
    assert!(matches!(
        SymptomSet::from_json(&json!({"frissons": "souvent"})),
        Err(CoreError::InvalidValue { key: SymptomKey::Frissons, .. })
    ));
}

#[test]
fn absent_keys_are_not_truthy() {
    let set: SymptomSet = [(SymptomKey::Fievre, SymptomValue::Bool(false))]
        .into_iter()
        .collect();
    assert!(!set.is_truthy(SymptomKey::Fievre));
    assert!(!set.is_truthy(SymptomKey::Frissons));
    assert!(set.contains(SymptomKey::Fievre));
}

#[test]
fn symptom_set_serializes_as_flat_object() {
    let set: SymptomSet = [
        (SymptomKey::IncapaciteAManger, SymptomValue::Bool(true)),
        (SymptomKey::Temperature, SymptomValue::Number(38.5)),
    ]
    .into_iter()
    .collect();

    let value = serde_json::to_value(&set).unwrap();
    assert_eq!(value, json!({"temperature": 38.5, "incapacite_a_manger": true}));

    let back: SymptomSet = serde_json::from_value(value).unwrap();
    assert_eq!(back, set);
}
