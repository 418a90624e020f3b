//! Coercion of raw answer values to a symptom's declared type.
//!
//! Field workers submit answers from forms and SMS relays, so a boolean may
//! arrive as `true`, `"oui"`, `"Y"` or `1`, and a temperature as `"38,5"`.

use serde_json::Value;

use crate::error::CoreError;
use crate::symptoms::{SymptomKey, SymptomValue, ValueKind};

const TRUE_TOKENS: [&str; 6] = ["true", "1", "oui", "vrai", "yes", "y"];
const FALSE_TOKENS: [&str; 6] = ["false", "0", "non", "faux", "no", "n"];

/// Coerce `raw` to the type declared by `key`.
pub fn coerce(key: SymptomKey, raw: &Value) -> Result<SymptomValue, CoreError> {
    let expected = key.kind();
    let coerced = match expected {
        ValueKind::Bool => to_bool(raw).map(SymptomValue::Bool),
        ValueKind::Number => to_number(raw).map(SymptomValue::Number),
    };

    coerced.ok_or_else(|| CoreError::InvalidValue {
        key,
        expected,
        value: raw.to_string(),
    })
}

/// Booleans, case-insensitive yes/no tokens (French and English), or
/// numeric truthiness.
pub fn to_bool(raw: &Value) -> Option<bool> {
    match raw {
        Value::Bool(b) => Some(*b),
        Value::String(s) => {
            let token = s.to_lowercase();
            if TRUE_TOKENS.contains(&token.as_str()) {
                Some(true)
            } else if FALSE_TOKENS.contains(&token.as_str()) {
                Some(false)
            } else {
                None
            }
        }
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        _ => None,
    }
}

/// Numbers, or strings using either `.` or `,` as the decimal separator.
/// Non-finite values are rejected since they cannot be stored as JSON.
pub fn to_number(raw: &Value) -> Option<f64> {
    let value = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.replace(',', ".").trim().parse::<f64>().ok()?,
        _ => return None,
    };
    value.is_finite().then_some(value)
}
