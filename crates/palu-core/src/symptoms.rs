use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::coerce;
use crate::error::CoreError;

/// The closed symptom vocabulary of the interview.
///
/// Variant order is the vocabulary order, so a [`SymptomSet`] iterates
/// in the same order the keys are documented.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SymptomKey {
    Fievre,
    Temperature,
    DureeFievreJours,
    Frissons,
    Toux,
    Diarrhee,
    Vomissements,
    Convulsions,
    Prostration,
    IncapaciteAManger,
    PaludismeRecent,
}

impl SymptomKey {
    pub const ALL: [SymptomKey; 11] = [
        SymptomKey::Fievre,
        SymptomKey::Temperature,
        SymptomKey::DureeFievreJours,
        SymptomKey::Frissons,
        SymptomKey::Toux,
        SymptomKey::Diarrhee,
        SymptomKey::Vomissements,
        SymptomKey::Convulsions,
        SymptomKey::Prostration,
        SymptomKey::IncapaciteAManger,
        SymptomKey::PaludismeRecent,
    ];

    /// Wire name of the key, as used in payloads and stored sessions.
    pub fn as_str(&self) -> &'static str {
        match self {
            SymptomKey::Fievre => "fievre",
            SymptomKey::Temperature => "temperature",
            SymptomKey::DureeFievreJours => "duree_fievre_jours",
            SymptomKey::Frissons => "frissons",
            SymptomKey::Toux => "toux",
            SymptomKey::Diarrhee => "diarrhee",
            SymptomKey::Vomissements => "vomissements",
            SymptomKey::Convulsions => "convulsions",
            SymptomKey::Prostration => "prostration",
            SymptomKey::IncapaciteAManger => "incapacite_a_manger",
            SymptomKey::PaludismeRecent => "paludisme_recent",
        }
    }

    /// The value type an answer to this key must coerce to.
    pub fn kind(&self) -> ValueKind {
        match self {
            SymptomKey::Temperature | SymptomKey::DureeFievreJours => ValueKind::Number,
            _ => ValueKind::Bool,
        }
    }

    /// Look up a key by its exact wire name.
    pub fn parse(name: &str) -> Option<SymptomKey> {
        SymptomKey::ALL.into_iter().find(|k| k.as_str() == name)
    }

    /// Question text shown to the relais during a guided interview.
    pub fn prompt(&self) -> &'static str {
        match self {
            SymptomKey::Fievre => "Le patient a-t-il de la fièvre ?",
            SymptomKey::Temperature => "Température mesurée (°C) ?",
            SymptomKey::DureeFievreJours => "Depuis combien de jours dure la fièvre ?",
            SymptomKey::Frissons => "Le patient a-t-il des frissons ?",
            SymptomKey::Toux => "Le patient tousse-t-il ?",
            SymptomKey::Diarrhee => "Le patient a-t-il la diarrhée ?",
            SymptomKey::Vomissements => "Le patient vomit-il ?",
            SymptomKey::Convulsions => "Le patient a-t-il eu des convulsions ?",
            SymptomKey::Prostration => "Le patient est-il prostré ?",
            SymptomKey::IncapaciteAManger => "Le patient est-il incapable de manger ou boire ?",
            SymptomKey::PaludismeRecent => "Le patient a-t-il eu un paludisme récemment ?",
        }
    }
}

impl fmt::Display for SymptomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SymptomKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SymptomKey::parse(s).ok_or_else(|| CoreError::UnknownSymptom(s.to_string()))
    }
}

/// Declared type of a symptom answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ValueKind {
    Bool,
    Number,
}

impl ValueKind {
    /// The non-truthy value of this kind, stored for an explicit `null`.
    pub fn unset(self) -> SymptomValue {
        match self {
            ValueKind::Bool => SymptomValue::Bool(false),
            ValueKind::Number => SymptomValue::Number(0.0),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Bool => f.write_str("boolean"),
            ValueKind::Number => f.write_str("numeric"),
        }
    }
}

/// A coerced answer: a JSON bool or a JSON number on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum SymptomValue {
    Bool(bool),
    Number(f64),
}

impl SymptomValue {
    /// Numbers count as present when non-zero.
    pub fn is_truthy(&self) -> bool {
        match self {
            SymptomValue::Bool(b) => *b,
            SymptomValue::Number(n) => *n != 0.0,
        }
    }
}

impl From<bool> for SymptomValue {
    fn from(value: bool) -> Self {
        SymptomValue::Bool(value)
    }
}

impl From<f64> for SymptomValue {
    fn from(value: f64) -> Self {
        SymptomValue::Number(value)
    }
}

/// Answers keyed by symptom. A key that is absent is unknown, not "no".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct SymptomSet(BTreeMap<SymptomKey, SymptomValue>);

impl SymptomSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw JSON symptom payload.
    ///
    /// Unrecognised keys are ignored. A `null` value counts as present but
    /// not truthy, so the key is not suggested as a next question.
    /// Strings are coerced with the same rules as interactive answers.
    pub fn from_json(payload: &serde_json::Value) -> Result<Self, CoreError> {
        let object = payload.as_object().ok_or(CoreError::NotAnObject)?;

        let mut set = SymptomSet::new();
        for (name, raw) in object {
            let Some(key) = SymptomKey::parse(name) else {
                continue;
            };
            let value = if raw.is_null() {
                key.kind().unset()
            } else {
                coerce::coerce(key, raw)?
            };
            set.insert(key, value);
        }
        Ok(set)
    }

    /// Insert or overwrite an answer, returning the previous value.
    pub fn insert(&mut self, key: SymptomKey, value: SymptomValue) -> Option<SymptomValue> {
        self.0.insert(key, value)
    }

    pub fn get(&self, key: SymptomKey) -> Option<SymptomValue> {
        self.0.get(&key).copied()
    }

    pub fn contains(&self, key: SymptomKey) -> bool {
        self.0.contains_key(&key)
    }

    /// True only when the key is present and its value is truthy.
    pub fn is_truthy(&self, key: SymptomKey) -> bool {
        self.get(key).is_some_and(|v| v.is_truthy())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymptomKey, SymptomValue)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = SymptomKey> + '_ {
        self.0.keys().copied()
    }

    /// Every key of `other` is present in `self` with the same value.
    pub fn is_superset_of(&self, other: &SymptomSet) -> bool {
        other.iter().all(|(k, v)| self.get(k) == Some(v))
    }
}

impl FromIterator<(SymptomKey, SymptomValue)> for SymptomSet {
    fn from_iter<I: IntoIterator<Item = (SymptomKey, SymptomValue)>>(iter: I) -> Self {
        SymptomSet(iter.into_iter().collect())
    }
}

impl Extend<(SymptomKey, SymptomValue)> for SymptomSet {
    fn extend<I: IntoIterator<Item = (SymptomKey, SymptomValue)>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}
