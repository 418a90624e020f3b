use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The three suspected conditions the engine scores independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum HypothesisCode {
    PaluSimple,
    PaluGrave,
    AutreInfection,
}

impl HypothesisCode {
    /// Enumeration order. Ranking ties keep this order.
    pub const ALL: [HypothesisCode; 3] = [
        HypothesisCode::PaluSimple,
        HypothesisCode::PaluGrave,
        HypothesisCode::AutreInfection,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HypothesisCode::PaluSimple => "PALU_SIMPLE",
            HypothesisCode::PaluGrave => "PALU_GRAVE",
            HypothesisCode::AutreInfection => "AUTRE_INFECTION",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HypothesisCode::PaluSimple => "Paludisme simple",
            HypothesisCode::PaluGrave => "Paludisme grave",
            HypothesisCode::AutreInfection => "Autre infection fébrile",
        }
    }

    /// Either form of malaria.
    pub fn is_malaria(&self) -> bool {
        matches!(self, HypothesisCode::PaluSimple | HypothesisCode::PaluGrave)
    }
}

impl fmt::Display for HypothesisCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Hypothesis {
    pub code: HypothesisCode,
    pub label: String,
    /// Normalized confidence in `[0, 1]`, two decimals.
    pub score: f64,
}
