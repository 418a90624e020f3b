use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Outcome of a malaria rapid diagnostic test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum RdtResult {
    Pos,
    Neg,
    Ind,
}

impl RdtResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            RdtResult::Pos => "POS",
            RdtResult::Neg => "NEG",
            RdtResult::Ind => "IND",
        }
    }
}

impl fmt::Display for RdtResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RdtResult {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "POS" => Ok(RdtResult::Pos),
            "NEG" => Ok(RdtResult::Neg),
            "IND" => Ok(RdtResult::Ind),
            _ => Err(CoreError::InvalidRdtResult(s.to_string())),
        }
    }
}
