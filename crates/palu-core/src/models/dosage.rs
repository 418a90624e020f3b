use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Weight-banded ACT regimen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Dosage {
    pub regimen: String,
    pub tablets_per_dose: u32,
    pub doses_per_day: u32,
    pub days: u32,
    /// Absent in the referral band, where nothing is administered.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub total_tablets: Option<u32>,
}

impl Dosage {
    pub fn is_referral(&self) -> bool {
        self.tablets_per_dose == 0
    }
}
