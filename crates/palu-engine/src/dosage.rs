use palu_core::models::dosage::Dosage;

const REGIMEN: &str = "Artemether-Lumefantrine";
const REFERRAL_REGIMEN: &str = "Référer (poids <5kg)";
const DOSES_PER_DAY: u32 = 2;
const DAYS: u32 = 3;

/// Artemether-Lumefantrine regimen by body weight.
///
/// | weight (kg) | tablets per dose |
/// |-------------|------------------|
/// | < 5         | refer, none      |
/// | 5 – 14      | 1                |
/// | 15 – 24     | 2                |
/// | 25 – 34     | 3                |
/// | ≥ 35        | 4                |
///
/// Every administered band is two doses a day for three days. Band upper
/// bounds are inclusive, so 14.5 kg falls in the 2-tablet band.
pub fn dosage(weight_kg: f64) -> Dosage {
    if weight_kg < 5.0 {
        return Dosage {
            regimen: REFERRAL_REGIMEN.to_string(),
            tablets_per_dose: 0,
            doses_per_day: 0,
            days: 0,
            total_tablets: None,
        };
    }

    let tablets = if weight_kg <= 14.0 {
        1
    } else if weight_kg <= 24.0 {
        2
    } else if weight_kg <= 34.0 {
        3
    } else {
        4
    };

    Dosage {
        regimen: REGIMEN.to_string(),
        tablets_per_dose: tablets,
        doses_per_day: DOSES_PER_DAY,
        days: DAYS,
        total_tablets: Some(tablets * DOSES_PER_DAY * DAYS),
    }
}
