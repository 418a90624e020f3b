//! S3 key/path conventions.
//!
//! Pure string functions with no AWS SDK dependency. These define the
//! canonical layout of objects in the triage bucket.

use uuid::Uuid;

pub const SESSIONS_PREFIX: &str = "sessions/";

pub const DIAGNOSTICS_PREFIX: &str = "diagnostics/";

/// Folder for diagnostics of sessions started without a patient link.
pub const UNLINKED_PATIENT: &str = "_unlinked";

pub fn session(id: Uuid) -> String {
    format!("{SESSIONS_PREFIX}{id}.json")
}

pub fn patient_diagnostics_prefix(patient_id: Option<Uuid>) -> String {
    match patient_id {
        Some(id) => format!("{DIAGNOSTICS_PREFIX}{id}/"),
        None => format!("{DIAGNOSTICS_PREFIX}{UNLINKED_PATIENT}/"),
    }
}

pub fn diagnostic(patient_id: Option<Uuid>, id: Uuid) -> String {
    format!("{}{id}.json", patient_diagnostics_prefix(patient_id))
}
