//! palu-core
//!
//! Pure domain types, answer coercion, and S3 key conventions.
//! No AWS SDK dependency. This is the shared vocabulary of the triage system.

pub mod coerce;
pub mod error;
pub mod models;
pub mod s3_keys;
pub mod symptoms;
