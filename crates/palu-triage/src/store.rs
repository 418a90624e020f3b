//! Persistence seam.
//!
//! Session writes are conditional: [`SessionStore::save_session`] must fail
//! with [`StoreError::Conflict`] when the stored session changed since the
//! version the caller loaded. That gives each session at most one
//! successful writer per version.

use std::future::Future;

use uuid::Uuid;

use palu_core::models::diagnostic::DiagnosticRecord;
use palu_core::models::session::TriageSession;

use crate::error::StoreError;

/// Opaque version token (an S3 ETag, or a revision counter).
pub type Version = String;

/// A stored value together with the version it was read at.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub value: T,
    pub version: Version,
}

pub trait SessionStore: Send + Sync {
    /// Store a new session. Fails with `Conflict` if the id is taken.
    fn create_session(
        &self,
        session: &TriageSession,
    ) -> impl Future<Output = Result<Version, StoreError>> + Send;

    fn load_session(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Versioned<TriageSession>, StoreError>> + Send;

    /// Replace a session if it is still at `expected`. Returns the new version.
    fn save_session(
        &self,
        session: &TriageSession,
        expected: &Version,
    ) -> impl Future<Output = Result<Version, StoreError>> + Send;
}

pub trait DiagnosticStore: Send + Sync {
    fn create_diagnostic(
        &self,
        record: &DiagnosticRecord,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Most recent diagnostic recorded for a patient.
    fn latest_for_patient(
        &self,
        patient_id: Uuid,
    ) -> impl Future<Output = Result<Option<DiagnosticRecord>, StoreError>> + Send;
}
