use aws_sdk_s3::Client;
use tracing::debug;
use uuid::Uuid;

use palu_core::models::diagnostic::DiagnosticRecord;
use palu_core::models::session::TriageSession;
use palu_core::s3_keys;
use palu_triage::error::StoreError;
use palu_triage::store::{DiagnosticStore, SessionStore, Version, Versioned};

use crate::objects::{Bucket, Precondition};
use crate::state::{load_json, store_json};

/// Sessions and diagnostics as JSON objects in one bucket.
///
/// The session version is the object's ETag, so two writers that loaded the
/// same version cannot both save.
#[derive(Clone)]
pub struct S3Store {
    bucket: Bucket,
}

impl S3Store {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            bucket: Bucket::new(client, bucket),
        }
    }

    pub fn bucket(&self) -> &str {
        self.bucket.name()
    }
}

impl SessionStore for S3Store {
    async fn create_session(&self, session: &TriageSession) -> Result<Version, StoreError> {
        let key = s3_keys::session(session.id);
        let etag = store_json(&self.bucket, &key, session, Precondition::Absent).await?;
        debug!(key = %key, "session created");
        Ok(etag)
    }

    async fn load_session(&self, id: Uuid) -> Result<Versioned<TriageSession>, StoreError> {
        Ok(load_json::<TriageSession>(&self.bucket, &s3_keys::session(id)).await?)
    }

    async fn save_session(
        &self,
        session: &TriageSession,
        expected: &Version,
    ) -> Result<Version, StoreError> {
        let key = s3_keys::session(session.id);
        let etag = store_json(&self.bucket, &key, session, Precondition::Matches(expected)).await?;
        debug!(key = %key, "session saved");
        Ok(etag)
    }
}

impl DiagnosticStore for S3Store {
    async fn create_diagnostic(&self, record: &DiagnosticRecord) -> Result<(), StoreError> {
        let key = s3_keys::diagnostic(record.patient_id, record.id);
        store_json(&self.bucket, &key, record, Precondition::Absent).await?;
        debug!(key = %key, "diagnostic created");
        Ok(())
    }

    async fn latest_for_patient(
        &self,
        patient_id: Uuid,
    ) -> Result<Option<DiagnosticRecord>, StoreError> {
        let prefix = s3_keys::patient_diagnostics_prefix(Some(patient_id));
        let keys = self.bucket.keys_under(&prefix).await?;

        // Record ids are UUID v7, so the greatest key is the newest record.
        let Some(latest) = keys.iter().max() else {
            return Ok(None);
        };
        let record: Versioned<DiagnosticRecord> = load_json(&self.bucket, latest).await?;
        Ok(Some(record.value))
    }
}
