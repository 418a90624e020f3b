//! In-process store backed by `DashMap`, for local interviews and tests.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use palu_core::models::diagnostic::DiagnosticRecord;
use palu_core::models::session::TriageSession;

use crate::error::StoreError;
use crate::store::{DiagnosticStore, SessionStore, Version, Versioned};

struct StoredSession {
    session: TriageSession,
    revision: u64,
}

/// Thread-safe in-memory sessions and diagnostics. Clones share storage.
#[derive(Clone, Default)]
pub struct MemoryStore {
    sessions: Arc<DashMap<Uuid, StoredSession>>,
    diagnostics: Arc<DashMap<Uuid, DiagnosticRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn diagnostic_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// All diagnostics for a session, oldest first.
    pub fn diagnostics_for_session(&self, session_id: Uuid) -> Vec<DiagnosticRecord> {
        let mut records: Vec<DiagnosticRecord> = self
            .diagnostics
            .iter()
            .filter(|r| r.session_id == session_id)
            .map(|r| r.value().clone())
            .collect();
        records.sort_by_key(|r| r.id);
        records
    }
}

impl SessionStore for MemoryStore {
    async fn create_session(&self, session: &TriageSession) -> Result<Version, StoreError> {
        match self.sessions.entry(session.id) {
            Entry::Occupied(_) => Err(StoreError::Conflict(session.id.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(StoredSession {
                    session: session.clone(),
                    revision: 0,
                });
                Ok(0.to_string())
            }
        }
    }

    async fn load_session(&self, id: Uuid) -> Result<Versioned<TriageSession>, StoreError> {
        let stored = self
            .sessions
            .get(&id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(Versioned {
            value: stored.session.clone(),
            version: stored.revision.to_string(),
        })
    }

    async fn save_session(
        &self,
        session: &TriageSession,
        expected: &Version,
    ) -> Result<Version, StoreError> {
        // The shard write lock is held for the compare and the swap.
        let mut stored = self
            .sessions
            .get_mut(&session.id)
            .ok_or_else(|| StoreError::NotFound(session.id.to_string()))?;

        if stored.revision.to_string() != *expected {
            return Err(StoreError::Conflict(session.id.to_string()));
        }
        stored.revision += 1;
        stored.session = session.clone();
        Ok(stored.revision.to_string())
    }
}

impl DiagnosticStore for MemoryStore {
    async fn create_diagnostic(&self, record: &DiagnosticRecord) -> Result<(), StoreError> {
        self.diagnostics.insert(record.id, record.clone());
        Ok(())
    }

    async fn latest_for_patient(
        &self,
        patient_id: Uuid,
    ) -> Result<Option<DiagnosticRecord>, StoreError> {
        Ok(self
            .diagnostics
            .iter()
            .filter(|r| r.patient_id == Some(patient_id))
            .max_by_key(|r| r.id)
            .map(|r| r.value().clone()))
    }
}
