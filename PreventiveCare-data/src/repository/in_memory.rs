use std::sync::{Arc, RwLock};
use std::collections::HashMap;
use chrono::Utc;
use uuid::Uuid;

use crate::models::profile::ProfileRecord;
use super::errors::RepositoryError;

/// In-memory storage for profile documents, keyed by patient id
#[derive(Debug, Clone)]
pub struct InMemoryStorage {
    /// Storage for profile records
    records: Arc<RwLock<HashMap<String, ProfileRecord>>>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a document, or replace the one already stored for the patient
    pub async fn upsert(
        &self,
        patient_id: &str,
        document: serde_json::Value,
    ) -> Result<ProfileRecord, RepositoryError> {
        let mut store = self.records.write()?;
        let now = Utc::now();

        let record = match store.get(patient_id) {
            Some(existing) => ProfileRecord {
                id: existing.id.clone(),
                patient_id: existing.patient_id.clone(),
                document,
                version: existing.version + 1,
                created_at: existing.created_at,
                updated_at: now,
            },
            None => ProfileRecord {
                id: Uuid::new_v4().to_string(),
                patient_id: patient_id.to_string(),
                document,
                version: 1,
                created_at: now,
                updated_at: now,
            },
        };

        store.insert(patient_id.to_string(), record.clone());
        Ok(record)
    }

    /// Get the record stored for a patient
    pub async fn get(&self, patient_id: &str) -> Result<Option<ProfileRecord>, RepositoryError> {
        let store = self.records.read()?;
        Ok(store.get(patient_id).cloned())
    }

    /// Remove the record stored for a patient, returning it if there was one
    pub async fn remove(&self, patient_id: &str) -> Result<Option<ProfileRecord>, RepositoryError> {
        let mut store = self.records.write()?;
        Ok(store.remove(patient_id))
    }

    /// Number of stored records
    pub async fn count(&self) -> Result<usize, RepositoryError> {
        let store = self.records.read()?;
        Ok(store.len())
    }
}
