use tracing::debug;
use async_trait::async_trait;

use crate::models::profile::ProfileRecord;
use super::errors::RepositoryError;
use super::in_memory::InMemoryStorage;

/// Repository trait for patient profile documents
#[async_trait]
pub trait ProfileRepositoryTrait {
    /// Store a profile document, replacing any previous one for the patient
    async fn upsert(
        &self,
        patient_id: &str,
        document: serde_json::Value,
    ) -> Result<ProfileRecord, RepositoryError>;

    /// Get the profile record for a patient
    async fn get_by_patient_id(&self, patient_id: &str) -> Result<Option<ProfileRecord>, RepositoryError>;

    /// Delete the profile record for a patient
    async fn delete(&self, patient_id: &str) -> Result<(), RepositoryError>;

    /// Number of stored profiles
    async fn count(&self) -> Result<usize, RepositoryError>;
}

/// Repository for patient profiles backed by in-memory storage.
/// Clones share the same underlying storage.
#[derive(Debug, Clone, Default)]
pub struct ProfileRepository {
    storage: InMemoryStorage,
}

impl ProfileRepository {
    /// Create a new repository
    pub fn new() -> Self {
        Self {
            storage: InMemoryStorage::new(),
        }
    }
}

/// Reject keys the store cannot meaningfully look up
fn validate_patient_id(patient_id: &str) -> Result<(), RepositoryError> {
    if patient_id.trim().is_empty() {
        return Err(RepositoryError::Validation(
            "patient id must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl ProfileRepositoryTrait for ProfileRepository {
    async fn upsert(
        &self,
        patient_id: &str,
        document: serde_json::Value,
    ) -> Result<ProfileRecord, RepositoryError> {
        validate_patient_id(patient_id)?;

        let record = self.storage.upsert(patient_id, document).await?;
        debug!(
            "Stored profile for patient {} (record {}, version {})",
            record.patient_id, record.id, record.version
        );
        Ok(record)
    }

    async fn get_by_patient_id(&self, patient_id: &str) -> Result<Option<ProfileRecord>, RepositoryError> {
        validate_patient_id(patient_id)?;
        self.storage.get(patient_id).await
    }

    async fn delete(&self, patient_id: &str) -> Result<(), RepositoryError> {
        validate_patient_id(patient_id)?;

        match self.storage.remove(patient_id).await? {
            Some(record) => {
                debug!("Deleted profile record {} for patient {}", record.id, patient_id);
                Ok(())
            }
            None => Err(RepositoryError::NotFound(patient_id.to_string())),
        }
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        self.storage.count().await
    }
}

#[cfg(any(test, feature = "mock"))]
pub mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use chrono::Utc;
    use uuid::Uuid;

    /// Mock implementation of ProfileRepositoryTrait for testing
    #[derive(Debug, Default)]
    pub struct MockProfileRepository {
        records: Mutex<HashMap<String, ProfileRecord>>,
        should_fail: bool,
    }

    impl MockProfileRepository {
        /// Create a new empty mock repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Configure the mock so every operation fails with a lock error
        pub fn with_failure(mut self) -> Self {
            self.should_fail = true;
            self
        }

        /// Preload a document for a patient
        pub fn with_document(self, patient_id: &str, document: serde_json::Value) -> Self {
            let now = Utc::now();
            let record = ProfileRecord {
                id: Uuid::new_v4().to_string(),
                patient_id: patient_id.to_string(),
                document,
                version: 1,
                created_at: now,
                updated_at: now,
            };
            if let Ok(mut records) = self.records.lock() {
                records.insert(patient_id.to_string(), record);
            }
            self
        }

        fn check_failure(&self) -> Result<(), RepositoryError> {
            if self.should_fail {
                Err(RepositoryError::Lock(
                    "mock is configured to fail".to_string(),
                ))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl ProfileRepositoryTrait for MockProfileRepository {
        async fn upsert(
            &self,
            patient_id: &str,
            document: serde_json::Value,
        ) -> Result<ProfileRecord, RepositoryError> {
            self.check_failure()?;
            validate_patient_id(patient_id)?;

            let mut records = self.records.lock()?;
            let now = Utc::now();
            let record = match records.get(patient_id) {
                Some(existing) => ProfileRecord {
                    document,
                    version: existing.version + 1,
                    updated_at: now,
                    ..existing.clone()
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
            records.insert(patient_id.to_string(), record.clone());
            Ok(record)
        }

        async fn get_by_patient_id(&self, patient_id: &str) -> Result<Option<ProfileRecord>, RepositoryError> {
            self.check_failure()?;
            let records = self.records.lock()?;
            Ok(records.get(patient_id).cloned())
        }

        async fn delete(&self, patient_id: &str) -> Result<(), RepositoryError> {
            self.check_failure()?;
            let mut records = self.records.lock()?;
            records
                .remove(patient_id)
                .map(|_| ())
                .ok_or_else(|| RepositoryError::NotFound(patient_id.to_string()))
        }

        async fn count(&self) -> Result<usize, RepositoryError> {
            self.check_failure()?;
            let records = self.records.lock()?;
            Ok(records.len())
        }
    }
}

#[cfg(test)]
mod repository_tests {
    use super::*;
    use super::tests::MockProfileRepository;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_upsert_assigns_id_and_version() {
        let repo = ProfileRepository::new();

        let record = repo
            .upsert("patient-1", serde_json::json!({ "sexAtBirth": "female" }))
            .await
            .unwrap();

        assert_eq!(record.patient_id, "patient-1");
        assert_eq!(record.version, 1);
        assert!(Uuid::parse_str(&record.id).is_ok());
        assert_eq!(record.created_at, record.updated_at);
    }

    #[tokio::test]
    async fn test_upsert_replaces_document_and_keeps_id() {
        let repo = ProfileRepository::new();

        let first = repo
            .upsert("patient-1", serde_json::json!({ "smokingStatus": "current" }))
            .await
            .unwrap();
        let second = repo
            .upsert("patient-1", serde_json::json!({ "smokingStatus": "former" }))
            .await
            .unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.version, 2);
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(second.document["smokingStatus"], "former");
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let repo = ProfileRepository::new();
        assert!(repo.get_by_patient_id("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = ProfileRepository::new();
        repo.upsert("patient-1", serde_json::json!({})).await.unwrap();

        repo.delete("patient-1").await.unwrap();
        assert!(repo.get_by_patient_id("patient-1").await.unwrap().is_none());

        // Deleting again reports the missing record
        let result = repo.delete("patient-1").await;
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_blank_patient_id_is_rejected() {
        let repo = ProfileRepository::new();
        let result = repo.upsert("   ", serde_json::json!({})).await;
        assert!(matches!(result, Err(RepositoryError::Validation(_))));
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let repo = ProfileRepository::new();
        let clone = repo.clone();

        clone.upsert("patient-2", serde_json::json!({})).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        assert!(repo.get_by_patient_id("patient-2").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_mock_failure_mode() {
        let repo = MockProfileRepository::new().with_failure();
        assert!(matches!(repo.count().await, Err(RepositoryError::Lock(_))));
        assert!(repo.get_by_patient_id("patient-1").await.is_err());
    }

    #[tokio::test]
    async fn test_mock_preloaded_document() {
        let repo = MockProfileRepository::new()
            .with_document("patient-3", serde_json::json!({ "hivRisk": true }));

        let record = repo.get_by_patient_id("patient-3").await.unwrap().unwrap();
        assert_eq!(record.document["hivRisk"], true);
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
