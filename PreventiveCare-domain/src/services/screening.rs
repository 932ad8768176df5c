use thiserror::Error;
use tracing::{debug, info};
use validator::Validate;
use async_trait::async_trait;
use serde::Deserialize;

use crate::entities::conversions;
use crate::entities::profile::{PreventiveCareProfile, StoredProfile};
use crate::entities::screening::{GroupedScreenings, ScreeningItem};
use crate::services::grouping::group_screenings_by_status;
use crate::services::recommendations::generate_screening_recommendations;
use preventive_care_data::repository::{ProfileRepositoryTrait, RepositoryError};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Screening service errors
#[derive(Debug, Error)]
pub enum ScreeningServiceError {
    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Not found error
    #[error("Profile not found: {0}")]
    NotFound(String),

    /// Repository error
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// A stored profile could not be encoded or decoded
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Request to store a patient's profile
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct SaveProfileRequest {
    #[validate(length(min = 1, max = 128, message = "Patient id must be between 1 and 128 characters"))]
    pub patient_id: String,

    pub profile: PreventiveCareProfile,
}

/// Trait for screening service operations
#[async_trait]
pub trait ScreeningServiceTrait: Send + Sync {
    /// Validate a save profile request
    fn validate_save_request(&self, request: &SaveProfileRequest) -> Result<(), ScreeningServiceError>;

    /// Screening checklist for a profile, sorted by status
    fn evaluate(&self, profile: &PreventiveCareProfile) -> Vec<ScreeningItem>;

    /// Screening checklist for a profile, bucketed by status
    fn evaluate_grouped(&self, profile: &PreventiveCareProfile) -> GroupedScreenings;

    /// Store a profile, replacing any previous one for the patient
    async fn save_profile(&self, request: SaveProfileRequest) -> Result<StoredProfile, ScreeningServiceError>;

    /// Get the stored profile for a patient
    async fn get_profile(&self, patient_id: &str) -> Result<StoredProfile, ScreeningServiceError>;

    /// Delete the stored profile for a patient
    async fn delete_profile(&self, patient_id: &str) -> Result<(), ScreeningServiceError>;

    /// Load a patient's stored profile and evaluate it
    async fn evaluate_stored(
        &self,
        patient_id: &str,
    ) -> Result<(StoredProfile, Vec<ScreeningItem>), ScreeningServiceError>;

    /// Number of stored profiles
    async fn profile_count(&self) -> Result<usize, ScreeningServiceError>;
}

/// Screening service for domain logic
pub struct ScreeningService<R: ProfileRepositoryTrait> {
    repository: R,
}

impl<R: ProfileRepositoryTrait> ScreeningService<R> {
    /// Create a new screening service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Map repository errors to service errors
    fn map_repo_error(&self, err: RepositoryError) -> ScreeningServiceError {
        match err {
            RepositoryError::NotFound(msg) => ScreeningServiceError::NotFound(msg),
            RepositoryError::Validation(msg) => ScreeningServiceError::ValidationError(msg),
            RepositoryError::Serialization(e) => ScreeningServiceError::SerializationError(e),
            _ => ScreeningServiceError::RepositoryError(err.to_string()),
        }
    }
}

#[async_trait]
impl<R: ProfileRepositoryTrait + Send + Sync> ScreeningServiceTrait for ScreeningService<R> {
    fn validate_save_request(&self, request: &SaveProfileRequest) -> Result<(), ScreeningServiceError> {
        if let Err(validation_errors) = request.validate() {
            let error_message = validation_errors
                .field_errors()
                .iter()
                .map(|(field, errors)| {
                    let error_msgs: Vec<String> = errors
                        .iter()
                        .map(|err| match &err.message {
                            Some(msg) => msg.to_string(),
                            None => format!("Invalid {}", field),
                        })
                        .collect();
                    format!("{}: {}", field, error_msgs.join(", "))
                })
                .collect::<Vec<String>>()
                .join("; ");

            return Err(ScreeningServiceError::ValidationError(error_message));
        }

        if request.patient_id.trim().is_empty() {
            return Err(ScreeningServiceError::ValidationError(
                "patient_id: Patient id must not be blank".to_string(),
            ));
        }

        Ok(())
    }

    fn evaluate(&self, profile: &PreventiveCareProfile) -> Vec<ScreeningItem> {
        generate_screening_recommendations(profile)
    }

    fn evaluate_grouped(&self, profile: &PreventiveCareProfile) -> GroupedScreenings {
        group_screenings_by_status(generate_screening_recommendations(profile))
    }

    async fn save_profile(&self, request: SaveProfileRequest) -> Result<StoredProfile, ScreeningServiceError> {
        self.validate_save_request(&request)?;

        let document = conversions::convert_to_data_document(&request.profile)?;

        let record = self
            .repository
            .upsert(&request.patient_id, document)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        info!(
            "Saved profile for patient {} (version {})",
            record.patient_id, record.version
        );

        Ok(conversions::convert_to_domain_stored_profile(record)?)
    }

    async fn get_profile(&self, patient_id: &str) -> Result<StoredProfile, ScreeningServiceError> {
        let record = self
            .repository
            .get_by_patient_id(patient_id)
            .await
            .map_err(|e| self.map_repo_error(e))?
            .ok_or_else(|| ScreeningServiceError::NotFound(patient_id.to_string()))?;

        Ok(conversions::convert_to_domain_stored_profile(record)?)
    }

    async fn delete_profile(&self, patient_id: &str) -> Result<(), ScreeningServiceError> {
        self.repository
            .delete(patient_id)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        info!("Deleted profile for patient {}", patient_id);
        Ok(())
    }

    async fn evaluate_stored(
        &self,
        patient_id: &str,
    ) -> Result<(StoredProfile, Vec<ScreeningItem>), ScreeningServiceError> {
        let stored = self.get_profile(patient_id).await?;
        let items = self.evaluate(&stored.profile);
        debug!(
            "Evaluated stored profile for patient {}: {} screenings",
            patient_id,
            items.len()
        );
        Ok((stored, items))
    }

    async fn profile_count(&self) -> Result<usize, ScreeningServiceError> {
        self.repository
            .count()
            .await
            .map_err(|e| self.map_repo_error(e))
    }
}

/// Create a default screening service using the repository from data layer
pub fn create_default_screening_service() -> impl ScreeningServiceTrait {
    let repository = preventive_care_data::repository::ProfileRepository::new();
    ScreeningService::new(repository)
}
