//! Domain layer health check functionality
//! This module provides health check services for the application

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use tracing::warn;

use crate::services::screening::ScreeningServiceTrait;

/// System health status
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// At least one component is not functioning
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    /// Component is functioning normally
    Healthy,
    /// Component is not functioning
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    /// Status of the component
    pub status: ComponentStatus,
    /// Optional details about the component status
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    /// Overall system status
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;

    /// Check that the profile store answers.
    /// Returns the number of stored profiles, or an error if the store is unusable.
    async fn check_profile_store(&self) -> Result<usize, String>;
}

/// Health service that probes the profile store through the screening service
pub struct HealthService {
    screening: Arc<dyn ScreeningServiceTrait>,
}

impl HealthService {
    pub fn new(screening: Arc<dyn ScreeningServiceTrait>) -> Self {
        Self { screening }
    }
}

#[async_trait]
impl HealthServiceTrait for HealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let store_component = match self.check_profile_store().await {
            Ok(count) => HealthComponent {
                status: ComponentStatus::Healthy,
                details: Some(format!("{} profiles stored", count)),
            },
            Err(e) => {
                warn!("Profile store health check failed: {}", e);
                HealthComponent {
                    status: ComponentStatus::Unhealthy,
                    details: Some(e),
                }
            }
        };

        // The rules engine is pure and has nothing to probe
        let engine_component = HealthComponent {
            status: ComponentStatus::Healthy,
            details: None,
        };

        let overall_status = if store_component.status == ComponentStatus::Unhealthy {
            SystemStatus::Unhealthy
        } else {
            SystemStatus::Healthy
        };

        SystemHealth {
            status: overall_status,
            components: vec![
                ("profile_store".to_string(), store_component),
                ("rules_engine".to_string(), engine_component),
            ]
            .into_iter()
            .collect(),
        }
    }

    async fn check_profile_store(&self) -> Result<usize, String> {
        self.screening
            .profile_count()
            .await
            .map_err(|e| format!("Profile store error: {}", e))
    }
}

/// Factory function to create a health service over a screening service
pub fn create_health_service(screening: Arc<dyn ScreeningServiceTrait>) -> Arc<dyn HealthServiceTrait> {
    Arc::new(HealthService::new(screening))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::screening::ScreeningService;
    use crate::testing::MockProfileRepository;

    #[tokio::test]
    async fn test_get_system_health() {
        let screening = Arc::new(ScreeningService::new(
            MockProfileRepository::new().with_document("patient-1", serde_json::json!({})),
        ));
        let health = HealthService::new(screening).get_system_health().await;

        assert_eq!(health.status, SystemStatus::Healthy);
        let store = health.components.get("profile_store").unwrap();
        assert_eq!(store.status, ComponentStatus::Healthy);
        assert_eq!(store.details.as_deref(), Some("1 profiles stored"));
        assert!(health.components.contains_key("rules_engine"));
    }

    #[tokio::test]
    async fn test_failing_store_is_unhealthy() {
        let screening = Arc::new(ScreeningService::new(MockProfileRepository::new().with_failure()));
        let service = create_health_service(screening);

        let health = service.get_system_health().await;
        assert_eq!(health.status, SystemStatus::Unhealthy);
        assert_eq!(
            health.components.get("profile_store").unwrap().status,
            ComponentStatus::Unhealthy
        );
        assert!(service.check_profile_store().await.is_err());
    }
}
