#[cfg(test)]
mod health_tests {
    use std::sync::Arc;
    use axum::http::StatusCode;

    use preventive_care_domain::health::{ComponentStatus, HealthServiceTrait, SystemStatus};
    use preventive_care_domain::services::ScreeningService;
    use preventive_care_domain::testing::{MockHealthService, MockProfileRepository};

    use crate::api::handlers::screenings;
    use crate::api::handlers::tests::send;
    use crate::api::routes::create_app_with_services;
    use crate::api::routes::tests::{create_test_app, create_test_app_with_repository};

    #[tokio::test]
    async fn test_health_endpoint_ok() {
        let (status, body) = send(create_test_app(), "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(body["components"]["profile_store"]["status"], "ok");
        assert_eq!(body["components"]["profile_store"]["message"], "0 profiles stored");
        assert_eq!(body["components"]["rules_engine"]["status"], "ok");
        assert!(body["components"].get("additional").is_none());
    }

    #[tokio::test]
    async fn test_health_endpoint_reports_store_failure() {
        let app = create_test_app_with_repository(MockProfileRepository::new().with_failure());
        let (status, body) = send(app, "GET", "/health", None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "error");
        assert_eq!(body["components"]["profile_store"]["status"], "error");
    }

    #[tokio::test]
    async fn test_health_endpoint_lists_additional_components() {
        let screening_service: screenings::ScreeningService =
            Arc::new(ScreeningService::new(MockProfileRepository::new()));
        let health_service = Arc::new(MockHealthService::new().with_component(
            "reminder_queue",
            ComponentStatus::Unhealthy,
            Some("Queue is not draining".to_string()),
        ));
        let app = create_app_with_services(screening_service, health_service, "*");

        let (status, body) = send(app, "GET", "/health", None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let queue = &body["components"]["additional"]["reminder_queue"];
        assert_eq!(queue["status"], "error");
        assert_eq!(queue["message"], "Queue is not draining");
    }

    #[tokio::test]
    async fn test_mock_health_service_unhealthy_store() {
        let service: Arc<dyn HealthServiceTrait> = Arc::new(MockHealthService::new().with_unhealthy_store());

        let health = service.get_system_health().await;
        assert_eq!(health.status, SystemStatus::Unhealthy);

        let store = health.components.get("profile_store").expect("profile store component should exist");
        assert_eq!(store.status, ComponentStatus::Unhealthy);
        assert_eq!(store.details.as_deref(), Some("Profile store is unavailable"));

        let check = service.check_profile_store().await;
        assert_eq!(check.unwrap_err(), "Profile store is unavailable");
    }
}
