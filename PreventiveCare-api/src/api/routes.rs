use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Extension, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use preventive_care_domain::health::create_health_service;
use crate::api::handlers::{health, profiles, screenings};
use crate::config::AppConfig;
use crate::openapi::configure_swagger_routes;

/// Create the application router with the default in-memory services
pub fn create_app(config: &AppConfig) -> Router {
    debug!("Creating application router");

    let screening_service = screenings::create_service();
    let health_service = create_health_service(screening_service.clone());

    health::set_environment(&config.environment);
    health::initialize_server_start_time();

    create_app_with_services(screening_service, health_service, &config.cors_allow_origin)
}

/// Create the application router around the given services
pub fn create_app_with_services(
    screening_service: screenings::ScreeningService,
    health_service: health::HealthService,
    cors_allow_origin: &str,
) -> Router {
    let api_routes = Router::new()
        // Define specific routes before parametrized routes to avoid conflicts
        .route("/screenings/grouped", post(screenings::evaluate_grouped_screenings))
        .route("/screenings", post(screenings::evaluate_screenings))
        .route("/profiles/:patient_id/screenings", get(profiles::get_profile_screenings))
        .route(
            "/profiles/:patient_id",
            put(profiles::save_profile)
                .get(profiles::get_profile)
                .delete(profiles::delete_profile),
        );

    debug!("API routes configured");

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .layer(Extension(health_service));

    let app = Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .with_state(screening_service);

    // Configure the Swagger UI using the helper function
    let app = add_swagger_ui(app);

    debug!("Swagger UI merged");

    app.layer(cors_layer(cors_allow_origin))
        .layer(TraceLayer::new_for_http())
}

/// CORS policy for a single allowed origin, or any origin for `*`
fn cors_layer(allow_origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allow_origin == "*" {
        return layer.allow_origin(Any);
    }

    match allow_origin.parse::<HeaderValue>() {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            warn!("Ignoring invalid CORS origin {:?}; allowing any origin", allow_origin);
            layer.allow_origin(Any)
        }
    }
}

/// Add Swagger UI to the router
pub fn add_swagger_ui(app: Router) -> Router {
    // Get Swagger UI routes
    let swagger = configure_swagger_routes();

    // Merge Swagger UI with the app router
    app.merge(swagger)
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Arc;
    use preventive_care_domain::services::ScreeningService;
    use preventive_care_domain::testing::MockProfileRepository;

    /// Create a test application over a fresh in-memory store
    pub fn create_test_app() -> Router {
        create_app(&AppConfig::default())
    }

    /// Create a test application over the given repository
    pub fn create_test_app_with_repository(repository: MockProfileRepository) -> Router {
        let screening_service: screenings::ScreeningService = Arc::new(ScreeningService::new(repository));
        let health_service = create_health_service(screening_service.clone());
        create_app_with_services(screening_service, health_service, "*")
    }
}
