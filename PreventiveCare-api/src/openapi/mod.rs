use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Screening endpoints
        crate::api::handlers::screenings::evaluate_screenings,
        crate::api::handlers::screenings::evaluate_grouped_screenings,

        // Profile endpoints
        crate::api::handlers::profiles::save_profile,
        crate::api::handlers::profiles::get_profile,
        crate::api::handlers::profiles::delete_profile,
        crate::api::handlers::profiles::get_profile_screenings
    ),
    components(
        schemas(
            // Domain entities
            preventive_care_domain::entities::PreventiveCareProfile,
            preventive_care_domain::entities::SexAtBirth,
            preventive_care_domain::entities::SmokingStatus,
            preventive_care_domain::entities::AlcoholFrequency,
            preventive_care_domain::entities::LastTest,
            preventive_care_domain::entities::StoredProfile,
            preventive_care_domain::entities::ScreeningItem,
            preventive_care_domain::entities::ScreeningKind,
            preventive_care_domain::entities::ScreeningStatus,
            preventive_care_domain::entities::GroupedScreenings,
            preventive_care_domain::entities::StatusCounts,

            // API entities
            crate::entities::common::ErrorResponse,
            crate::entities::screening::ScreeningReport,
            crate::entities::screening::GroupedScreeningReport,
            crate::entities::screening::ScreeningQueryParams,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentStatus,
            crate::api::handlers::health::ComponentHealthStatus
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "screenings", description = "Evaluate a profile without storing it"),
        (name = "profiles", description = "Stored patient profiles and their screenings")
    ),
    info(
        title = "PreventiveCare API",
        version = "0.1.0",
        description = "Preventive screening recommendations from a patient health profile",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;
