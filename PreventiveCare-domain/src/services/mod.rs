pub mod metrics;
pub mod recency;
pub mod recommendations;
pub mod grouping;
pub mod screening;

// Domain services
// The rules engine is synchronous and pure; the screening service wraps it
// together with the profile store.

// Re-export the engine entry points and helpers
pub use metrics::{calculate_age, calculate_age_on, calculate_bmi, calculate_pack_years, years_since_quit};
pub use recency::{get_status_from_last_test, is_test_overdue};
pub use recommendations::{generate_screening_recommendations, generate_screening_recommendations_on};
pub use grouping::group_screenings_by_status;

// Re-export service traits and factory functions
pub use screening::{
    create_default_screening_service, SaveProfileRequest, ScreeningService, ScreeningServiceError,
    ScreeningServiceTrait,
};
