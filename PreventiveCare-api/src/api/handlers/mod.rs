pub mod health;
pub mod screenings;
pub mod profiles;

// Tests module
#[cfg(test)]
mod tests;

use axum::extract::rejection::JsonRejection;
use tracing::warn;

use crate::entities::common::ErrorResponse;

// Re-export handlers for easier imports
pub use screenings::{evaluate_grouped_screenings, evaluate_screenings};
pub use profiles::{delete_profile, get_profile, get_profile_screenings, save_profile};
pub use health::health_check;

/// Turn a rejected JSON body into a `bad_request` error
pub(crate) fn reject_body(rejection: JsonRejection) -> ErrorResponse {
    warn!("Rejected request body: {}", rejection.body_text());
    ErrorResponse::bad_request(&rejection.body_text())
}
