use std::sync::Arc;
use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{info, instrument};

use preventive_care_domain::entities::PreventiveCareProfile;
use preventive_care_domain::services::{create_default_screening_service, ScreeningServiceTrait};

use crate::api::handlers::reject_body;
use crate::entities::common::ErrorResponse;
use crate::entities::screening::{GroupedScreeningReport, ScreeningReport};

/// Service type for dependency injection
pub type ScreeningService = Arc<dyn ScreeningServiceTrait>;

/// Create a default service for the handlers to use
pub fn create_service() -> ScreeningService {
    Arc::new(create_default_screening_service())
}

/// Evaluate a profile and return its screening checklist
#[utoipa::path(
    post,
    path = "/api/v1/screenings",
    request_body = PreventiveCareProfile,
    responses(
        (status = 200, description = "Screening checklist sorted by status", body = ScreeningReport),
        (status = 400, description = "Malformed profile", body = ErrorResponse),
    ),
    tag = "screenings"
)]
#[instrument(skip(service, body))]
pub async fn evaluate_screenings(
    State(service): State<ScreeningService>,
    body: Result<Json<PreventiveCareProfile>, JsonRejection>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let Json(profile) = body.map_err(reject_body)?;
    let screenings = service.evaluate(&profile);
    info!("Evaluated profile: {} screenings", screenings.len());

    Ok((StatusCode::OK, Json(ScreeningReport::new(&profile, screenings))))
}

/// Evaluate a profile and return its screenings bucketed by status
#[utoipa::path(
    post,
    path = "/api/v1/screenings/grouped",
    request_body = PreventiveCareProfile,
    responses(
        (status = 200, description = "Screenings grouped by status", body = GroupedScreeningReport),
        (status = 400, description = "Malformed profile", body = ErrorResponse),
    ),
    tag = "screenings"
)]
#[instrument(skip(service, body))]
pub async fn evaluate_grouped_screenings(
    State(service): State<ScreeningService>,
    body: Result<Json<PreventiveCareProfile>, JsonRejection>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let Json(profile) = body.map_err(reject_body)?;
    let groups = service.evaluate_grouped(&profile);
    info!(
        "Evaluated profile: {} due now, {} total",
        groups.due_now.len(),
        groups.len()
    );

    Ok((StatusCode::OK, Json(GroupedScreeningReport::new(&profile, groups))))
}
