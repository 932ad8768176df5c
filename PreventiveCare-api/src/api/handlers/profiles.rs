use axum::{
    extract::{rejection::JsonRejection, Json, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info, instrument, warn};

use preventive_care_domain::entities::{PreventiveCareProfile, StoredProfile};
use preventive_care_domain::services::{group_screenings_by_status, SaveProfileRequest, ScreeningServiceError};

use crate::api::handlers::reject_body;
use crate::api::handlers::screenings::ScreeningService;
use crate::entities::common::ErrorResponse;
use crate::entities::screening::{GroupedScreeningReport, ScreeningQueryParams, ScreeningReport};

/// Log a service failure at a level matching its severity and convert it
fn service_error(patient_id: &str, err: ScreeningServiceError) -> ErrorResponse {
    match &err {
        ScreeningServiceError::NotFound(_) => info!("No profile stored for patient {}", patient_id),
        ScreeningServiceError::ValidationError(msg) => warn!("Rejected profile request: {}", msg),
        _ => error!("Profile store failure for patient {}: {}", patient_id, err),
    }
    ErrorResponse::from(err)
}

/// Store or replace a patient's profile
#[utoipa::path(
    put,
    path = "/api/v1/profiles/{patient_id}",
    params(
        ("patient_id" = String, Path, description = "Patient identifier (1-128 characters)")
    ),
    request_body = PreventiveCareProfile,
    responses(
        (status = 200, description = "Profile stored", body = StoredProfile),
        (status = 400, description = "Invalid patient id or malformed profile", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "profiles"
)]
#[instrument(skip(service, body))]
pub async fn save_profile(
    State(service): State<ScreeningService>,
    Path(patient_id): Path<String>,
    body: Result<Json<PreventiveCareProfile>, JsonRejection>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let Json(profile) = body.map_err(reject_body)?;
    info!("Saving profile for patient {}", patient_id);

    let request = SaveProfileRequest {
        patient_id: patient_id.clone(),
        profile,
    };
    let stored = service
        .save_profile(request)
        .await
        .map_err(|e| service_error(&patient_id, e))?;

    Ok((StatusCode::OK, Json(stored)))
}

/// Get a patient's stored profile
#[utoipa::path(
    get,
    path = "/api/v1/profiles/{patient_id}",
    params(
        ("patient_id" = String, Path, description = "Patient identifier")
    ),
    responses(
        (status = 200, description = "Stored profile", body = StoredProfile),
        (status = 404, description = "No profile stored for the patient", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "profiles"
)]
#[instrument(skip(service))]
pub async fn get_profile(
    State(service): State<ScreeningService>,
    Path(patient_id): Path<String>,
) -> Result<impl IntoResponse, ErrorResponse> {
    info!("Fetching profile for patient {}", patient_id);

    let stored = service
        .get_profile(&patient_id)
        .await
        .map_err(|e| service_error(&patient_id, e))?;

    Ok((StatusCode::OK, Json(stored)))
}

/// Delete a patient's stored profile
#[utoipa::path(
    delete,
    path = "/api/v1/profiles/{patient_id}",
    params(
        ("patient_id" = String, Path, description = "Patient identifier")
    ),
    responses(
        (status = 204, description = "Profile deleted"),
        (status = 404, description = "No profile stored for the patient", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "profiles"
)]
#[instrument(skip(service))]
pub async fn delete_profile(
    State(service): State<ScreeningService>,
    Path(patient_id): Path<String>,
) -> Result<StatusCode, ErrorResponse> {
    info!("Deleting profile for patient {}", patient_id);

    service
        .delete_profile(&patient_id)
        .await
        .map_err(|e| service_error(&patient_id, e))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Evaluate a patient's stored profile
#[utoipa::path(
    get,
    path = "/api/v1/profiles/{patient_id}/screenings",
    params(
        ("patient_id" = String, Path, description = "Patient identifier"),
        ScreeningQueryParams
    ),
    responses(
        (status = 200, description = "Screening checklist, grouped when requested", body = ScreeningReport),
        (status = 404, description = "No profile stored for the patient", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "profiles"
)]
#[instrument(skip(service))]
pub async fn get_profile_screenings(
    State(service): State<ScreeningService>,
    Path(patient_id): Path<String>,
    Query(params): Query<ScreeningQueryParams>,
) -> Result<Response, ErrorResponse> {
    info!("Evaluating stored profile for patient {}", patient_id);

    let (stored, screenings) = service
        .evaluate_stored(&patient_id)
        .await
        .map_err(|e| service_error(&patient_id, e))?;

    let response = if params.grouped.unwrap_or(false) {
        let report = GroupedScreeningReport::new(&stored.profile, group_screenings_by_status(screenings))
            .for_patient(&stored.patient_id);
        (StatusCode::OK, Json(report)).into_response()
    } else {
        let report = ScreeningReport::new(&stored.profile, screenings).for_patient(&stored.patient_id);
        (StatusCode::OK, Json(report)).into_response()
    };

    Ok(response)
}
