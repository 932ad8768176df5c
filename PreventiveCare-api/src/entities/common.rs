use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use preventive_care_domain::services::ScreeningServiceError;

/// Error response format for API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code - machine-readable identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create a not found error response
    pub fn not_found(resource: &str) -> Self {
        Self {
            error: "not_found".to_string(),
            message: format!("The requested {} could not be found", resource),
            details: None,
        }
    }

    /// Create a validation error response
    pub fn validation_error(message: &str, details: Option<serde_json::Value>) -> Self {
        Self {
            error: "validation_error".to_string(),
            message: message.to_string(),
            details,
        }
    }

    /// Create a bad request error response
    pub fn bad_request(message: &str) -> Self {
        Self {
            error: "bad_request".to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    /// Create an internal error response
    pub fn internal_error() -> Self {
        Self {
            error: "internal_error".to_string(),
            message: "An unexpected error occurred".to_string(),
            details: None,
        }
    }

    /// HTTP status matching the error code
    pub fn status_code(&self) -> StatusCode {
        match self.error.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "validation_error" => StatusCode::BAD_REQUEST,
            "bad_request" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

impl From<ScreeningServiceError> for ErrorResponse {
    fn from(err: ScreeningServiceError) -> Self {
        match err {
            ScreeningServiceError::ValidationError(msg) => Self::validation_error(&msg, None),
            ScreeningServiceError::NotFound(_) => Self::not_found("profile"),
            // Internal details stay in the logs
            ScreeningServiceError::RepositoryError(_) | ScreeningServiceError::SerializationError(_) => {
                Self::internal_error()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorResponse::not_found("profile").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorResponse::validation_error("bad", None).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorResponse::bad_request("bad").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorResponse::internal_error().status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_from_service_error() {
        let response = ErrorResponse::from(ScreeningServiceError::NotFound("patient-1".to_string()));
        assert_eq!(response.error, "not_found");

        let response = ErrorResponse::from(ScreeningServiceError::ValidationError("patient_id: too long".to_string()));
        assert_eq!(response.error, "validation_error");
        assert_eq!(response.message, "patient_id: too long");

        let response = ErrorResponse::from(ScreeningServiceError::RepositoryError("lock poisoned".to_string()));
        assert_eq!(response.error, "internal_error");
        assert!(!response.message.contains("lock"));
    }

    #[test]
    fn test_details_omitted_when_absent() {
        let value = serde_json::to_value(ErrorResponse::bad_request("nope")).unwrap();
        assert!(value.get("details").is_none());
    }
}
