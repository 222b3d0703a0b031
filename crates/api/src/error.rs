//! HTTP error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use coachbook_domain::CoachBookError;
use serde_json::json;

/// Wrapper turning domain errors into HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub CoachBookError);

/// Result type for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<CoachBookError> for ApiError {
    fn from(err: CoachBookError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            CoachBookError::SlotTaken(_) => StatusCode::CONFLICT,
            CoachBookError::Auth(_) => StatusCode::UNAUTHORIZED,
            CoachBookError::NotFound(_) => StatusCode::NOT_FOUND,
            CoachBookError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            CoachBookError::Network(_) => StatusCode::BAD_GATEWAY,
            CoachBookError::Database(_) | CoachBookError::Config(_) | CoachBookError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": {
                "type": error_kind(&self.0),
                "message": self.0.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

fn error_kind(err: &CoachBookError) -> &'static str {
    match err {
        CoachBookError::SlotTaken(_) => "conflict",
        CoachBookError::Auth(_) => "not_authenticated",
        CoachBookError::NotFound(_) => "not_found",
        CoachBookError::InvalidInput(_) => "invalid_input",
        CoachBookError::Network(_) => "upstream_unavailable",
        CoachBookError::Database(_) => "storage_failure",
        CoachBookError::Config(_) => "configuration",
        CoachBookError::Internal(_) => "internal",
    }
}
