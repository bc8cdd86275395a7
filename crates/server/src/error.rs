use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use visita_core::SchedulingError;

/// HTTP-facing wrapper for core errors.
///
/// The core never picks status codes itself; the mapping lives here, at
/// the interface edge.
pub struct ApiError(pub SchedulingError);

impl From<SchedulingError> for ApiError {
    fn from(error: SchedulingError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SchedulingError::BadRequest(_) => StatusCode::BAD_REQUEST,
            SchedulingError::Conflict { .. } => StatusCode::CONFLICT,
            SchedulingError::NotFound { .. } => StatusCode::NOT_FOUND,
            SchedulingError::Artifact { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(
                event_name = "http.request.failed",
                error_class = self.0.class(),
                error = %self.0,
                "request failed with a server-side error"
            );
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
