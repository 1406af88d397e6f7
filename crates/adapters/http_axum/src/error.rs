//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use statusboard_domain::error::StatusBoardError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`StatusBoardError`] to an HTTP response with appropriate status code.
pub struct ApiError(StatusBoardError);

impl From<StatusBoardError> for ApiError {
    fn from(err: StatusBoardError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match &self.0 {
            StatusBoardError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            StatusBoardError::Source(err) => {
                tracing::error!(error = %err, "status source error");
                (StatusCode::BAD_GATEWAY, "status source unavailable".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
