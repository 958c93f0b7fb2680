//! API error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Type alias for handler results.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error returned by API handlers.
///
/// Per the propagation policy, the only failure that reaches here in
/// practice is a holdings load failure; provider failures are absorbed
/// inside the pipeline and never surface as HTTP errors.
pub struct ApiError(anyhow::Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
