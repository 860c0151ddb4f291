//! Transport error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use detect::DetectError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors surfaced to API clients
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request carried no `frame` field
    #[error("no frame provided")]
    MissingFrame,

    /// Frame bytes could not be decoded as an image
    #[error("frame decode failed: {0}")]
    Decode(String),

    /// Malformed multipart payload
    #[error("invalid multipart payload: {0}")]
    Multipart(String),

    /// Detector failure (extraction or classifier)
    #[error(transparent)]
    Detect(#[from] DetectError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingFrame | ApiError::Decode(_) | ApiError::Multipart(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Detect(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("detection request failed: {self}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
