use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body of every 5xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Client sent a missing or unparsable payload. Rendered as plain text so
    /// it stays distinct from storage failures.
    #[error("{0}")]
    BadRequest(String),
    /// Storage or connectivity failure caught at the handler boundary.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "request failed");
                let body = ErrorBody {
                    error: "Server error".to_string(),
                    // alternate format keeps the whole context chain
                    details: format!("{err:#}"),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
