//! API error type.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::foundation::error::StudioError;
use crate::studio::SubmitError;

/// Result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned by the HTTP layer. Every variant carries the user-facing message.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request or invalid input.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Unknown or revoked resource.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A submission is already running for the session.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The image service failed.
    #[error("Bad gateway: {0}")]
    BadGateway(String),

    /// This host cannot record video.
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Anything else.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Build an [`ApiError::BadRequest`].
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Build an [`ApiError::NotFound`].
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Build an [`ApiError::Internal`].
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(m)
            | ApiError::NotFound(m)
            | ApiError::Conflict(m)
            | ApiError::BadGateway(m)
            | ApiError::NotImplemented(m)
            | ApiError::Internal(m) => m,
        }
    }
}

impl From<StudioError> for ApiError {
    fn from(e: StudioError) -> Self {
        let msg = e.user_message();
        match e {
            StudioError::Validation(_) => Self::BadRequest(msg),
            StudioError::Upstream(_) => Self::BadGateway(msg),
            StudioError::UnsupportedEnvironment(_) => Self::NotImplemented(msg),
            StudioError::ImageLoad(_) | StudioError::Recording(_) | StudioError::Other(_) => {
                tracing::error!(error = %e, "request failed");
                Self::Internal(msg)
            }
        }
    }
}

impl From<SubmitError> for ApiError {
    fn from(e: SubmitError) -> Self {
        match e {
            SubmitError::Busy => Self::Conflict(e.user_message()),
            SubmitError::Failed(inner) => inner.into(),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    error: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.message(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/server/error.rs"]
mod tests;
