//! Global application error types and handlers.
//!
//! `ApiError` is the single error type returned by every handler. It renders
//! as `{"error": "<message>"}` with the matching status code, so clients see
//! one envelope regardless of which layer failed.

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::auth::AuthError;
use crate::services::PredictionError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Malformed or missing top-level input (400).
    #[error("{0}")]
    InvalidRequest(String),

    /// A field that cannot be coerced to its declared type (400).
    #[error("{0}")]
    InvalidField(String),

    /// Credential mismatch (401).
    #[error("Invalid credentials")]
    AuthFailure,

    /// Registration with an existing username (409).
    #[error("Username already exists")]
    DuplicateUser,

    /// The request body could not be read, e.g. it exceeds the configured cap.
    #[error("{message}")]
    BodyRejected { status: StatusCode, message: String },

    /// The deployed model broke its output contract (500).
    #[error("{0}")]
    ModelContractViolation(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) | ApiError::InvalidField(_) => StatusCode::BAD_REQUEST,
            ApiError::AuthFailure => StatusCode::UNAUTHORIZED,
            ApiError::DuplicateUser => StatusCode::CONFLICT,
            ApiError::BodyRejected { status, .. } => *status,
            ApiError::ModelContractViolation(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %message, "Request rejected");
        }

        // Server faults keep their detail in the log only.
        let error = match self {
            ApiError::ModelContractViolation(_) => "Prediction failed".to_string(),
            ApiError::Internal(_) => "Internal server error".to_string(),
            _ => message,
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<PredictionError> for ApiError {
    fn from(err: PredictionError) -> Self {
        match err {
            PredictionError::InvalidRequest(msg) => ApiError::InvalidRequest(msg),
            err @ PredictionError::InvalidField { .. } => ApiError::InvalidField(err.to_string()),
            err @ PredictionError::ModelContractViolation(_) => {
                ApiError::ModelContractViolation(err.to_string())
            }
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::BodyRejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials => ApiError::InvalidRequest(err.to_string()),
            AuthError::InvalidCredentials => ApiError::AuthFailure,
            AuthError::DuplicateUser => ApiError::DuplicateUser,
            AuthError::Store(msg) => ApiError::Internal(msg),
        }
    }
}
