//! Central module for organizing the application's main API endpoints.
//!
//! This module acts as a top-level container for the prediction API,
//! excluding authentication routes which are handled separately.

pub mod prediction;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use serde_json::Value;

use crate::errors::ApiError;

/// A request body as extracted by the handlers. A body axum could not buffer
/// stays a value so it can be reported in the JSON error envelope.
pub(crate) type RawBody = Result<Bytes, BytesRejection>;

/// Parses a request body as JSON. An empty body reads as `null`.
pub(crate) fn json_body(body: RawBody) -> Result<Value, ApiError> {
    let body = body?;
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&body)
        .map_err(|err| ApiError::InvalidRequest(format!("Request body is not valid JSON: {err}")))
}
