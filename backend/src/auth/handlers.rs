//! Handler functions for authentication-related API endpoints.
//!
//! These functions parse the request body, validate that credentials are
//! present, and delegate to `auth::service` for the actual check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::models::{Credentials, LoginResponse, RegisterResponse};
use crate::api::{json_body, RawBody};
use crate::app::AppState;
use crate::errors::ApiError;

pub async fn login(
    State(state): State<AppState>,
    body: RawBody,
) -> Result<Json<LoginResponse>, ApiError> {
    let credentials = Credentials::from_json(&json_body(body)?)?;
    let response = state.auth.login(&credentials).await?;
    Ok(Json(response))
}

pub async fn register(
    State(state): State<AppState>,
    body: RawBody,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let credentials = Credentials::from_json(&json_body(body)?)?;
    let response = state.auth.register(&credentials).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
