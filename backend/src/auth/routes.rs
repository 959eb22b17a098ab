//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle user login and registration and are merged into the
//! main Axum router at the root path.

use axum::{routing::post, Router};

use super::handlers::{login, register};
use crate::app::AppState;

pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
}
