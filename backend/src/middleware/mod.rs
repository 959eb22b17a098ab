//! General-purpose middleware for the API.
//!
//! CORS, request tracing and body-size layers applied to the whole Axum router.

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::app::AppState;
use crate::config::Config;

/// Any origin is allowed unless one is configured. An origin that is not a
/// valid header value falls back to allowing any.
pub fn cors_layer(allow_origin: Option<&str>) -> CorsLayer {
    let origin = match allow_origin.map(HeaderValue::from_str) {
        Some(Ok(value)) => AllowOrigin::exact(value),
        Some(Err(_)) => {
            tracing::warn!(origin = ?allow_origin, "Invalid CORS origin, allowing any");
            AllowOrigin::any()
        }
        None => AllowOrigin::any(),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Replaces axum's built-in 2 MB cap: bodies are unbounded unless a cap is
/// configured.
pub fn body_limit(max_body_bytes: Option<usize>) -> DefaultBodyLimit {
    match max_body_bytes {
        Some(bytes) => DefaultBodyLimit::max(bytes),
        None => DefaultBodyLimit::disable(),
    }
}

pub fn apply(router: axum::Router<AppState>, config: &Config) -> axum::Router<AppState> {
    router
        .layer(body_limit(config.max_body_bytes))
        .layer(cors_layer(config.cors_allow_origin.as_deref()))
        .layer(TraceLayer::new_for_http())
}
