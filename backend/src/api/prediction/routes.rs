//! Defines the HTTP routes for churn predictions.
//!
//! These routes map the single-record and batch prediction paths to their
//! handlers.

use axum::{routing::post, Router};

use super::handlers::{predict, predict_batch};
use crate::app::AppState;

pub fn prediction_router() -> Router<AppState> {
    Router::new()
        .route("/predict", post(predict))
        .route("/predict-batch", post(predict_batch))
}
