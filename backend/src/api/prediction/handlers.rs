//! Handler functions for the prediction API.
//!
//! These functions decode the request body and hand it to
//! `services::predictor`, which owns validation, inference and aggregation.

use axum::extract::State;
use axum::Json;
use serde_json::{Map, Value};

use crate::api::{json_body, RawBody};
use crate::app::AppState;
use crate::errors::ApiError;
use crate::services::predictor::{BatchPrediction, SinglePrediction};

pub async fn predict(
    State(state): State<AppState>,
    body: RawBody,
) -> Result<Json<SinglePrediction>, ApiError> {
    let record = match json_body(body)? {
        Value::Null => Map::new(),
        Value::Object(map) => map,
        _ => {
            return Err(ApiError::InvalidRequest(
                "Request body must be a JSON object".to_string(),
            ))
        }
    };

    let result = state.predictions.predict_one(&record)?;
    Ok(Json(result))
}

pub async fn predict_batch(
    State(state): State<AppState>,
    body: RawBody,
) -> Result<Json<BatchPrediction>, ApiError> {
    let records = json_body(body)?;
    let result = state.predictions.predict_batch(&records)?;

    tracing::debug!(
        total = result.summary.total_employees,
        will_leave = result.summary.will_leave,
        "Scored batch"
    );

    Ok(Json(result))
}
