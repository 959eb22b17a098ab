//! Calls the injected churn model and enforces its output contract.
//!
//! `PredictionService` composes the feature mapper, the model adapter and the
//! aggregator into the two request-level operations the API exposes.

use std::sync::Arc;

use adapters::{ChurnModel, FeatureRow};
use serde::Serialize;
use serde_json::{Map, Value};

use super::data_aggregator::{render, summarize, BatchSummary, PredictionOutcome};
use super::errors::PredictionError;
use super::feature_mapper::{map_batch, map_record};

/// Runs the model and checks it returned one label in `{0, 1}` per row.
pub fn predict(
    model: &dyn ChurnModel,
    rows: &[FeatureRow],
) -> Result<Vec<i64>, PredictionError> {
    let labels = model.predict(rows);
    if labels.len() != rows.len() {
        return Err(PredictionError::ModelContractViolation(format!(
            "model returned {} labels for {} rows",
            labels.len(),
            rows.len()
        )));
    }
    if let Some((index, label)) = labels
        .iter()
        .enumerate()
        .find(|(_, label)| !matches!(**label, 0 | 1))
    {
        return Err(PredictionError::ModelContractViolation(format!(
            "model returned label {label} for row {index}"
        )));
    }
    Ok(labels)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SinglePrediction {
    pub prediction: PredictionOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchPrediction {
    pub summary: BatchSummary,
    pub predictions: Vec<PredictionOutcome>,
}

#[derive(Clone)]
pub struct PredictionService {
    model: Arc<dyn ChurnModel>,
}

impl PredictionService {
    pub fn new(model: Arc<dyn ChurnModel>) -> Self {
        Self { model }
    }

    pub fn predict_one(
        &self,
        raw: &Map<String, Value>,
    ) -> Result<SinglePrediction, PredictionError> {
        let row = map_record(raw)?;
        let labels = predict(self.model.as_ref(), &[row])?;
        Ok(SinglePrediction {
            prediction: render(labels[0]),
        })
    }

    pub fn predict_batch(&self, body: &Value) -> Result<BatchPrediction, PredictionError> {
        let rows = map_batch(body)?;
        let labels = predict(self.model.as_ref(), &rows)?;
        let predictions: Vec<PredictionOutcome> = labels.into_iter().map(render).collect();
        Ok(BatchPrediction {
            summary: summarize(&predictions),
            predictions,
        })
    }
}
