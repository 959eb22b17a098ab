//! Logistic regression implementation of [`ChurnModel`].

use crate::errors::AdapterError;
use crate::models::{FeatureRow, FEATURE_COUNT};
use crate::ChurnModel;

#[derive(Debug, Clone)]
pub struct LogisticRegression {
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
}

impl LogisticRegression {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self, AdapterError> {
        let found = coefficients.len();
        let coefficients: [f64; FEATURE_COUNT] = coefficients.try_into().map_err(|_| {
            AdapterError::InvalidArtifact(format!(
                "expected {FEATURE_COUNT} coefficients, found {found}"
            ))
        })?;
        Ok(Self {
            coefficients,
            intercept,
        })
    }

    fn decision(&self, row: &FeatureRow) -> f64 {
        row.values()
            .iter()
            .zip(self.coefficients.iter())
            .fold(self.intercept, |acc, (x, w)| acc + x * w)
    }
}

impl ChurnModel for LogisticRegression {
    fn predict(&self, rows: &[FeatureRow]) -> Vec<i64> {
        rows.iter()
            .map(|row| i64::from(self.decision(row) > 0.0))
            .collect()
    }

    fn kind(&self) -> &'static str {
        "logistic_regression"
    }
}
