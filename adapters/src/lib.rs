//! Core `adapters` crate for abstracting the pre-trained churn classifier.
//!
//! This crate defines the `ChurnModel` trait, which is the only capability the
//! backend needs from a model, and provides the concrete implementations that
//! can be loaded from a JSON artifact at startup (random forest, logistic
//! regression).

pub mod errors;
pub mod forest;
pub mod logistic;
pub mod models;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

pub use errors::AdapterError;
pub use forest::{RandomForest, Tree, TreeNode};
pub use logistic::LogisticRegression;
pub use models::{FeatureRow, FEATURE_COLUMNS, FEATURE_COUNT};

/// A loaded, immutable binary classifier.
///
/// Implementations return exactly one raw label per input row, in input
/// order. The labels are not validated here; callers decide what to do with
/// anything outside `{0, 1}`.
pub trait ChurnModel: Send + Sync {
    fn predict(&self, rows: &[FeatureRow]) -> Vec<i64>;

    /// Short identifier used in startup logs.
    fn kind(&self) -> &'static str;
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ModelArtifact {
    RandomForest {
        feature_names: Vec<String>,
        trees: Vec<Tree>,
    },
    LogisticRegression {
        feature_names: Vec<String>,
        coefficients: Vec<f64>,
        intercept: f64,
    },
}

/// Loads a model artifact from disk.
pub fn load_model(path: impl AsRef<Path>) -> Result<Arc<dyn ChurnModel>, AdapterError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| AdapterError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let model = parse_model(&contents)?;
    tracing::info!(path = %path.display(), kind = model.kind(), "Loaded churn model");
    Ok(model)
}

/// Parses a JSON model artifact and checks its feature schema.
pub fn parse_model(json: &str) -> Result<Arc<dyn ChurnModel>, AdapterError> {
    let artifact: ModelArtifact = serde_json::from_str(json)?;
    match artifact {
        ModelArtifact::RandomForest {
            feature_names,
            trees,
        } => {
            check_schema(&feature_names)?;
            let forest = RandomForest::new(trees)?;
            tracing::debug!(trees = forest.tree_count(), "Built random forest");
            Ok(Arc::new(forest))
        }
        ModelArtifact::LogisticRegression {
            feature_names,
            coefficients,
            intercept,
        } => {
            check_schema(&feature_names)?;
            Ok(Arc::new(LogisticRegression::new(coefficients, intercept)?))
        }
    }
}

fn check_schema(feature_names: &[String]) -> Result<(), AdapterError> {
    if feature_names.iter().map(String::as_str).eq(FEATURE_COLUMNS) {
        return Ok(());
    }
    Err(AdapterError::SchemaMismatch {
        expected: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
        found: feature_names.to_vec(),
    })
}
