//! Error types raised by the prediction services.
//!
//! The services never log or recover from these; the API layer renders them.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum PredictionError {
    /// The top-level request shape is wrong (empty batch, non-list body, ...).
    #[error("{0}")]
    InvalidRequest(String),

    /// A field is present but cannot be coerced to its declared type.
    #[error("{}", describe_field(field, *record, expected))]
    InvalidField {
        field: &'static str,
        record: Option<usize>,
        expected: &'static str,
    },

    /// The model returned labels outside `{0, 1}` or the wrong number of them.
    #[error("Model contract violation: {0}")]
    ModelContractViolation(String),
}

impl PredictionError {
    /// Attaches the batch position to a field error.
    pub fn in_record(self, index: usize) -> Self {
        match self {
            PredictionError::InvalidField {
                field, expected, ..
            } => PredictionError::InvalidField {
                field,
                record: Some(index),
                expected,
            },
            other => other,
        }
    }
}

fn describe_field(field: &str, record: Option<usize>, expected: &str) -> String {
    match record {
        Some(index) => {
            format!("Invalid value for field '{field}' in record {index}: expected {expected}")
        }
        None => format!("Invalid value for field '{field}': expected {expected}"),
    }
}
