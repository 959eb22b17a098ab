//! Module for core business logic services.
//!
//! This module encapsulates the prediction pipeline: mapping raw employee
//! records to feature rows, invoking the loaded model and aggregating the
//! outcomes of a batch.

pub mod data_aggregator;
pub mod errors;
pub mod feature_mapper;
pub mod predictor;

pub use errors::PredictionError;
pub use predictor::PredictionService;
