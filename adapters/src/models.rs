//! Generic data models for the `adapters` crate.
//!
//! These models define the fixed-schema feature row every churn model
//! implementation consumes, so the backend can hand rows to any adapter
//! without knowing which concrete model was loaded.

use serde::Serialize;

/// Number of columns in a [`FeatureRow`].
pub const FEATURE_COUNT: usize = 9;

/// Column names in the exact order the classifier was fit on.
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "satisfaction_level",
    "last_evaluation",
    "number_project",
    "average_montly_hours",
    "time_spend_company",
    "Work_accident",
    "promotion_last_5years",
    "Departments",
    "salary",
];

/// One employee, encoded as the numeric vector the model expects.
///
/// Field order matches [`FEATURE_COLUMNS`]; serialization keeps the
/// column names the model was trained with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureRow {
    pub satisfaction_level: f64,
    pub last_evaluation: f64,
    pub number_project: i64,
    pub average_montly_hours: f64,
    pub time_spend_company: i64,
    #[serde(rename = "Work_accident")]
    pub work_accident: i64,
    pub promotion_last_5years: i64,
    #[serde(rename = "Departments")]
    pub department: i64,
    pub salary: i64,
}

impl FeatureRow {
    /// Returns the row as a dense vector in column order.
    pub fn values(&self) -> [f64; FEATURE_COUNT] {
        [
            self.satisfaction_level,
            self.last_evaluation,
            self.number_project as f64,
            self.average_montly_hours,
            self.time_spend_company as f64,
            self.work_accident as f64,
            self.promotion_last_5years as f64,
            self.department as f64,
            self.salary as f64,
        ]
    }
}
