//! Turns loosely typed employee JSON into the model's fixed feature schema.
//!
//! This module validates raw attribute objects into a typed [`EmployeeRecord`],
//! encodes the categorical fields through fixed lookup tables and assembles
//! [`FeatureRow`]s in the column order the classifier was trained on.
//!
//! Every field is optional. Categorical lookups never fail: anything that is
//! not a known name falls back to the table default. Numeric fields that are
//! present but not convertible are reported as
//! [`PredictionError::InvalidField`].

use adapters::FeatureRow;
use serde_json::{Map, Value};

use super::errors::PredictionError;

/// Department codes, in the order the model was trained with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Department {
    #[default]
    Sales,
    Hr,
    Technical,
    Support,
    It,
    ProductMng,
    Marketing,
    Management,
}

impl Department {
    pub const ALL: [Department; 8] = [
        Department::Sales,
        Department::Hr,
        Department::Technical,
        Department::Support,
        Department::It,
        Department::ProductMng,
        Department::Marketing,
        Department::Management,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Department::Sales => "sales",
            Department::Hr => "hr",
            Department::Technical => "technical",
            Department::Support => "support",
            Department::It => "it",
            Department::ProductMng => "product_mng",
            Department::Marketing => "marketing",
            Department::Management => "management",
        }
    }

    pub fn code(self) -> i64 {
        self as i64
    }

    /// Case-insensitive lookup; unknown names and non-strings map to sales.
    pub fn from_value(value: Option<&Value>) -> Self {
        lookup_name(value, |name| {
            Department::ALL.into_iter().find(|d| d.name() == name)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SalaryBand {
    Low,
    #[default]
    Medium,
    High,
}

impl SalaryBand {
    pub fn code(self) -> i64 {
        self as i64
    }

    /// Case-insensitive lookup; unknown names and non-strings map to medium.
    pub fn from_value(value: Option<&Value>) -> Self {
        lookup_name(value, |name| match name {
            "low" => Some(SalaryBand::Low),
            "medium" => Some(SalaryBand::Medium),
            "high" => Some(SalaryBand::High),
            _ => None,
        })
    }
}

fn lookup_name<T: Default>(value: Option<&Value>, find: impl Fn(&str) -> Option<T>) -> T {
    match value {
        Some(Value::String(s)) => find(&s.to_lowercase()).unwrap_or_default(),
        _ => T::default(),
    }
}

/// A validated employee record with every default already applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmployeeRecord {
    pub satisfaction_level: f64,
    pub last_evaluation: f64,
    pub number_project: i64,
    pub average_montly_hours: f64,
    pub time_spend_company: i64,
    pub work_accident: i64,
    pub promotion_last_5years: i64,
    pub department: Department,
    pub salary: SalaryBand,
}

impl EmployeeRecord {
    /// Validates a raw attribute object. Unknown keys are ignored.
    pub fn from_json(raw: &Map<String, Value>) -> Result<Self, PredictionError> {
        Ok(Self {
            satisfaction_level: float_field(raw, "satisfaction_level")?,
            last_evaluation: float_field(raw, "last_evaluation")?,
            number_project: int_field(raw, "number_project")?,
            average_montly_hours: float_field(raw, "average_montly_hours")?,
            time_spend_company: int_field(raw, "time_spend_company")?,
            work_accident: int_field(raw, "Work_accident")?,
            promotion_last_5years: int_field(raw, "promotion_last_5years")?,
            department: Department::from_value(raw.get("Departments")),
            salary: SalaryBand::from_value(raw.get("salary")),
        })
    }

    pub fn to_feature_row(&self) -> FeatureRow {
        FeatureRow {
            satisfaction_level: self.satisfaction_level,
            last_evaluation: self.last_evaluation,
            number_project: self.number_project,
            average_montly_hours: self.average_montly_hours,
            time_spend_company: self.time_spend_company,
            work_accident: self.work_accident,
            promotion_last_5years: self.promotion_last_5years,
            department: self.department.code(),
            salary: self.salary.code(),
        }
    }
}

/// Maps one raw record to a feature row.
pub fn map_record(raw: &Map<String, Value>) -> Result<FeatureRow, PredictionError> {
    EmployeeRecord::from_json(raw).map(|record| record.to_feature_row())
}

/// Maps a JSON array of raw records, preserving order. The first failing
/// record aborts the whole batch.
pub fn map_batch(body: &Value) -> Result<Vec<FeatureRow>, PredictionError> {
    let records = body.as_array().ok_or_else(|| {
        PredictionError::InvalidRequest(
            "Request body must be a list of employee records".to_string(),
        )
    })?;
    if records.is_empty() {
        return Err(PredictionError::InvalidRequest(
            "Employee list must not be empty".to_string(),
        ));
    }

    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let raw = record.as_object().ok_or_else(|| {
                PredictionError::InvalidRequest(format!(
                    "Record {index} must be a JSON object"
                ))
            })?;
            map_record(raw).map_err(|err| err.in_record(index))
        })
        .collect()
}

fn float_field(raw: &Map<String, Value>, field: &'static str) -> Result<f64, PredictionError> {
    let invalid = || PredictionError::InvalidField {
        field,
        record: None,
        expected: "a number",
    };
    match raw.get(field) {
        None => Ok(0.0),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(invalid),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| invalid()),
        Some(Value::Bool(b)) => Ok(if *b { 1.0 } else { 0.0 }),
        Some(_) => Err(invalid()),
    }
}

fn int_field(raw: &Map<String, Value>, field: &'static str) -> Result<i64, PredictionError> {
    let invalid = || PredictionError::InvalidField {
        field,
        record: None,
        expected: "an integer",
    };
    match raw.get(field) {
        None => Ok(0),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            // Floats truncate toward zero; u64 values above i64::MAX land here too.
            match n.as_f64().map(f64::trunc) {
                Some(f) if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                    Ok(f as i64)
                }
                _ => Err(invalid()),
            }
        }
        Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| invalid()),
        Some(Value::Bool(b)) => Ok(i64::from(*b)),
        Some(_) => Err(invalid()),
    }
}
