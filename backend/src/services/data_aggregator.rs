//! Renders model labels as outcomes and aggregates batch results.
//!
//! Both operations are pure. Label validation happens before anything in
//! this module sees a label.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PredictionOutcome {
    #[serde(rename = "Employee will stay")]
    Stay,
    #[serde(rename = "Employee will leave")]
    Leave,
}

/// Label 1 means leave; everything else renders as stay.
pub fn render(label: i64) -> PredictionOutcome {
    if label == 1 {
        PredictionOutcome::Leave
    } else {
        PredictionOutcome::Stay
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total_employees: usize,
    pub will_leave: usize,
    pub will_stay: usize,
    pub attrition_rate_percent: f64,
}

/// Tallies outcomes in a single pass. An empty slice yields a zero rate.
pub fn summarize(outcomes: &[PredictionOutcome]) -> BatchSummary {
    let total_employees = outcomes.len();
    let will_leave = outcomes
        .iter()
        .filter(|o| **o == PredictionOutcome::Leave)
        .count();

    let attrition_rate_percent = percent_rounded(will_leave, total_employees);

    BatchSummary {
        total_employees,
        will_leave,
        will_stay: total_employees - will_leave,
        attrition_rate_percent,
    }
}

/// `100 * part / total` rounded to two decimals, half to even. The ratio is
/// rounded exactly in integers so ties such as 1/800 (0.125%) go to 0.12.
fn percent_rounded(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let (part, total) = (part as u128, total as u128);
    let scaled = part * 10_000;
    let mut hundredths = scaled / total;
    let twice_remainder = 2 * (scaled % total);
    if twice_remainder > total || (twice_remainder == total && hundredths % 2 == 1) {
        hundredths += 1;
    }
    hundredths as f64 / 100.0
}
