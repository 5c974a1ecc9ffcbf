//! Strict decoding of worker output documents.
//!
//! A worker writes a single JSON array to stdout on success. Decoding is
//! all-or-nothing: the first element that is missing a field or carries a
//! value outside its domain aborts the whole parse, so a partially valid
//! document can never reach persistence.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One forecast day as emitted by the forecast worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Calendar date the prediction targets (`%Y-%m-%d`).
    pub date: NaiveDate,
    pub predicted_sales: f64,
    pub predicted_bookings: i32,
    pub confidence_lower: f64,
    pub confidence_upper: f64,
    pub accuracy_score: f64,
}

/// One association rule as emitted by the market-basket worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationRule {
    pub antecedent: Vec<String>,
    pub consequent: Vec<String>,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
    #[serde(default = "default_conviction")]
    pub conviction: f64,
}

fn default_conviction() -> f64 {
    1.0
}

/// Worker output that could not be decoded into valid records.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// The payload is not well-formed JSON of the expected shape.
    #[error("Worker output is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload decoded but violates the output contract.
    #[error("Invalid worker output: {0}")]
    Invalid(String),
}

/// Decode forecast worker stdout into exactly `expected_days` points.
pub fn parse_forecast(raw: &str, expected_days: u32) -> Result<Vec<ForecastPoint>, OutputError> {
    let points: Vec<ForecastPoint> = serde_json::from_str(raw.trim())?;

    if points.len() != expected_days as usize {
        return Err(OutputError::Invalid(format!(
            "expected {expected_days} forecast rows, got {}",
            points.len()
        )));
    }

    for (i, point) in points.iter().enumerate() {
        validate_forecast_point(point)
            .map_err(|msg| OutputError::Invalid(format!("row {i}: {msg}")))?;
    }

    Ok(points)
}

/// Decode market-basket worker stdout into association rules.
///
/// An empty array is a valid result (no rules cleared the thresholds).
pub fn parse_rules(raw: &str) -> Result<Vec<AssociationRule>, OutputError> {
    let rules: Vec<AssociationRule> = serde_json::from_str(raw.trim())?;

    for (i, rule) in rules.iter().enumerate() {
        validate_rule(rule).map_err(|msg| OutputError::Invalid(format!("rule {i}: {msg}")))?;
    }

    Ok(rules)
}

fn validate_forecast_point(point: &ForecastPoint) -> Result<(), String> {
    if !point.predicted_sales.is_finite() || point.predicted_sales < 0.0 {
        return Err(format!(
            "predicted_sales must be a non-negative number, got {}",
            point.predicted_sales
        ));
    }
    if point.predicted_bookings < 0 {
        return Err(format!(
            "predicted_bookings must be non-negative, got {}",
            point.predicted_bookings
        ));
    }
    if !point.confidence_lower.is_finite()
        || !point.confidence_upper.is_finite()
        || point.confidence_lower < 0.0
        || point.confidence_lower > point.confidence_upper
    {
        return Err(format!(
            "confidence interval [{}, {}] is not a valid non-negative range",
            point.confidence_lower, point.confidence_upper
        ));
    }
    if !(0.0..=1.0).contains(&point.accuracy_score) {
        return Err(format!(
            "accuracy_score must be within [0, 1], got {}",
            point.accuracy_score
        ));
    }
    Ok(())
}

fn validate_rule(rule: &AssociationRule) -> Result<(), String> {
    if rule.antecedent.is_empty() {
        return Err("antecedent must not be empty".to_string());
    }
    if rule.consequent.is_empty() {
        return Err("consequent must not be empty".to_string());
    }
    if !(0.0..=1.0).contains(&rule.support) {
        return Err(format!("support must be within [0, 1], got {}", rule.support));
    }
    if !(0.0..=1.0).contains(&rule.confidence) {
        return Err(format!(
            "confidence must be within [0, 1], got {}",
            rule.confidence
        ));
    }
    if !rule.lift.is_finite() || rule.lift < 0.0 {
        return Err(format!(
            "lift must be a non-negative number, got {}",
            rule.lift
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
