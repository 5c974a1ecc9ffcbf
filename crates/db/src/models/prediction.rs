//! Generated forecast record models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use toursight_core::types::{DbId, Timestamp};

/// A row from the `predictions` table.
///
/// Each row is one forecast day of one generation run; rows are append-only
/// and a re-run of the same request produces a fresh batch.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Prediction {
    pub id: DbId,
    pub model_type: String,
    /// Date the batch was generated.
    pub prediction_date: NaiveDate,
    /// Date the prediction targets.
    pub target_date: NaiveDate,
    /// `None` means the prediction aggregates across all destinations.
    pub destination_id: Option<DbId>,
    pub predicted_sales: f64,
    pub predicted_bookings: i32,
    pub confidence_interval_lower: f64,
    pub confidence_interval_upper: f64,
    pub accuracy_score: f64,
    pub created_at: Timestamp,
}

/// Input row for a forecast batch insert.
///
/// `prediction_date` and `created_at` are assigned by the database at
/// insert time so every row of a batch shares one generation timestamp
/// source.
#[derive(Debug, Clone)]
pub struct NewPrediction {
    pub model_type: String,
    pub target_date: NaiveDate,
    pub destination_id: Option<DbId>,
    pub predicted_sales: f64,
    pub predicted_bookings: i32,
    pub confidence_interval_lower: f64,
    pub confidence_interval_upper: f64,
    pub accuracy_score: f64,
}

/// Query parameters for `GET /predictions`.
#[derive(Debug, Deserialize)]
pub struct PredictionListQuery {
    pub model_type: Option<String>,
    pub destination_id: Option<DbId>,
    /// Maximum number of results. Defaults to 50, capped at 200.
    pub limit: Option<i64>,
}
