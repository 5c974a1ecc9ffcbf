//! Maps decoded worker records to storage rows and writes them.
//!
//! Each record is merged with request-level metadata (model tag, singular
//! destination scope, mining thresholds) and written through the
//! repositories' single-transaction batch inserts, so a batch is either
//! fully committed or not at all.

use toursight_core::analytics::output::{AssociationRule, ForecastPoint};
use toursight_core::analytics::request::{GeneratePredictions, MarketBasketParams};
use toursight_db::models::prediction::NewPrediction;
use toursight_db::models::rule::NewRule;
use toursight_db::repositories::{PredictionRepo, RuleRepo};
use toursight_db::DbPool;

/// Persist a decoded forecast batch. Returns the number of rows written.
pub async fn persist_forecast(
    pool: &DbPool,
    req: &GeneratePredictions,
    points: &[ForecastPoint],
) -> Result<u64, sqlx::Error> {
    let rows = forecast_rows(req, points);
    PredictionRepo::insert_batch(pool, &rows).await
}

/// Persist a decoded mining batch. Returns the number of rows written.
pub async fn persist_rules(
    pool: &DbPool,
    params: &MarketBasketParams,
    rules: &[AssociationRule],
) -> Result<u64, sqlx::Error> {
    let rows = rule_rows(params, rules);
    RuleRepo::insert_batch(pool, &rows).await
}

fn forecast_rows(req: &GeneratePredictions, points: &[ForecastPoint]) -> Vec<NewPrediction> {
    points
        .iter()
        .map(|p| NewPrediction {
            model_type: req.model_type.as_str().to_string(),
            target_date: p.date,
            destination_id: req.destination_id.id(),
            predicted_sales: p.predicted_sales,
            predicted_bookings: p.predicted_bookings,
            confidence_interval_lower: p.confidence_lower,
            confidence_interval_upper: p.confidence_upper,
            accuracy_score: p.accuracy_score,
        })
        .collect()
}

fn rule_rows(params: &MarketBasketParams, rules: &[AssociationRule]) -> Vec<NewRule> {
    rules
        .iter()
        .map(|r| NewRule {
            antecedent: r.antecedent.clone(),
            consequent: r.consequent.clone(),
            support: r.support,
            confidence: r.confidence,
            lift: r.lift,
            conviction: r.conviction,
            min_support: params.min_support,
            min_confidence: params.min_confidence,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
