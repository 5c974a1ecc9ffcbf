//! Mined association-rule record models.

use serde::Serialize;
use sqlx::FromRow;
use toursight_core::types::{DbId, Timestamp};

/// A row from the `association_rules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StoredRule {
    pub id: DbId,
    pub antecedent: Vec<String>,
    pub consequent: Vec<String>,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
    pub conviction: f64,
    /// Thresholds the mining run was executed with.
    pub min_support: f64,
    pub min_confidence: f64,
    pub created_at: Timestamp,
}

/// Input row for a mining batch insert.
#[derive(Debug, Clone)]
pub struct NewRule {
    pub antecedent: Vec<String>,
    pub consequent: Vec<String>,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
    pub conviction: f64,
    pub min_support: f64,
    pub min_confidence: f64,
}
