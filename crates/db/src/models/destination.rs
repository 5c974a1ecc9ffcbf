//! Destination models.

use serde::Serialize;
use sqlx::FromRow;
use toursight_core::types::{DbId, Timestamp};

/// A row from the `destinations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Destination {
    pub id: DbId,
    pub name: String,
    pub country: String,
    pub region: Option<String>,
    pub category: String,
    pub created_at: Timestamp,
}
