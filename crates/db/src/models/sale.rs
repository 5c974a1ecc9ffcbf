//! Sale models and the joined listing view.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use toursight_core::types::{DbId, Timestamp};

/// A row from the `sales` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Sale {
    pub id: DbId,
    pub customer_id: Option<DbId>,
    pub tour_id: Option<DbId>,
    pub booking_date: NaiveDate,
    pub travel_date: NaiveDate,
    pub number_of_travelers: i32,
    pub total_amount: f64,
    pub booking_status: String,
    pub payment_method: String,
    pub booking_source: String,
    pub discount_applied: f64,
    pub created_at: Timestamp,
}

/// A sale joined with its customer, tour, and destination context for the
/// listing endpoint.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SaleWithContext {
    pub id: DbId,
    pub booking_date: NaiveDate,
    pub travel_date: NaiveDate,
    pub number_of_travelers: i32,
    pub total_amount: f64,
    pub booking_status: String,
    pub payment_method: String,
    pub booking_source: String,
    pub customer_first_name: Option<String>,
    pub customer_last_name: Option<String>,
    pub customer_age_group: Option<String>,
    pub customer_segment: Option<String>,
    pub tour_name: Option<String>,
    pub destination_name: Option<String>,
}

/// Query parameters for `GET /sales`.
#[derive(Debug, Deserialize)]
pub struct SaleListQuery {
    /// 1-based page number. Defaults to 1.
    pub page: Option<i64>,
    /// Page size. Defaults to 20, capped at 100.
    pub limit: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Per-destination aggregate for the dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SalesByDestination {
    pub destination: String,
    pub total_sales: f64,
    pub booking_count: i64,
}
