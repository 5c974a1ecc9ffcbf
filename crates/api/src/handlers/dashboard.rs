//! Handlers for the dashboard summary endpoint.

use axum::extract::{Query, State};
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use toursight_db::models::sale::SalesByDestination;
use toursight_db::repositories::SaleRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query params for `GET /analytics/dashboard`.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Reporting window: `7d`, `30d` (default), or `90d`.
    pub period: Option<String>,
}

/// Aggregated dashboard payload.
#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub total_sales: f64,
    pub total_bookings: i64,
    pub average_booking_value: f64,
    pub sales_by_destination: Vec<SalesByDestination>,
}

/// GET /api/v1/analytics/dashboard
///
/// Revenue totals and per-destination breakdown for the selected window.
/// Only confirmed/completed bookings count.
pub async fn dashboard(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<DashboardQuery>,
) -> AppResult<Json<DataResponse<DashboardData>>> {
    let days = match params.period.as_deref() {
        Some("7d") => 7,
        Some("90d") => 90,
        _ => 30,
    };
    let since = (Utc::now() - Duration::days(days)).date_naive();

    let (total_sales, total_bookings) = SaleRepo::dashboard_totals(&state.pool, since).await?;
    let sales_by_destination = SaleRepo::sales_by_destination(&state.pool, since).await?;

    let average_booking_value = if total_bookings > 0 {
        total_sales / total_bookings as f64
    } else {
        0.0
    };

    Ok(Json(DataResponse {
        data: DashboardData {
            total_sales,
            total_bookings,
            average_booking_value,
            sales_by_destination,
        },
    }))
}
