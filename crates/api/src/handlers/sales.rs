//! Handlers for the `/sales` resource.

use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;
use toursight_db::models::sale::{SaleListQuery, SaleWithContext};
use toursight_db::repositories::SaleRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// One page of the sales listing.
#[derive(Debug, Serialize)]
pub struct SalesPage {
    pub sales: Vec<SaleWithContext>,
    pub total_count: i64,
    pub current_page: i64,
    pub total_pages: i64,
}

/// GET /api/v1/sales
///
/// Paginated sales with customer/tour/destination context, newest booking
/// first, optionally bounded by a booking-date range.
pub async fn list_sales(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<SaleListQuery>,
) -> AppResult<Json<DataResponse<SalesPage>>> {
    let limit = params.limit.unwrap_or(20).clamp(1, 100);
    let current_page = params.page.unwrap_or(1).max(1);

    let (sales, total_count) = SaleRepo::list(&state.pool, &params).await?;
    let total_pages = (total_count + limit - 1) / limit;

    Ok(Json(DataResponse {
        data: SalesPage {
            sales,
            total_count,
            current_page,
            total_pages,
        },
    }))
}
