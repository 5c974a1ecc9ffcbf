//! Route definitions for the `/sales` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::sales;
use crate::state::AppState;

/// Routes mounted at `/sales`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(sales::list_sales))
}
