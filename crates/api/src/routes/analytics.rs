//! Route definitions for the `/analytics` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{dashboard, market_basket};
use crate::state::AppState;

/// Routes mounted at `/analytics`.
///
/// ```text
/// GET  /dashboard             -> dashboard summary
/// POST /market-basket         -> run mining job
/// GET  /market-basket/rules   -> stored rules
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::dashboard))
        .route("/market-basket", post(market_basket::run))
        .route("/market-basket/rules", get(market_basket::list_rules))
}
