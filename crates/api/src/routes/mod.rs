//! Route definitions, one module per resource.

pub mod analytics;
pub mod auth;
pub mod destinations;
pub mod health;
pub mod predictions;
pub mod sales;
pub mod uploads;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                     register (public)
/// /auth/login                        login (public)
/// /auth/refresh                      refresh (public)
/// /auth/logout                       logout (requires auth)
///
/// /destinations                      list (public)
/// /sales                             list (requires auth)
///
/// /analytics/dashboard               summary widgets (requires auth)
/// /analytics/market-basket           run mining job (analyst)
/// /analytics/market-basket/rules     stored rules (requires auth)
///
/// /predictions                       stored predictions (requires auth)
/// /predictions/generate              run forecast job (analyst)
///
/// /uploads                           list uploads (requires auth)
/// /uploads/sales-data                upload CSV dataset (analyst)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/destinations", destinations::router())
        .nest("/sales", sales::router())
        .nest("/analytics", analytics::router())
        .nest("/predictions", predictions::router())
        .nest("/uploads", uploads::router())
}
