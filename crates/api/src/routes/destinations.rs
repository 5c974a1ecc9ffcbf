//! Route definitions for the `/destinations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::destinations;
use crate::state::AppState;

/// Routes mounted at `/destinations`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(destinations::list_destinations))
}
