//! Route definitions for the `/predictions` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::predictions;
use crate::state::AppState;

/// Routes mounted at `/predictions`.
///
/// ```text
/// GET  /           -> stored predictions
/// POST /generate   -> run forecast job
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(predictions::list))
        .route("/generate", post(predictions::generate))
}
