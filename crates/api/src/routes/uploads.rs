//! Route definitions for the `/uploads` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::uploads;
use crate::state::AppState;

/// Routes mounted at `/uploads`.
///
/// The body limit is raised above the 10 MiB CSV cap to leave room for
/// multipart framing; the handler enforces the exact file-size cap.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(uploads::list_uploads))
        .route(
            "/sales-data",
            post(uploads::upload_sales_data)
                .layer(DefaultBodyLimit::max(uploads::MAX_UPLOAD_BYTES + 64 * 1024)),
        )
}
