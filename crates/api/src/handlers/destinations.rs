//! Handlers for the `/destinations` resource.

use axum::extract::State;
use axum::Json;
use toursight_db::models::destination::Destination;
use toursight_db::repositories::DestinationRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/destinations
///
/// List all destinations ordered by name. Public: the destination list
/// feeds unauthenticated landing-page widgets.
pub async fn list_destinations(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Destination>>>> {
    let destinations = DestinationRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: destinations }))
}
