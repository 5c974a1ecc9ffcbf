//! Handlers for the `/predictions` resource: running forecast jobs and
//! reading back generated records.

use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;
use toursight_core::analytics::output::ForecastPoint;
use toursight_core::analytics::request::{DataSource, GeneratePredictions};
use toursight_core::error::CoreError;
use toursight_db::models::prediction::{Prediction, PredictionListQuery};
use toursight_db::repositories::{DestinationRepo, PredictionRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAnalyst;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response payload for a completed forecast job.
#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub predictions: Vec<ForecastPoint>,
    /// `uploaded_dataset` when the worker read an uploaded CSV, otherwise
    /// `database`.
    pub source: DataSource,
    /// Rows committed to the predictions table.
    pub saved: u64,
}

/// POST /api/v1/predictions/generate
///
/// Run a forecast worker and persist its output. Synchronous: the
/// response carries the full batch or a typed failure.
pub async fn generate(
    State(state): State<AppState>,
    RequireAnalyst(user): RequireAnalyst,
    Json(input): Json<GeneratePredictions>,
) -> AppResult<Json<DataResponse<ForecastResponse>>> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    // A singular scope must name a destination we actually know.
    if let Some(id) = input.destination_id.id() {
        if !DestinationRepo::exists(&state.pool, id).await? {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "destination",
                id,
            }));
        }
    }

    tracing::info!(
        user_id = user.user_id,
        model = %input.model_type,
        destination = %input.destination_id,
        days = input.forecast_days,
        "Forecast job requested"
    );

    let outcome = state.orchestrator.generate_forecast(&input).await?;

    Ok(Json(DataResponse {
        data: ForecastResponse {
            predictions: outcome.predictions,
            source: outcome.source,
            saved: outcome.saved,
        },
    }))
}

/// GET /api/v1/predictions
///
/// List stored predictions filtered by model tag and destination, newest
/// generation first.
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<PredictionListQuery>,
) -> AppResult<Json<DataResponse<Vec<Prediction>>>> {
    let predictions = PredictionRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: predictions }))
}
