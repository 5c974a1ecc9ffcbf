//! Handlers for market-basket association mining.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use toursight_core::analytics::output::AssociationRule;
use toursight_core::analytics::request::MarketBasketParams;
use toursight_core::error::CoreError;
use toursight_db::models::rule::StoredRule;
use toursight_db::repositories::RuleRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAnalyst;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response payload for a completed mining run.
#[derive(Debug, Serialize)]
pub struct MarketBasketResponse {
    pub rules: Vec<AssociationRule>,
    /// Rows committed to the association_rules table.
    pub saved: u64,
}

/// Query params for `GET /analytics/market-basket/rules`.
#[derive(Debug, Deserialize)]
pub struct RuleListQuery {
    /// Maximum number of results. Defaults to 50, capped at 200.
    pub limit: Option<i64>,
}

/// POST /api/v1/analytics/market-basket
///
/// Run the mining worker against the live transaction data and persist
/// the resulting rules. An empty rule set is a valid outcome.
pub async fn run(
    State(state): State<AppState>,
    RequireAnalyst(user): RequireAnalyst,
    Json(input): Json<MarketBasketParams>,
) -> AppResult<Json<DataResponse<MarketBasketResponse>>> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    tracing::info!(
        user_id = user.user_id,
        min_support = input.min_support,
        min_confidence = input.min_confidence,
        "Market-basket job requested"
    );

    let outcome = state.orchestrator.run_market_basket(&input).await?;

    Ok(Json(DataResponse {
        data: MarketBasketResponse {
            rules: outcome.rules,
            saved: outcome.saved,
        },
    }))
}

/// GET /api/v1/analytics/market-basket/rules
///
/// List recently mined rules, strongest lift first.
pub async fn list_rules(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<RuleListQuery>,
) -> AppResult<Json<DataResponse<Vec<StoredRule>>>> {
    let limit = params.limit.unwrap_or(50).clamp(1, 200);
    let rules = RuleRepo::list_recent(&state.pool, limit).await?;
    Ok(Json(DataResponse { data: rules }))
}
