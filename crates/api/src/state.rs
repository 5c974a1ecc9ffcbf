use std::sync::Arc;

use crate::analytics::orchestrator::AnalyticsOrchestrator;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: toursight_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Analytical job engine.
    pub orchestrator: Arc<AnalyticsOrchestrator>,
}
