//! Central analytical job orchestrator.
//!
//! Runs one job request through its full lifecycle: build the worker
//! invocation, run the worker under a concurrency slot and timeout,
//! decode its output, and persist the batch. Any stage failure
//! short-circuits the pipeline and surfaces as a typed [`AppError`];
//! no state is carried between invocations.

use std::time::Duration;

use tokio::sync::Semaphore;
use toursight_core::analytics::invocation::InvocationBuilder;
use toursight_core::analytics::output::{self, AssociationRule, ForecastPoint};
use toursight_core::analytics::request::{DataSource, GeneratePredictions, MarketBasketParams};
use toursight_core::analytics::worker;
use toursight_db::DbPool;

use crate::analytics::persist;
use crate::config::AnalyticsConfig;
use crate::error::{AppError, AppResult};

/// Successful outcome of a forecast job.
#[derive(Debug)]
pub struct ForecastOutcome {
    pub predictions: Vec<ForecastPoint>,
    /// Which data source the worker was actually pointed at.
    pub source: DataSource,
    /// Rows committed to storage.
    pub saved: u64,
}

/// Successful outcome of a market-basket job.
#[derive(Debug)]
pub struct BasketOutcome {
    pub rules: Vec<AssociationRule>,
    /// Rows committed to storage.
    pub saved: u64,
}

/// Orchestrates analytical worker execution for both job kinds.
pub struct AnalyticsOrchestrator {
    pool: DbPool,
    builder: InvocationBuilder,
    worker_timeout: Duration,
    /// Bounds simultaneous worker spawns across all requests.
    slots: Semaphore,
}

impl AnalyticsOrchestrator {
    /// Create a new orchestrator from configuration.
    pub fn new(pool: DbPool, config: &AnalyticsConfig) -> Self {
        Self {
            pool,
            builder: InvocationBuilder::new(
                config.python_bin.clone(),
                config.forecast_script.clone(),
                config.market_basket_script.clone(),
                config.upload_dir.clone(),
            ),
            worker_timeout: Duration::from_secs(config.worker_timeout_secs),
            slots: Semaphore::new(config.max_concurrent_jobs),
        }
    }

    /// Run a forecast job to completion.
    ///
    /// Records are persisted only when the worker exits cleanly AND the
    /// full output decodes; every other path returns before the
    /// persistence stage, so storage never sees a partial batch.
    pub async fn generate_forecast(
        &self,
        req: &GeneratePredictions,
    ) -> AppResult<ForecastOutcome> {
        // 1. Build the worker invocation and resolve the data source.
        let (invocation, source) = self.builder.forecast(req);

        // 2. Acquire a worker slot and run the worker to completion.
        let permit = self.acquire_slot().await?;
        let output = worker::run(&invocation, self.worker_timeout).await?;
        drop(permit);

        tracing::info!(
            model = %req.model_type,
            destination = %req.destination_id,
            days = req.forecast_days,
            duration_ms = output.duration_ms,
            "Forecast worker finished"
        );

        // 3. Decode the output document.
        let predictions = output::parse_forecast(&output.stdout, req.forecast_days)?;

        // 4. Persist the batch.
        let saved = persist::persist_forecast(&self.pool, req, &predictions).await?;

        Ok(ForecastOutcome {
            predictions,
            source,
            saved,
        })
    }

    /// Run a market-basket mining job to completion.
    pub async fn run_market_basket(
        &self,
        params: &MarketBasketParams,
    ) -> AppResult<BasketOutcome> {
        let invocation = self.builder.market_basket(params);

        let permit = self.acquire_slot().await?;
        let output = worker::run(&invocation, self.worker_timeout).await?;
        drop(permit);

        tracing::info!(
            min_support = params.min_support,
            min_confidence = params.min_confidence,
            duration_ms = output.duration_ms,
            "Market-basket worker finished"
        );

        let rules = output::parse_rules(&output.stdout)?;

        let saved = persist::persist_rules(&self.pool, params, &rules).await?;

        Ok(BasketOutcome { rules, saved })
    }

    async fn acquire_slot(&self) -> AppResult<tokio::sync::SemaphorePermit<'_>> {
        self.slots
            .acquire()
            .await
            .map_err(|_| AppError::InternalError("Worker slot pool is closed".to_string()))
    }
}
