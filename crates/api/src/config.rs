use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Analytical job engine configuration.
    pub analytics: AnalyticsConfig,
}

/// Configuration for the analytical job engine, threaded into the
/// orchestrator at construction.
#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    /// Interpreter the worker scripts are run through.
    pub python_bin: PathBuf,
    /// Forecast worker script.
    pub forecast_script: PathBuf,
    /// Market-basket worker script.
    pub market_basket_script: PathBuf,
    /// Directory where uploaded CSV datasets are stored.
    pub upload_dir: PathBuf,
    /// Wall-clock budget per worker invocation, in seconds.
    pub worker_timeout_secs: u64,
    /// Ceiling on simultaneously running workers.
    pub max_concurrent_jobs: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            analytics: AnalyticsConfig::from_env(),
        }
    }
}

impl AnalyticsConfig {
    /// Load analytics configuration from environment variables with defaults.
    ///
    /// | Env Var                          | Default                       |
    /// |----------------------------------|-------------------------------|
    /// | `ANALYTICS_PYTHON_BIN`           | `python3`                     |
    /// | `ANALYTICS_FORECAST_SCRIPT`      | `ml-models/predict.py`        |
    /// | `ANALYTICS_MARKET_BASKET_SCRIPT` | `ml-models/market_basket.py`  |
    /// | `ANALYTICS_UPLOAD_DIR`           | `uploads`                     |
    /// | `ANALYTICS_WORKER_TIMEOUT_SECS`  | `300`                         |
    /// | `ANALYTICS_MAX_CONCURRENT_JOBS`  | `4`                           |
    pub fn from_env() -> Self {
        let python_bin =
            PathBuf::from(std::env::var("ANALYTICS_PYTHON_BIN").unwrap_or_else(|_| "python3".into()));

        let forecast_script = PathBuf::from(
            std::env::var("ANALYTICS_FORECAST_SCRIPT")
                .unwrap_or_else(|_| "ml-models/predict.py".into()),
        );

        let market_basket_script = PathBuf::from(
            std::env::var("ANALYTICS_MARKET_BASKET_SCRIPT")
                .unwrap_or_else(|_| "ml-models/market_basket.py".into()),
        );

        let upload_dir =
            PathBuf::from(std::env::var("ANALYTICS_UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()));

        let worker_timeout_secs: u64 = std::env::var("ANALYTICS_WORKER_TIMEOUT_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("ANALYTICS_WORKER_TIMEOUT_SECS must be a valid u64");

        let max_concurrent_jobs: usize = std::env::var("ANALYTICS_MAX_CONCURRENT_JOBS")
            .unwrap_or_else(|_| "4".into())
            .parse()
            .expect("ANALYTICS_MAX_CONCURRENT_JOBS must be a valid usize");
        assert!(
            max_concurrent_jobs > 0,
            "ANALYTICS_MAX_CONCURRENT_JOBS must be at least 1"
        );

        Self {
            python_bin,
            forecast_script,
            market_basket_script,
            upload_dir,
            worker_timeout_secs,
            max_concurrent_jobs,
        }
    }
}
