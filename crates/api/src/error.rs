use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use toursight_core::analytics::output::OutputError;
use toursight_core::analytics::worker::WorkerError;
use toursight_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors, the analytical job failure
/// types, and HTTP-specific variants. Implements [`IntoResponse`] to
/// produce consistent `{ "error", "code" }` JSON error responses, so
/// every job failure reaches the caller as a distinguishable kind.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `toursight_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An analytical worker invocation failed (spawn, timeout, or exit).
    #[error(transparent)]
    Worker(#[from] WorkerError),

    /// An analytical worker exited cleanly but its output violated the
    /// output contract.
    #[error(transparent)]
    WorkerOutput(#[from] OutputError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Analytical worker failures ---
            AppError::Worker(err) => classify_worker_error(err),
            AppError::WorkerOutput(err) => {
                tracing::error!(error = %err, "Worker produced malformed output");
                (
                    StatusCode::BAD_GATEWAY,
                    "MALFORMED_WORKER_OUTPUT",
                    err.to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a worker failure into an HTTP status, error code, and message.
///
/// - Spawn/supervision I/O failures map to 500 (a deployment problem).
/// - Timeouts map to 504 (caller may retry with a smaller horizon).
/// - Nonzero exits map to 502 with the worker's diagnostics verbatim.
fn classify_worker_error(err: &WorkerError) -> (StatusCode, &'static str, String) {
    match err {
        WorkerError::Spawn(_) | WorkerError::Io(_) => {
            tracing::error!(error = %err, "Failed to launch analytics worker");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "WORKER_SPAWN_FAILURE",
                err.to_string(),
            )
        }
        WorkerError::Timeout { .. } => {
            tracing::warn!(error = %err, "Analytics worker timed out");
            (StatusCode::GATEWAY_TIMEOUT, "WORKER_TIMEOUT", err.to_string())
        }
        WorkerError::ExitFailure { exit_code, stderr } => {
            tracing::warn!(exit_code, "Analytics worker failed");
            (StatusCode::BAD_GATEWAY, "WORKER_FAILED", stderr.clone())
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
