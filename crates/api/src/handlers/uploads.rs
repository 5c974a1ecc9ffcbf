//! Handlers for CSV dataset uploads.
//!
//! An uploaded dataset can later be named in a forecast request to run
//! the worker against it instead of the live database.

use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use toursight_core::error::CoreError;
use toursight_db::models::upload::{CreateUploadedDataset, UploadedDataset};
use toursight_db::repositories::UploadRepo;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAnalyst;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum accepted CSV size (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Columns the forecast worker requires in an uploaded dataset.
const REQUIRED_COLUMNS: [&str; 3] = ["booking_date", "total_amount", "number_of_travelers"];

/// POST /api/v1/uploads/sales-data
///
/// Accept a single CSV file via multipart, verify its header carries the
/// columns the forecast worker needs, store it under a unique name in the
/// upload directory, and record it.
pub async fn upload_sales_data(
    State(state): State<AppState>,
    RequireAnalyst(user): RequireAnalyst,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<UploadedDataset>>)> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
        .ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;

    let original_filename = field.file_name().unwrap_or("upload.csv").to_string();
    if !original_filename.to_ascii_lowercase().ends_with(".csv") {
        return Err(AppError::Core(CoreError::Validation(
            "Only CSV files are allowed".into(),
        )));
    }

    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    if bytes.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Uploaded file is empty".into(),
        )));
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Core(CoreError::Validation(
            "File is too large. Maximum size is 10MB".into(),
        )));
    }

    validate_csv_header(&bytes)?;

    let upload_dir = &state.config.analytics.upload_dir;
    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;

    let stored_filename = format!("upload-{}.csv", Uuid::new_v4());
    let path = upload_dir.join(&stored_filename);
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

    let record = UploadRepo::create(
        &state.pool,
        &CreateUploadedDataset {
            stored_filename,
            original_filename,
            byte_size: bytes.len() as i64,
            uploaded_by: user.user_id,
        },
    )
    .await?;

    tracing::info!(
        user_id = user.user_id,
        filename = %record.stored_filename,
        byte_size = record.byte_size,
        "Dataset uploaded"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// Query params for `GET /uploads`.
#[derive(Debug, Deserialize)]
pub struct UploadListQuery {
    /// Maximum number of results. Defaults to 20, capped at 100.
    pub limit: Option<i64>,
}

/// GET /api/v1/uploads
///
/// List recent uploads, newest first.
pub async fn list_uploads(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<UploadListQuery>,
) -> AppResult<Json<DataResponse<Vec<UploadedDataset>>>> {
    let limit = params.limit.unwrap_or(20).clamp(1, 100);
    let uploads = UploadRepo::list_recent(&state.pool, limit).await?;
    Ok(Json(DataResponse { data: uploads }))
}

/// Check the first line of the CSV for the columns the worker requires.
fn validate_csv_header(bytes: &[u8]) -> Result<(), AppError> {
    let header_line = bytes
        .split(|&b| b == b'\n')
        .next()
        .unwrap_or_default();
    let header = String::from_utf8_lossy(header_line);
    let columns: Vec<&str> = header.trim().split(',').map(str::trim).collect();

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !columns.contains(*col))
        .copied()
        .collect();

    if !missing.is_empty() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "CSV is missing required columns: {}",
            missing.join(", ")
        ))));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_with_all_required_columns_passes() {
        let csv = b"booking_date,total_amount,number_of_travelers\n2026-01-01,100.0,2\n";
        assert!(validate_csv_header(csv).is_ok());
    }

    #[test]
    fn header_with_extra_columns_passes() {
        let csv = b"id,booking_date, total_amount ,number_of_travelers,notes\n";
        assert!(validate_csv_header(csv).is_ok());
    }

    #[test]
    fn missing_column_is_rejected() {
        let csv = b"booking_date,total_amount\n2026-01-01,100.0\n";
        let err = validate_csv_header(csv).unwrap_err();
        assert!(err.to_string().contains("number_of_travelers"));
    }
}
