//! Repository for the `uploaded_datasets` table.

use sqlx::PgPool;

use crate::models::upload::{CreateUploadedDataset, UploadedDataset};

/// Column list for `uploaded_datasets` queries.
const UPLOAD_COLUMNS: &str =
    "id, stored_filename, original_filename, byte_size, uploaded_by, created_at";

pub struct UploadRepo;

impl UploadRepo {
    /// Record an uploaded dataset, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateUploadedDataset,
    ) -> Result<UploadedDataset, sqlx::Error> {
        let query = format!(
            "INSERT INTO uploaded_datasets \
                (stored_filename, original_filename, byte_size, uploaded_by) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {UPLOAD_COLUMNS}"
        );
        sqlx::query_as::<_, UploadedDataset>(&query)
            .bind(&input.stored_filename)
            .bind(&input.original_filename)
            .bind(input.byte_size)
            .bind(input.uploaded_by)
            .fetch_one(pool)
            .await
    }

    /// List recent uploads, newest first.
    pub async fn list_recent(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<UploadedDataset>, sqlx::Error> {
        let query = format!(
            "SELECT {UPLOAD_COLUMNS} FROM uploaded_datasets \
             ORDER BY created_at DESC \
             LIMIT $1"
        );
        sqlx::query_as::<_, UploadedDataset>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
