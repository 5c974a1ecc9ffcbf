//! Uploaded dataset models.

use serde::Serialize;
use sqlx::FromRow;
use toursight_core::types::{DbId, Timestamp};

/// A row from the `uploaded_datasets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UploadedDataset {
    pub id: DbId,
    /// Unique server-assigned filename under the upload directory.
    pub stored_filename: String,
    /// Filename as sent by the client, for display only.
    pub original_filename: String,
    pub byte_size: i64,
    pub uploaded_by: DbId,
    pub created_at: Timestamp,
}

/// Input for recording an uploaded dataset.
#[derive(Debug, Clone)]
pub struct CreateUploadedDataset {
    pub stored_filename: String,
    pub original_filename: String,
    pub byte_size: i64,
    pub uploaded_by: DbId,
}
