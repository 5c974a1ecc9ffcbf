//! Repository for the `destinations` table.

use sqlx::PgPool;
use toursight_core::types::DbId;

use crate::models::destination::Destination;

/// Column list for `destinations` queries.
const DESTINATION_COLUMNS: &str = "id, name, country, region, category, created_at";

pub struct DestinationRepo;

impl DestinationRepo {
    /// List all destinations ordered by name.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Destination>, sqlx::Error> {
        let query = format!("SELECT {DESTINATION_COLUMNS} FROM destinations ORDER BY name ASC");
        sqlx::query_as::<_, Destination>(&query).fetch_all(pool).await
    }

    /// Check whether a destination with the given id exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let found: Option<DbId> = sqlx::query_scalar("SELECT id FROM destinations WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(found.is_some())
    }
}
