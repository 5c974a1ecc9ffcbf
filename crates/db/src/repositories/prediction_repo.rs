//! Repository for the `predictions` table.

use sqlx::PgPool;

use crate::models::prediction::{NewPrediction, Prediction, PredictionListQuery};

/// Column list for `predictions` queries.
const PREDICTION_COLUMNS: &str = "id, model_type, prediction_date, target_date, \
     destination_id, predicted_sales, predicted_bookings, \
     confidence_interval_lower, confidence_interval_upper, accuracy_score, created_at";

pub struct PredictionRepo;

impl PredictionRepo {
    /// Insert a forecast batch inside a single transaction.
    ///
    /// Either every row lands or none do; a constraint violation on any
    /// row rolls back the whole batch. Returns the number of rows written.
    pub async fn insert_batch(
        pool: &PgPool,
        rows: &[NewPrediction],
    ) -> Result<u64, sqlx::Error> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut tx = pool.begin().await?;

        for row in rows {
            sqlx::query(
                "INSERT INTO predictions \
                    (model_type, target_date, destination_id, predicted_sales, \
                     predicted_bookings, confidence_interval_lower, \
                     confidence_interval_upper, accuracy_score) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(&row.model_type)
            .bind(row.target_date)
            .bind(row.destination_id)
            .bind(row.predicted_sales)
            .bind(row.predicted_bookings)
            .bind(row.confidence_interval_lower)
            .bind(row.confidence_interval_upper)
            .bind(row.accuracy_score)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(rows.len() as u64)
    }

    /// List predictions filtered by model tag and destination, newest
    /// generation first, target date ascending within a generation.
    pub async fn list(
        pool: &PgPool,
        params: &PredictionListQuery,
    ) -> Result<Vec<Prediction>, sqlx::Error> {
        let limit = params.limit.unwrap_or(50).clamp(1, 200);

        let query = format!(
            "SELECT {PREDICTION_COLUMNS} FROM predictions \
             WHERE ($1::text IS NULL OR model_type = $1) \
               AND ($2::bigint IS NULL OR destination_id = $2) \
             ORDER BY prediction_date DESC, target_date ASC \
             LIMIT $3"
        );
        sqlx::query_as::<_, Prediction>(&query)
            .bind(&params.model_type)
            .bind(params.destination_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Total number of stored prediction rows.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM predictions")
            .fetch_one(pool)
            .await
    }
}
