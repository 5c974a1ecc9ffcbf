//! Repository for the `association_rules` table.

use sqlx::PgPool;

use crate::models::rule::{NewRule, StoredRule};

/// Column list for `association_rules` queries.
const RULE_COLUMNS: &str = "id, antecedent, consequent, support, confidence, lift, \
     conviction, min_support, min_confidence, created_at";

pub struct RuleRepo;

impl RuleRepo {
    /// Insert a mining batch inside a single transaction.
    ///
    /// Same atomicity contract as prediction batches: all rows or none.
    pub async fn insert_batch(pool: &PgPool, rows: &[NewRule]) -> Result<u64, sqlx::Error> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut tx = pool.begin().await?;

        for row in rows {
            sqlx::query(
                "INSERT INTO association_rules \
                    (antecedent, consequent, support, confidence, lift, conviction, \
                     min_support, min_confidence) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(&row.antecedent)
            .bind(&row.consequent)
            .bind(row.support)
            .bind(row.confidence)
            .bind(row.lift)
            .bind(row.conviction)
            .bind(row.min_support)
            .bind(row.min_confidence)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(rows.len() as u64)
    }

    /// List the most recently mined rules, strongest lift first.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<StoredRule>, sqlx::Error> {
        let query = format!(
            "SELECT {RULE_COLUMNS} FROM association_rules \
             ORDER BY created_at DESC, lift DESC \
             LIMIT $1"
        );
        sqlx::query_as::<_, StoredRule>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Total number of stored rule rows.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM association_rules")
            .fetch_one(pool)
            .await
    }
}
