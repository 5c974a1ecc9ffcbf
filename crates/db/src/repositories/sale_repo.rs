//! Repository for the `sales` table and dashboard aggregates.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::sale::{SaleListQuery, SaleWithContext, SalesByDestination};

/// Booking statuses that count as revenue for dashboard aggregates.
const REVENUE_STATUSES: &str = "('confirmed', 'completed')";

/// Joined column list for the sales listing.
const SALE_CONTEXT_COLUMNS: &str = "s.id, s.booking_date, s.travel_date, \
     s.number_of_travelers, s.total_amount, s.booking_status, s.payment_method, \
     s.booking_source, \
     c.first_name AS customer_first_name, c.last_name AS customer_last_name, \
     c.age_group AS customer_age_group, c.customer_segment AS customer_segment, \
     t.name AS tour_name, d.name AS destination_name";

const SALE_CONTEXT_JOINS: &str = "FROM sales s \
     LEFT JOIN customers c ON s.customer_id = c.id \
     LEFT JOIN tours t ON s.tour_id = t.id \
     LEFT JOIN destinations d ON t.destination_id = d.id";

/// Booking-date filter shared by the listing query and its count query.
/// NULL bounds are open ends, so one static query covers every filter
/// combination.
const BOOKING_DATE_FILTER: &str = "($1::date IS NULL OR booking_date >= $1) \
     AND ($2::date IS NULL OR booking_date <= $2)";

pub struct SaleRepo;

impl SaleRepo {
    /// List sales newest-booking-first with customer/tour/destination
    /// context, optionally bounded by a booking-date range. Returns the
    /// page of rows plus the total row count for the same filter.
    pub async fn list(
        pool: &PgPool,
        params: &SaleListQuery,
    ) -> Result<(Vec<SaleWithContext>, i64), sqlx::Error> {
        let limit = params.limit.unwrap_or(20).clamp(1, 100);
        let page = params.page.unwrap_or(1).max(1);
        let offset = (page - 1) * limit;

        let query = format!(
            "SELECT {SALE_CONTEXT_COLUMNS} {SALE_CONTEXT_JOINS} \
             WHERE ($1::date IS NULL OR s.booking_date >= $1) \
               AND ($2::date IS NULL OR s.booking_date <= $2) \
             ORDER BY s.booking_date DESC \
             LIMIT $3 OFFSET $4"
        );
        let sales = sqlx::query_as::<_, SaleWithContext>(&query)
            .bind(params.start_date)
            .bind(params.end_date)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM sales WHERE {BOOKING_DATE_FILTER}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(params.start_date)
            .bind(params.end_date)
            .fetch_one(pool)
            .await?;

        Ok((sales, total))
    }

    /// Total revenue and booking count for confirmed/completed sales booked
    /// on or after `since`.
    pub async fn dashboard_totals(
        pool: &PgPool,
        since: NaiveDate,
    ) -> Result<(f64, i64), sqlx::Error> {
        let query = format!(
            "SELECT SUM(total_amount), COUNT(*) FROM sales \
             WHERE booking_date >= $1 AND booking_status IN {REVENUE_STATUSES}"
        );
        let row: (Option<f64>, i64) = sqlx::query_as(&query).bind(since).fetch_one(pool).await?;

        Ok((row.0.unwrap_or(0.0), row.1))
    }

    /// Revenue and booking count per destination, highest revenue first.
    pub async fn sales_by_destination(
        pool: &PgPool,
        since: NaiveDate,
    ) -> Result<Vec<SalesByDestination>, sqlx::Error> {
        let query = format!(
            "SELECT d.name AS destination, \
                    SUM(s.total_amount) AS total_sales, \
                    COUNT(s.id) AS booking_count \
             FROM sales s \
             JOIN tours t ON s.tour_id = t.id \
             JOIN destinations d ON t.destination_id = d.id \
             WHERE s.booking_date >= $1 AND s.booking_status IN {REVENUE_STATUSES} \
             GROUP BY d.id, d.name \
             ORDER BY total_sales DESC"
        );
        sqlx::query_as::<_, SalesByDestination>(&query)
            .bind(since)
            .fetch_all(pool)
            .await
    }
}
