//! Dashboard, destinations, and sales listing tests.

mod common;

use axum::http::StatusCode;
use chrono::Utc;
use sqlx::PgPool;
use toursight_core::types::DbId;

/// Seed one customer, one tour at the first seeded destination, and a
/// confirmed sale booked `days_ago` days ago. Returns the sale id.
async fn seed_confirmed_sale(pool: &PgPool, amount: f64, days_ago: i64) -> DbId {
    let customer_id: DbId = sqlx::query_scalar(
        "INSERT INTO customers (first_name, last_name, age_group, customer_segment) \
         VALUES ('Ada', 'Lovelace', '26-35', 'luxury') RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap();

    let destination_id: DbId =
        sqlx::query_scalar("SELECT id FROM destinations ORDER BY id LIMIT 1")
            .fetch_one(pool)
            .await
            .unwrap();

    let tour_id: DbId = sqlx::query_scalar(
        "INSERT INTO tours (name, destination_id, duration_days, price, max_capacity, \
                            tour_type, season) \
         VALUES ('Coastal Loop', $1, 7, 1500.0, 12, 'group', 'summer') RETURNING id",
    )
    .bind(destination_id)
    .fetch_one(pool)
    .await
    .unwrap();

    let booking_date = (Utc::now() - chrono::Duration::days(days_ago)).date_naive();
    sqlx::query_scalar(
        "INSERT INTO sales (customer_id, tour_id, booking_date, travel_date, \
                            number_of_travelers, total_amount, booking_status, \
                            payment_method, booking_source) \
         VALUES ($1, $2, $3, $3 + 30, 2, $4, 'confirmed', 'credit_card', 'website') \
         RETURNING id",
    )
    .bind(customer_id)
    .bind(tour_id)
    .bind(booking_date)
    .bind(amount)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn destinations_listing_is_public_and_seeded(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/v1/destinations").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    let destinations = json["data"].as_array().unwrap();
    assert!(!destinations.is_empty());
    // Ordered by name: Bali ships first in the seed set.
    assert_eq!(destinations[0]["name"], "Bali");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn dashboard_aggregates_confirmed_sales(pool: PgPool) {
    seed_confirmed_sale(&pool, 1200.0, 3).await;
    seed_confirmed_sale(&pool, 1800.0, 5).await;
    // Outside the default 30d window.
    seed_confirmed_sale(&pool, 9999.0, 60).await;

    let (_user, password) = common::create_test_user(&pool, "dash_viewer", "viewer").await;
    let app = common::build_test_app(pool.clone());
    let token = common::login_for_token(app, "dash_viewer", &password).await;

    let app = common::build_test_app(pool);
    let response = common::get_auth(app, "/api/v1/analytics/dashboard", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["total_sales"], 3000.0);
    assert_eq!(data["total_bookings"], 2);
    assert_eq!(data["average_booking_value"], 1500.0);

    let by_destination = data["sales_by_destination"].as_array().unwrap();
    assert_eq!(by_destination.len(), 1);
    assert_eq!(by_destination[0]["booking_count"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn dashboard_with_no_sales_reports_zeros(pool: PgPool) {
    let (_user, password) = common::create_test_user(&pool, "dash_empty", "viewer").await;
    let app = common::build_test_app(pool.clone());
    let token = common::login_for_token(app, "dash_empty", &password).await;

    let app = common::build_test_app(pool);
    let response = common::get_auth(app, "/api/v1/analytics/dashboard?period=7d", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["data"]["total_sales"], 0.0);
    assert_eq!(json["data"]["total_bookings"], 0);
    assert_eq!(json["data"]["average_booking_value"], 0.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sales_listing_paginates_with_context(pool: PgPool) {
    seed_confirmed_sale(&pool, 1200.0, 1).await;
    seed_confirmed_sale(&pool, 800.0, 2).await;

    let (_user, password) = common::create_test_user(&pool, "sales_viewer", "viewer").await;
    let app = common::build_test_app(pool.clone());
    let token = common::login_for_token(app, "sales_viewer", &password).await;

    let app = common::build_test_app(pool);
    let response = common::get_auth(app, "/api/v1/sales?page=1&limit=1", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["sales"].as_array().unwrap().len(), 1);
    assert_eq!(data["total_count"], 2);
    assert_eq!(data["total_pages"], 2);
    // Newest booking first, with joined context.
    assert_eq!(data["sales"][0]["total_amount"], 1200.0);
    assert_eq!(data["sales"][0]["customer_first_name"], "Ada");
    assert_eq!(data["sales"][0]["tour_name"], "Coastal Loop");
}
