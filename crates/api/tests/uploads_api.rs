//! CSV dataset upload tests.

mod common;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;

const BOUNDARY: &str = "toursight-test-boundary";

/// Build a single-file multipart POST request.
fn multipart_upload(uri: &str, token: &str, filename: &str, content: &str) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"csv_file\"; filename=\"{filename}\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {content}\r\n\
         --{BOUNDARY}--\r\n"
    );

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap()
}

async fn analyst_token(pool: &PgPool, app: Router, username: &str) -> String {
    let (_user, password) = common::create_test_user(pool, username, "analyst").await;
    common::login_for_token(app, username, &password).await
}

const VALID_CSV: &str = "booking_date,total_amount,number_of_travelers\n2026-01-05,18000.0,4\n";

#[sqlx::test(migrations = "../../db/migrations")]
async fn upload_stores_file_and_records_row(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let mut config = common::test_analytics_config();
    config.upload_dir = dir.path().to_path_buf();

    let app = common::build_test_app_with(pool.clone(), config.clone());
    let token = analyst_token(&pool, app, "uploader1").await;

    let app = common::build_test_app_with(pool.clone(), config);
    let request = multipart_upload("/api/v1/uploads/sales-data", &token, "sales.csv", VALID_CSV);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = common::body_json(response).await;
    let stored = json["data"]["stored_filename"].as_str().unwrap();
    assert!(stored.starts_with("upload-") && stored.ends_with(".csv"));
    assert_eq!(json["data"]["original_filename"], "sales.csv");

    // The file landed in the configured upload directory.
    let on_disk = std::fs::read_to_string(dir.path().join(stored)).unwrap();
    assert_eq!(on_disk, VALID_CSV);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_csv_upload_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = analyst_token(&pool, app, "uploader2").await;

    let app = common::build_test_app(pool);
    let request = multipart_upload("/api/v1/uploads/sales-data", &token, "sales.xlsx", VALID_CSV);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn csv_missing_required_columns_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = analyst_token(&pool, app, "uploader3").await;

    let app = common::build_test_app(pool);
    let request = multipart_upload(
        "/api/v1/uploads/sales-data",
        &token,
        "sales.csv",
        "booking_date,total_amount\n2026-01-05,18000.0\n",
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = common::body_json(response).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("number_of_travelers"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn viewer_cannot_upload(pool: PgPool) {
    let (_user, password) = common::create_test_user(&pool, "viewer_up", "viewer").await;
    let app = common::build_test_app(pool.clone());
    let token = common::login_for_token(app, "viewer_up", &password).await;

    let app = common::build_test_app(pool);
    let request = multipart_upload("/api/v1/uploads/sales-data", &token, "sales.csv", VALID_CSV);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn uploads_listing_returns_recent_first(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let mut config = common::test_analytics_config();
    config.upload_dir = dir.path().to_path_buf();

    let app = common::build_test_app_with(pool.clone(), config.clone());
    let token = analyst_token(&pool, app, "uploader4").await;

    for name in ["first.csv", "second.csv"] {
        let app = common::build_test_app_with(pool.clone(), config.clone());
        let request = multipart_upload("/api/v1/uploads/sales-data", &token, name, VALID_CSV);
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let app = common::build_test_app_with(pool, config);
    let response = common::get_auth(app, "/api/v1/uploads", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = common::body_json(response).await;
    let uploads = json["data"].as_array().unwrap();
    assert_eq!(uploads.len(), 2);
}
