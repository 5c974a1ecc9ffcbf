//! End-to-end market-basket mining tests with stub workers.

mod common;

use std::path::{Path, PathBuf};

use axum::http::StatusCode;
use common::{body_json, post_json_auth};
use sqlx::PgPool;
use toursight_api::config::AnalyticsConfig;
use toursight_db::repositories::RuleRepo;

/// Write a bash stub mining worker into `dir` and return a config using it.
fn stub_config(dir: &Path, body: &str) -> AnalyticsConfig {
    let script = dir.join("market_basket.sh");
    std::fs::write(&script, format!("#!/bin/bash\n{body}")).expect("write stub worker");

    AnalyticsConfig {
        python_bin: PathBuf::from("bash"),
        forecast_script: PathBuf::from("/nonexistent/predict.py"),
        market_basket_script: script,
        upload_dir: dir.to_path_buf(),
        worker_timeout_secs: 5,
        max_concurrent_jobs: 2,
    }
}

const TWO_RULES: &str = r#"[
    {"antecedent": ["Travel Insurance"], "consequent": ["Airport Transfer"],
     "support": 0.12, "confidence": 0.8, "lift": 2.1, "conviction": 1.4},
    {"antecedent": ["Guide", "Equipment Rental"], "consequent": ["Travel Insurance"],
     "support": 0.05, "confidence": 0.6, "lift": 1.7, "conviction": 1.2}
]"#;

async fn analyst_token(pool: &PgPool, app: axum::Router, username: &str) -> String {
    let (_user, password) = common::create_test_user(pool, username, "analyst").await;
    common::login_for_token(app, username, &password).await
}

/// Clean run: rules returned, persisted with the request thresholds.
#[sqlx::test(migrations = "../../db/migrations")]
async fn mining_success_persists_rules(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let config = stub_config(dir.path(), &format!("cat <<'EOF'\n{TWO_RULES}\nEOF\n"));

    let app = common::build_test_app_with(pool.clone(), config.clone());
    let token = analyst_token(&pool, app, "miner1").await;

    let app = common::build_test_app_with(pool.clone(), config);
    let body = serde_json::json!({ "min_support": 0.02, "min_confidence": 0.5 });
    let response = post_json_auth(app, "/api/v1/analytics/market-basket", body, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["rules"].as_array().unwrap().len(), 2);
    assert_eq!(json["data"]["saved"], 2);

    let stored = RuleRepo::list_recent(&pool, 10).await.unwrap();
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|r| r.min_support == 0.02));
    assert!(stored.iter().all(|r| r.min_confidence == 0.5));
}

/// An empty rule set is a valid outcome, not an error.
#[sqlx::test(migrations = "../../db/migrations")]
async fn mining_with_no_rules_is_a_valid_outcome(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let config = stub_config(dir.path(), "echo '[]'\n");

    let app = common::build_test_app_with(pool.clone(), config.clone());
    let token = analyst_token(&pool, app, "miner2").await;

    let app = common::build_test_app_with(pool.clone(), config);
    let response = post_json_auth(
        app,
        "/api/v1/analytics/market-basket",
        serde_json::json!({}),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["rules"].as_array().unwrap().len(), 0);
    assert_eq!(json["data"]["saved"], 0);
    assert_eq!(RuleRepo::count(&pool).await.unwrap(), 0);
}

/// Worker failure: diagnostics verbatim, zero rows.
#[sqlx::test(migrations = "../../db/migrations")]
async fn mining_worker_failure_persists_nothing(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let config = stub_config(dir.path(), "echo 'insufficient data' >&2\nexit 1\n");

    let app = common::build_test_app_with(pool.clone(), config.clone());
    let token = analyst_token(&pool, app, "miner3").await;

    let app = common::build_test_app_with(pool.clone(), config);
    let response = post_json_auth(
        app,
        "/api/v1/analytics/market-basket",
        serde_json::json!({}),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "WORKER_FAILED");
    assert_eq!(json["error"], "insufficient data");
    assert_eq!(RuleRepo::count(&pool).await.unwrap(), 0);
}

/// A rule with an empty consequent poisons the whole batch.
#[sqlx::test(migrations = "../../db/migrations")]
async fn mining_invalid_rule_rejects_the_batch(pool: PgPool) {
    let raw = r#"[
        {"antecedent": ["A"], "consequent": ["B"], "support": 0.2, "confidence": 0.8, "lift": 2.0},
        {"antecedent": ["C"], "consequent": [], "support": 0.1, "confidence": 0.5, "lift": 1.5}
    ]"#;
    let dir = tempfile::tempdir().unwrap();
    let config = stub_config(dir.path(), &format!("cat <<'EOF'\n{raw}\nEOF\n"));

    let app = common::build_test_app_with(pool.clone(), config.clone());
    let token = analyst_token(&pool, app, "miner4").await;

    let app = common::build_test_app_with(pool.clone(), config);
    let response = post_json_auth(
        app,
        "/api/v1/analytics/market-basket",
        serde_json::json!({}),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["code"], "MALFORMED_WORKER_OUTPUT");
    assert_eq!(RuleRepo::count(&pool).await.unwrap(), 0);
}

/// Out-of-range thresholds never reach the worker.
#[sqlx::test(migrations = "../../db/migrations")]
async fn mining_thresholds_are_validated(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = analyst_token(&pool, app, "miner5").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "min_support": 2.0 });
    let response = post_json_auth(app, "/api/v1/analytics/market-basket", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}
