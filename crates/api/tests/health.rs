//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_local_app, build_test_app, get, TEST_BUCKET};
use kanji_core::environment::AppEnv;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_returns_ok_with_json(pool: PgPool) {
    let (app, _store) = build_test_app(pool, AppEnv::Local);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["environment"], "LOCAL");
    assert_eq!(json["bucket"], TEST_BUCKET);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_is_not_csrf_guarded_in_prod(pool: PgPool) {
    let (app, _store) = build_test_app(pool, AppEnv::Prod);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("set-cookie").is_none());
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let (app, _store) = build_local_app();
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let (app, _store) = build_local_app();
    let response = get(app, "/empty").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(
        request_id.to_str().unwrap().len(),
        36,
        "x-request-id should be a UUID string"
    );
}
