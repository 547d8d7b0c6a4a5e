mod common;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use axum_test::TestServer;
use customer_cache::api::handlers::{
    delete_cache_handler, get_cache_handler, set_cache_handler,
};
use serde_json::json;

use common::{StubCustomerRepository, create_test_state, sample_customers};

fn cache_app() -> TestServer {
    let repo = Arc::new(StubCustomerRepository::new(sample_customers()));
    let app = Router::new()
        .route("/api/cache", post(set_cache_handler))
        .route(
            "/api/cache/{key}",
            get(get_cache_handler).delete(delete_cache_handler),
        )
        .with_state(create_test_state(repo));
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_set_then_get_round_trip() {
    let server = cache_app();

    let set = server
        .post("/api/cache")
        .json(&json!({ "key": "greeting", "value": "hello" }))
        .await;
    set.assert_status(axum::http::StatusCode::NO_CONTENT);

    let get = server.get("/api/cache/greeting").await;
    get.assert_status_ok();
    get.assert_json(&json!({ "key": "greeting", "value": "hello" }));
}

#[tokio::test]
async fn test_get_missing_key_returns_null_value() {
    let server = cache_app();

    let response = server.get("/api/cache/absent").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "key": "absent", "value": null }));
}

#[tokio::test]
async fn test_set_overwrites_existing_value() {
    let server = cache_app();

    server
        .post("/api/cache")
        .json(&json!({ "key": "color", "value": "red" }))
        .await
        .assert_status(axum::http::StatusCode::NO_CONTENT);
    server
        .post("/api/cache")
        .json(&json!({ "key": "color", "value": "blue" }))
        .await
        .assert_status(axum::http::StatusCode::NO_CONTENT);

    let response = server.get("/api/cache/color").await;
    response.assert_json(&json!({ "key": "color", "value": "blue" }));
}

#[tokio::test]
async fn test_set_empty_key_rejected() {
    let server = cache_app();

    let response = server
        .post("/api/cache")
        .json(&json!({ "key": "", "value": "anything" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_delete_existing_key() {
    let server = cache_app();

    server
        .post("/api/cache")
        .json(&json!({ "key": "doomed", "value": "bye" }))
        .await
        .assert_status(axum::http::StatusCode::NO_CONTENT);

    let delete = server.delete("/api/cache/doomed").await;
    delete.assert_status(axum::http::StatusCode::NO_CONTENT);

    let get = server.get("/api/cache/doomed").await;
    get.assert_json(&json!({ "key": "doomed", "value": null }));
}

#[tokio::test]
async fn test_delete_unknown_key_returns_not_found() {
    let server = cache_app();

    let response = server.delete("/api/cache/never-set").await;

    response.assert_status_not_found();
}
