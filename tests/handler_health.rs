mod common;

use std::sync::Arc;

use axum::{Router, routing::get};
use axum_test::TestServer;
use customer_cache::api::handlers::health_handler;

use common::{StubCustomerRepository, create_degraded_state, create_test_state, sample_customers};

fn health_app(state: customer_cache::AppState) -> TestServer {
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_all_components_ok() {
    let repo = Arc::new(StubCustomerRepository::new(sample_customers()));
    let server = health_app(create_test_state(repo));

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["memory_cache"]["status"], "ok");
    assert_eq!(json["checks"]["redis_cache"]["status"], "ok");
}

#[tokio::test]
async fn test_health_reports_database_failure() {
    let repo = Arc::new(StubCustomerRepository::new(sample_customers()));
    repo.set_failing(true);
    let server = health_app(create_test_state(repo));

    let response = server.get("/health").await;

    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "error");
    assert_eq!(json["checks"]["memory_cache"]["status"], "ok");
}

#[tokio::test]
async fn test_health_reports_redis_failure() {
    let repo = Arc::new(StubCustomerRepository::new(sample_customers()));
    let server = health_app(create_degraded_state(repo));

    let response = server.get("/health").await;

    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["redis_cache"]["status"], "error");
}
