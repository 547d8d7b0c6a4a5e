//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Database**: Counts the customer table
/// 2. **Memory cache**: In-process tier liveness (always ok)
/// 3. **Redis cache**: PING through the distributed tier
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;

    let memory_check = check_memory_cache(&state).await;

    let redis_check = check_redis_cache(&state).await;

    let all_healthy =
        db_check.status == "ok" && memory_check.status == "ok" && redis_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database: db_check,
            memory_cache: memory_check,
            redis_cache: redis_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks database connectivity by counting customers.
async fn check_database(state: &AppState) -> CheckStatus {
    match state.customer_service.count_customers().await {
        Ok(count) => CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("Connected, {} customers", count)),
        },
        Err(e) => CheckStatus {
            status: "error".to_string(),
            message: Some(format!("Database error: {:?}", e)),
        },
    }
}

/// Checks the in-process tier.
async fn check_memory_cache(state: &AppState) -> CheckStatus {
    if state.customer_memory_tier.health_check().await {
        CheckStatus {
            status: "ok".to_string(),
            message: None,
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some("Memory cache unavailable".to_string()),
        }
    }
}

/// Checks distributed cache connectivity via PING.
async fn check_redis_cache(state: &AppState) -> CheckStatus {
    if state.customer_redis_tier.health_check().await {
        CheckStatus {
            status: "ok".to_string(),
            message: Some("Redis connected".to_string()),
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some("Redis connection failed".to_string()),
        }
    }
}
