//! Handlers for the two cached customer list endpoints.
//!
//! Both run the same cache-aside flow through
//! [`crate::application::cache_aside::fetch_or_load`]; they differ only in
//! which tier and policy they hand it. The `x-cache` response header reports
//! hit or miss so the two strategies can be compared from a client.

use axum::{Json, extract::State, response::IntoResponse};

use crate::api::dto::customer::CustomerResponse;
use crate::application::cache_aside::fetch_or_load;
use crate::error::AppError;
use crate::state::AppState;

/// Cache key for the full customer list. One key per result shape; both
/// tiers use the same key because they are separate keyspaces.
pub const CUSTOMER_LIST_KEY: &str = "customers:all";

/// Returns all customers through the in-process cache tier.
///
/// # Endpoint
///
/// `GET /api/customers/memory`
///
/// # Errors
///
/// Returns 500 if the database load fails. Cache problems never fail the
/// request; they degrade to a database read.
pub async fn customers_via_memory_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let service = state.customer_service.clone();

    let (customers, outcome) = fetch_or_load(
        state.customer_memory_tier.as_ref(),
        CUSTOMER_LIST_KEY,
        &state.policies.memory,
        || async move { service.list_customers().await },
    )
    .await?;

    let body: Vec<CustomerResponse> = customers.into_iter().map(Into::into).collect();
    Ok(([("x-cache", outcome.as_header_value())], Json(body)))
}

/// Returns all customers through the Redis-backed distributed tier.
///
/// # Endpoint
///
/// `GET /api/customers/redis`
///
/// # Errors
///
/// Returns 500 if the database load fails or a cached payload cannot be
/// decoded. An unreachable Redis degrades to a database read.
pub async fn customers_via_redis_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let service = state.customer_service.clone();

    let (customers, outcome) = fetch_or_load(
        state.customer_redis_tier.as_ref(),
        CUSTOMER_LIST_KEY,
        &state.policies.redis,
        || async move { service.list_customers().await },
    )
    .await?;

    let body: Vec<CustomerResponse> = customers.into_iter().map(Into::into).collect();
    Ok(([("x-cache", outcome.as_header_value())], Json(body)))
}
