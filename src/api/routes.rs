//! API route configuration.

use crate::api::handlers::{
    customers_via_memory_handler, customers_via_redis_handler, delete_cache_handler,
    get_cache_handler, set_cache_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes.
///
/// # Endpoints
///
/// - `GET    /customers/memory` - Customer list through the in-process cache
/// - `GET    /customers/redis`  - Customer list through the distributed cache
/// - `POST   /cache`            - Store a raw string value under a key
/// - `GET    /cache/{key}`      - Read a raw string value
/// - `DELETE /cache/{key}`      - Invalidate a raw key
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/customers/memory", get(customers_via_memory_handler))
        .route("/customers/redis", get(customers_via_redis_handler))
        .route("/cache", post(set_cache_handler))
        .route(
            "/cache/{key}",
            get(get_cache_handler).delete(delete_cache_handler),
        )
}
