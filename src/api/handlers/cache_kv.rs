//! Raw key/value pass-through handlers over the in-process tier.
//!
//! These bypass the cache-aside orchestrator entirely: no backing store, no
//! loader, just direct tier access under the fixed default policy.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;

use crate::api::dto::cache_entry::{CacheValueResponse, SetCacheRequest};
use crate::error::AppError;
use crate::state::AppState;

/// Reads a raw string value by key.
///
/// # Endpoint
///
/// `GET /api/cache/{key}`
///
/// Always 200; a missing or expired key yields `"value": null`.
pub async fn get_cache_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CacheValueResponse>, AppError> {
    let value = state.kv_tier.get(&key).await?;

    Ok(Json(CacheValueResponse { key, value }))
}

/// Stores a raw string value under a key with the default expiration policy.
///
/// # Endpoint
///
/// `POST /api/cache` with `{ "key": "...", "value": "..." }`
///
/// Returns 204 on success, 400 for an empty key.
pub async fn set_cache_handler(
    State(state): State<AppState>,
    Json(request): Json<SetCacheRequest>,
) -> Result<StatusCode, AppError> {
    if request.key.is_empty() {
        return Err(AppError::bad_request(
            "Cache key must not be empty",
            json!({}),
        ));
    }

    state
        .kv_tier
        .set(&request.key, &request.value, &state.policies.kv)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Removes a raw key.
///
/// # Endpoint
///
/// `DELETE /api/cache/{key}`
///
/// Returns 204 if the key existed, 404 otherwise.
pub async fn delete_cache_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let removed = state.kv_tier.delete(&key).await?;

    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(
            "No cache entry for key",
            json!({ "key": key }),
        ))
    }
}
