//! DTOs for the raw key/value cache endpoints.

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/cache`.
#[derive(Debug, Deserialize)]
pub struct SetCacheRequest {
    pub key: String,
    pub value: String,
}

/// Response for `GET /api/cache/{key}`.
///
/// `value` is `null` when the key is absent or expired.
#[derive(Debug, Serialize)]
pub struct CacheValueResponse {
    pub key: String,
    pub value: Option<String>,
}
