//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod cache_kv;
pub mod customers;
pub mod health;

pub use cache_kv::{delete_cache_handler, get_cache_handler, set_cache_handler};
pub use customers::{customers_via_memory_handler, customers_via_redis_handler};
pub use health::health_handler;
