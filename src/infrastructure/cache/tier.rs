//! Cache tier trait and error types.

use async_trait::async_trait;

use super::policy::EntryPolicy;

/// Errors that can occur during cache operations.
///
/// A miss is not an error: tiers report it as `Ok(None)` from [`CacheTier::get`].
/// `Transport` failures are recoverable (callers degrade to the backing store),
/// `Decode` failures are data-integrity faults and must be surfaced.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache connection error: {0}")]
    Connection(String),
    #[error("cache transport error: {0}")]
    Transport(String),
    #[error("cache decode error: {0}")]
    Decode(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Uniform get/set/delete contract over one cache technology.
///
/// Implementations must be thread-safe. The value type is declared per call
/// site; byte-oriented tiers serialize internally, the in-process tier stores
/// values natively.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::MemoryTier`] - in-process moka-backed tier
/// - [`crate::infrastructure::cache::RedisTier`] - Redis-backed distributed tier
/// - [`crate::infrastructure::cache::NullTier`] - no-op fallback for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheTier<V: Send + Sync + 'static>: Send + Sync {
    /// Retrieves the value stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` on a hit (tiers with a sliding policy refresh the
    ///   entry's window as a side effect)
    /// - `Ok(None)` on a true miss
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Transport`] when the tier is unreachable - this
    /// is distinct from a miss so callers can degrade to the backing store.
    /// Returns [`CacheError::Decode`] when a stored payload cannot be decoded
    /// into `V`; this must never be silently treated as a miss.
    async fn get(&self, key: &str) -> CacheResult<Option<V>>;

    /// Stores `value` under `key` with the given expiration policy.
    ///
    /// The tier owns the entry's lifetime from this point on: expiration and
    /// eviction under capacity pressure are enforced by the tier itself.
    async fn set(&self, key: &str, value: &V, policy: &EntryPolicy) -> CacheResult<()>;

    /// Removes the entry stored under `key`.
    ///
    /// Returns `Ok(true)` if an entry existed.
    async fn delete(&self, key: &str) -> CacheResult<bool>;

    /// Checks if the cache backend is reachable.
    ///
    /// Used by the health check endpoint.
    async fn health_check(&self) -> bool;
}
