//! No-op tier for testing or disabled caching.

use std::marker::PhantomData;

use async_trait::async_trait;
use tracing::debug;

use super::policy::EntryPolicy;
use super::tier::{CacheResult, CacheTier};

/// A cache tier that stores nothing.
///
/// Every `get` is a miss, so callers always fall through to the backing
/// store. Used when Redis is unavailable or caching is explicitly disabled.
pub struct NullTier<V> {
    _marker: PhantomData<fn() -> V>,
}

impl<V> NullTier<V> {
    pub fn new() -> Self {
        debug!("Using NullTier (caching disabled)");
        Self {
            _marker: PhantomData,
        }
    }
}

impl<V> Default for NullTier<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<V> CacheTier<V> for NullTier<V>
where
    V: Send + Sync + 'static,
{
    async fn get(&self, _key: &str) -> CacheResult<Option<V>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &V, _policy: &EntryPolicy) -> CacheResult<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> CacheResult<bool> {
        Ok(false)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
