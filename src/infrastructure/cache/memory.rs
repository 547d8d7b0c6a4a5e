//! In-process cache tier backed by moka.
//!
//! Values are stored natively (no serialization). Expiration is enforced
//! per entry through moka's [`Expiry`] hook so each entry carries its own
//! absolute deadline and sliding window; capacity accounting uses the
//! policy's size weight, scaled by priority.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use tracing::debug;

use super::policy::EntryPolicy;
use super::tier::{CacheResult, CacheTier};

/// One stored entry with its resolved expiration parameters.
#[derive(Clone)]
struct StoredEntry<V> {
    value: V,
    /// Wall-clock deadline for the absolute component, fixed at insert time.
    deadline: Option<Instant>,
    /// Sliding window; each hit resets the expiry to this (capped by `deadline`).
    idle: Option<Duration>,
    /// Priority-scaled weight reported to the capacity accounting.
    weight: u32,
}

impl<V> StoredEntry<V> {
    /// Time left before this entry expires, evaluated at `now`: the shorter
    /// of the remaining absolute budget and the sliding window. `None` means
    /// the entry never expires.
    fn remaining(&self, now: Instant) -> Option<Duration> {
        let until_deadline = self.deadline.map(|d| d.saturating_duration_since(now));
        match (until_deadline, self.idle) {
            (Some(abs), Some(idle)) => Some(abs.min(idle)),
            (Some(abs), None) => Some(abs),
            (None, Some(idle)) => Some(idle),
            (None, None) => None,
        }
    }
}

/// Per-entry expiration driven by the entry's own policy fields.
struct PolicyExpiry;

impl<V> Expiry<String, StoredEntry<V>> for PolicyExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &StoredEntry<V>,
        created_at: Instant,
    ) -> Option<Duration> {
        entry.remaining(created_at)
    }

    fn expire_after_read(
        &self,
        _key: &String,
        entry: &StoredEntry<V>,
        read_at: Instant,
        duration_until_expiry: Option<Duration>,
        _last_modified_at: Instant,
    ) -> Option<Duration> {
        if entry.idle.is_none() {
            // Absolute-only entries keep their original deadline.
            duration_until_expiry
        } else {
            entry.remaining(read_at)
        }
    }

    // An overwrite replaces the entry's policy; without this, moka keeps
    // the previous entry's expiry until the next read.
    fn expire_after_update(
        &self,
        _key: &String,
        entry: &StoredEntry<V>,
        updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        entry.remaining(updated_at)
    }
}

/// In-process cache tier.
///
/// Entries may be evicted before their TTL when the cache is over capacity;
/// the policy's priority makes low-priority entries go first (see
/// [`EntryPolicy::effective_weight`]). This is best-effort, not a hard promise.
pub struct MemoryTier<V> {
    cache: Cache<String, StoredEntry<V>>,
}

impl<V> MemoryTier<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Creates a tier bounded to `max_capacity` weight units.
    pub fn new(max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .weigher(|_key: &String, entry: &StoredEntry<V>| entry.weight)
            .expire_after(PolicyExpiry)
            .build();

        Self { cache }
    }

    /// Flushes moka's pending maintenance work so expired entries are
    /// observable immediately. Test-only; production reads do not need it.
    #[cfg(test)]
    async fn sync(&self) {
        self.cache.run_pending_tasks().await;
    }
}

#[async_trait]
impl<V> CacheTier<V> for MemoryTier<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> CacheResult<Option<V>> {
        match self.cache.get(key).await {
            Some(entry) => {
                debug!("memory cache HIT: {}", key);
                Ok(Some(entry.value))
            }
            None => {
                debug!("memory cache MISS: {}", key);
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: &V, policy: &EntryPolicy) -> CacheResult<()> {
        let entry = StoredEntry {
            value: value.clone(),
            // checked_add: a TTL too large to represent means no deadline.
            deadline: policy
                .expiration
                .time_to_live()
                .and_then(|ttl| Instant::now().checked_add(ttl)),
            idle: policy.expiration.time_to_idle(),
            weight: policy.effective_weight(),
        };

        self.cache.insert(key.to_string(), entry).await;
        debug!("memory cache SET: {}", key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        let removed = self.cache.remove(key).await.is_some();
        if removed {
            debug!("memory cache INVALIDATE: {}", key);
        }
        Ok(removed)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
