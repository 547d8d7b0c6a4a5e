//! Cache-aside orchestration: check the tier, load on miss, populate, return.
//!
//! This is the one reusable flow behind the customer endpoints. The caller
//! supplies a key, a tier, an expiration policy and a loader; the tier owns
//! entry lifetime, the orchestrator only issues get/set calls per request.

use std::fmt;

use tracing::{debug, error, warn};

use crate::infrastructure::cache::{CacheError, CacheTier, EntryPolicy};

/// Whether the value came from the tier or the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    Hit,
    Miss,
}

impl CacheOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit)
    }

    /// Value for the `x-cache` response header.
    pub fn as_header_value(&self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
        }
    }
}

/// Failure of a [`fetch_or_load`] call.
///
/// Tier transport problems never appear here - they degrade to the backing
/// store internally. Only a failed load or a corrupted cache payload reach
/// the caller.
#[derive(Debug, thiserror::Error)]
pub enum FetchError<E: fmt::Debug> {
    /// The backing-store load failed; nothing was written to the tier.
    #[error("backing store load failed: {0:?}")]
    Load(E),
    /// The tier returned bytes that could not be decoded into the domain
    /// type. A data-integrity fault, not a miss.
    #[error("cache payload could not be decoded")]
    Decode(#[source] CacheError),
}

/// Read-through cache-aside: returns the value for `key` plus whether it was
/// a cache hit.
///
/// # Behavior
///
/// - Tier hit: the value is returned as-is; the only side effect is whatever
///   sliding refresh the tier itself performs.
/// - Tier miss: the loader runs, its result is written to the tier with
///   `policy`, and the freshly loaded value is returned. A failed write is
///   logged and swallowed - the cache is an optimization, not a dependency.
/// - Tier transport error: logged, then treated like a miss except the tier
///   is not written to either; invisible to the caller as long as the
///   backing store is healthy.
/// - Loader failure: propagated without writing anything to the tier
///   (failures are never cached).
/// - Decode failure from the tier: propagated as [`FetchError::Decode`].
///
/// The loader is `FnOnce`, so one call invokes it at most once. Concurrent
/// callers that miss on the same key each run their own load (last write
/// wins with equivalent fresh data); there is no single-flight deduplication.
pub async fn fetch_or_load<V, E, L, Fut>(
    tier: &dyn CacheTier<V>,
    key: &str,
    policy: &EntryPolicy,
    loader: L,
) -> Result<(V, CacheOutcome), FetchError<E>>
where
    V: Send + Sync + 'static,
    E: fmt::Debug,
    L: FnOnce() -> Fut,
    Fut: Future<Output = Result<V, E>>,
{
    debug_assert!(!key.is_empty(), "cache key must be non-empty");

    match tier.get(key).await {
        Ok(Some(value)) => {
            debug!("cache-aside HIT: {}", key);
            return Ok((value, CacheOutcome::Hit));
        }
        Ok(None) => {
            debug!("cache-aside MISS: {}", key);
        }
        Err(e @ CacheError::Decode(_)) => {
            error!("corrupted cache payload for {}: {}", key, e);
            return Err(FetchError::Decode(e));
        }
        Err(e) => {
            // Cache hiccup: degrade to the backing store and skip the write.
            warn!("cache unavailable for {}, falling back to store: {}", key, e);
            let value = loader().await.map_err(FetchError::Load)?;
            return Ok((value, CacheOutcome::Miss));
        }
    }

    let value = loader().await.map_err(FetchError::Load)?;

    if let Err(e) = tier.set(key, &value, policy).await {
        warn!("failed to populate cache for {}: {}", key, e);
    }

    Ok((value, CacheOutcome::Miss))
}
