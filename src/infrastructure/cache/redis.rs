//! Redis-backed distributed cache tier.
//!
//! Values are stored as opaque JSON bytes (see [`super::codec`]) wrapped in a
//! small envelope carrying the entry's absolute deadline and sliding window.
//! Redis key TTLs alone cannot express "sliding, capped by an absolute
//! deadline", so `get` enforces the deadline from the envelope and refreshes
//! the key TTL on sliding hits.
//!
//! Unlike the in-process tier, every operation crosses the network and may
//! fail independently of key existence. Failures surface as
//! [`CacheError::Transport`] - distinct from a miss - and each command runs
//! under a bounded timeout so a stalled Redis cannot stall requests.

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::codec;
use super::policy::EntryPolicy;
use super::tier::{CacheError, CacheResult, CacheTier};

/// Stored alongside the value so expiration semantics survive the network.
#[derive(Serialize, Deserialize)]
struct Envelope<V> {
    value: V,
    /// Absolute deadline as unix milliseconds, if the policy has one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    deadline_ms: Option<i64>,
    /// Sliding window in milliseconds, if the policy has one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    idle_ms: Option<i64>,
}

/// Serialize-only borrow of [`Envelope`], avoids cloning the value on `set`.
#[derive(Serialize)]
struct EnvelopeRef<'a, V> {
    value: &'a V,
    #[serde(skip_serializing_if = "Option::is_none")]
    deadline_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    idle_ms: Option<i64>,
}

/// True when the envelope's absolute deadline has passed.
fn is_past_deadline(deadline_ms: Option<i64>, now_ms: i64) -> bool {
    deadline_ms.is_some_and(|d| now_ms >= d)
}

/// TTL to apply on a sliding hit: the idle window, capped by whatever is
/// left of the absolute budget.
fn refresh_ttl_ms(idle_ms: i64, deadline_ms: Option<i64>, now_ms: i64) -> i64 {
    match deadline_ms {
        Some(deadline) => idle_ms.min(deadline - now_ms),
        None => idle_ms,
    }
}

/// Distributed cache tier over a shared Redis instance.
pub struct RedisTier<V> {
    conn: ConnectionManager,
    key_prefix: String,
    op_timeout: Duration,
    _marker: PhantomData<fn() -> V>,
}

impl<V> RedisTier<V> {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `op_timeout` - upper bound applied to every subsequent cache command
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, op_timeout: Duration) -> CacheResult<Self> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::Connection(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            conn: manager,
            key_prefix: "cache:".to_string(),
            op_timeout,
            _marker: PhantomData,
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }

    /// Runs one Redis command under the configured timeout, folding both
    /// timeouts and command failures into [`CacheError::Transport`].
    async fn run<T>(
        &self,
        op: &str,
        key: &str,
        fut: impl Future<Output = redis::RedisResult<T>>,
    ) -> CacheResult<T> {
        match timeout(self.op_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(CacheError::Transport(format!(
                "Redis {} error for {}: {}",
                op, key, e
            ))),
            Err(_) => Err(CacheError::Transport(format!(
                "Redis {} for {} timed out after {:?}",
                op, key, self.op_timeout
            ))),
        }
    }
}

#[async_trait]
impl<V> CacheTier<V> for RedisTier<V>
where
    V: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> CacheResult<Option<V>> {
        let full_key = self.build_key(key);
        let mut conn = self.conn.clone();

        let bytes: Option<Vec<u8>> = self
            .run("GET", key, conn.get(&full_key))
            .await?;

        let Some(bytes) = bytes else {
            debug!("redis cache MISS: {}", key);
            return Ok(None);
        };

        let envelope: Envelope<V> = codec::decode(&bytes)?;
        let now_ms = Utc::now().timestamp_millis();

        if is_past_deadline(envelope.deadline_ms, now_ms) {
            // The key outlived its absolute deadline (its TTL was last
            // refreshed by a sliding hit); drop it and report a miss.
            let mut conn = self.conn.clone();
            if let Err(e) = self.run("DEL", key, conn.del::<_, i64>(&full_key)).await {
                warn!("{}", e);
            }
            debug!("redis cache MISS (past deadline): {}", key);
            return Ok(None);
        }

        if let Some(idle_ms) = envelope.idle_ms {
            let ttl_ms = refresh_ttl_ms(idle_ms, envelope.deadline_ms, now_ms);
            if ttl_ms > 0 {
                // Sliding refresh; a failure here does not invalidate the hit.
                let mut conn = self.conn.clone();
                if let Err(e) = self
                    .run("PEXPIRE", key, conn.pexpire::<_, bool>(&full_key, ttl_ms))
                    .await
                {
                    warn!("{}", e);
                }
            }
        }

        debug!("redis cache HIT: {}", key);
        Ok(Some(envelope.value))
    }

    async fn set(&self, key: &str, value: &V, policy: &EntryPolicy) -> CacheResult<()> {
        let full_key = self.build_key(key);
        let now_ms = Utc::now().timestamp_millis();

        let envelope = EnvelopeRef {
            value,
            deadline_ms: policy
                .expiration
                .time_to_live()
                .map(|ttl| now_ms + ttl.as_millis() as i64),
            idle_ms: policy
                .expiration
                .time_to_idle()
                .map(|idle| idle.as_millis() as i64),
        };
        let bytes = codec::encode(&envelope)?;

        // Priority and weight are local-tier concerns; Redis manages its own
        // memory under its configured maxmemory policy.
        let ttl_seconds = policy.expiration.initial_ttl().as_secs().max(1);

        let mut conn = self.conn.clone();
        self.run(
            "SET",
            key,
            conn.set_ex::<_, _, ()>(&full_key, bytes, ttl_seconds),
        )
        .await?;

        debug!("redis cache SET: {} (TTL: {}s)", key, ttl_seconds);
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        let full_key = self.build_key(key);
        let mut conn = self.conn.clone();

        let deleted: i64 = self.run("DEL", key, conn.del(&full_key)).await?;
        if deleted > 0 {
            debug!("redis cache INVALIDATE: {}", key);
        }
        Ok(deleted > 0)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.conn.clone();
        matches!(timeout(self.op_timeout, conn.ping::<()>()).await, Ok(Ok(())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_past_deadline() {
        assert!(!is_past_deadline(None, 1_000));
        assert!(!is_past_deadline(Some(2_000), 1_999));
        assert!(is_past_deadline(Some(2_000), 2_000));
        assert!(is_past_deadline(Some(2_000), 2_001));
    }

    #[test]
    fn test_refresh_ttl_uses_idle_window() {
        assert_eq!(refresh_ttl_ms(120_000, None, 1_000), 120_000);
    }

    #[test]
    fn test_refresh_ttl_capped_by_deadline() {
        // 30s of absolute budget left, 120s window: the deadline wins.
        assert_eq!(refresh_ttl_ms(120_000, Some(40_000), 10_000), 30_000);
        // Plenty of budget left: the window wins.
        assert_eq!(refresh_ttl_ms(120_000, Some(600_000), 10_000), 120_000);
    }

    #[test]
    fn test_envelope_round_trip() {
        let envelope = EnvelopeRef {
            value: &vec!["Alice".to_string(), "Bob".to_string()],
            deadline_ms: Some(1_700_000_000_000),
            idle_ms: Some(120_000),
        };

        let bytes = codec::encode(&envelope).unwrap();
        let decoded: Envelope<Vec<String>> = codec::decode(&bytes).unwrap();

        assert_eq!(decoded.value, vec!["Alice", "Bob"]);
        assert_eq!(decoded.deadline_ms, Some(1_700_000_000_000));
        assert_eq!(decoded.idle_ms, Some(120_000));
    }

    #[test]
    fn test_envelope_without_expiration_fields() {
        // Older payloads without the optional fields still decode.
        let decoded: Envelope<String> = codec::decode(br#"{"value":"v"}"#).unwrap();

        assert_eq!(decoded.value, "v");
        assert!(decoded.deadline_ms.is_none());
        assert!(decoded.idle_ms.is_none());
    }
}
