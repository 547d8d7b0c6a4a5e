//! Cache tier abstraction over one cache technology per instance.
//!
//! Provides a [`CacheTier`] trait with three implementations:
//! - [`MemoryTier`] - in-process moka-backed cache, values stored natively
//! - [`RedisTier`] - Redis-backed distributed cache, values stored as bytes
//! - [`NullTier`] - no-op implementation for testing/disabled caching
//!
//! Expiration is described by [`EntryPolicy`], a closed set of policy
//! variants supplied by the caller on every `set`.

pub mod codec;
mod memory;
mod null;
mod policy;
mod redis;
mod tier;

pub use memory::MemoryTier;
pub use null::NullTier;
pub use policy::{CachePriority, EntryPolicy, ExpirationPolicy};
pub use redis::RedisTier;
pub use tier::{CacheError, CacheResult, CacheTier};

#[cfg(test)]
pub use tier::MockCacheTier;
