//! Cache entry expiration and eviction policies.
//!
//! Policies are a closed set of variants passed explicitly by the caller,
//! so every call site states how long its entries live.

use std::time::Duration;

/// How a cache entry expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpirationPolicy {
    /// Entry becomes invalid at a fixed deadline after insertion,
    /// regardless of access pattern.
    Absolute { ttl: Duration },
    /// Entry expires after going unread for `idle`; every hit resets the window.
    Sliding { idle: Duration },
    /// Sliding window capped by an absolute deadline: hits extend the entry,
    /// but never past `ttl` from insertion.
    AbsoluteAndSliding { ttl: Duration, idle: Duration },
}

impl ExpirationPolicy {
    /// Absolute time-to-live component, if the policy has one.
    pub fn time_to_live(&self) -> Option<Duration> {
        match self {
            Self::Absolute { ttl } | Self::AbsoluteAndSliding { ttl, .. } => Some(*ttl),
            Self::Sliding { .. } => None,
        }
    }

    /// Sliding window component, if the policy has one.
    pub fn time_to_idle(&self) -> Option<Duration> {
        match self {
            Self::Sliding { idle } | Self::AbsoluteAndSliding { idle, .. } => Some(*idle),
            Self::Absolute { .. } => None,
        }
    }

    /// The expiry a fresh entry starts with: the shorter of the absolute
    /// deadline and the sliding window.
    pub fn initial_ttl(&self) -> Duration {
        match self {
            Self::Absolute { ttl } => *ttl,
            Self::Sliding { idle } => *idle,
            Self::AbsoluteAndSliding { ttl, idle } => (*ttl).min(*idle),
        }
    }
}

/// Hint for which entries to evict first under memory pressure.
///
/// Only the in-process tier honors priority, and only as a best-effort
/// ordering, never a hard promise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePriority {
    Low,
    #[default]
    Normal,
    High,
    NeverRemove,
}

/// Full per-entry policy: expiration plus the local-tier-only priority
/// and size-weight fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryPolicy {
    pub expiration: ExpirationPolicy,
    pub priority: CachePriority,
    /// Size weight used for capacity accounting on the in-process tier.
    pub weight: u32,
}

impl EntryPolicy {
    /// Creates a policy with `Normal` priority and a weight of 1.
    pub fn new(expiration: ExpirationPolicy) -> Self {
        Self {
            expiration,
            priority: CachePriority::Normal,
            weight: 1,
        }
    }

    pub fn with_priority(mut self, priority: CachePriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// Weight reported to the in-process tier's capacity accounting.
    ///
    /// Lower-priority entries report a larger weight so they are the first
    /// to go under capacity pressure; `NeverRemove` entries report zero and
    /// never contribute to capacity at all.
    pub fn effective_weight(&self) -> u32 {
        match self.priority {
            CachePriority::Low => self.weight.saturating_mul(4),
            CachePriority::Normal => self.weight.saturating_mul(2),
            CachePriority::High => self.weight,
            CachePriority::NeverRemove => 0,
        }
    }
}
