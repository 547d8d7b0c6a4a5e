//! Shared application state.
//!
//! All cache tiers are explicitly constructed and owned here; there is no
//! process-wide implicit cache. Lifecycle is tied to the hosting process
//! through this state, which is cloned into every handler.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::CustomerService;
use crate::config::Config;
use crate::domain::entities::Customer;
use crate::infrastructure::cache::{CachePriority, CacheTier, EntryPolicy, ExpirationPolicy};

/// Entry policies used by the endpoints, resolved once at startup.
#[derive(Debug, Clone, Copy)]
pub struct CachePolicies {
    /// Customer list entries on the in-process tier.
    pub memory: EntryPolicy,
    /// Customer list entries on the distributed tier.
    pub redis: EntryPolicy,
    /// Raw key/value entries written through the pass-through endpoint.
    pub kv: EntryPolicy,
}

impl CachePolicies {
    /// Builds the endpoint policies from configuration.
    pub fn from_config(config: &Config) -> Self {
        let memory = EntryPolicy::new(ExpirationPolicy::AbsoluteAndSliding {
            ttl: Duration::from_secs(config.memory_ttl_seconds),
            idle: Duration::from_secs(config.memory_idle_seconds),
        })
        .with_priority(CachePriority::High)
        .with_weight(1024);

        let redis = EntryPolicy::new(ExpirationPolicy::AbsoluteAndSliding {
            ttl: Duration::from_secs(config.redis_ttl_seconds),
            idle: Duration::from_secs(config.redis_idle_seconds),
        });

        Self {
            memory,
            redis,
            kv: memory,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub customer_service: Arc<CustomerService>,
    /// In-process tier for the customer list.
    pub customer_memory_tier: Arc<dyn CacheTier<Vec<Customer>>>,
    /// Distributed tier for the customer list (NullTier when Redis is disabled).
    pub customer_redis_tier: Arc<dyn CacheTier<Vec<Customer>>>,
    /// In-process tier behind the raw key/value endpoints.
    pub kv_tier: Arc<dyn CacheTier<String>>,
    pub policies: CachePolicies,
}

impl AppState {
    pub fn new(
        customer_service: Arc<CustomerService>,
        customer_memory_tier: Arc<dyn CacheTier<Vec<Customer>>>,
        customer_redis_tier: Arc<dyn CacheTier<Vec<Customer>>>,
        kv_tier: Arc<dyn CacheTier<String>>,
        policies: CachePolicies,
    ) -> Self {
        Self {
            customer_service,
            customer_memory_tier,
            customer_redis_tier,
            kv_tier,
            policies,
        }
    }
}
