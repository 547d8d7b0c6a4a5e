#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use customer_cache::prelude::*;
use serde_json::json;

/// In-memory stand-in for the PostgreSQL repository so handler tests run
/// without a database. Counts loads so tests can assert how often the
/// cache-aside flow fell through to the backing store.
pub struct StubCustomerRepository {
    customers: Vec<Customer>,
    calls: AtomicUsize,
    fail: AtomicBool,
}

impl StubCustomerRepository {
    pub fn new(customers: Vec<Customer>) -> Self {
        Self {
            customers,
            calls: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        }
    }

    pub fn load_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl CustomerRepository for StubCustomerRepository {
    async fn find_all(&self) -> Result<Vec<Customer>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::internal("Database error", json!({})));
        }
        Ok(self.customers.clone())
    }

    async fn count(&self) -> Result<i64, AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::internal("Database error", json!({})));
        }
        Ok(self.customers.len() as i64)
    }
}

/// A tier whose every operation fails with a transport error, simulating an
/// unreachable Redis.
pub struct FailingTier;

#[async_trait]
impl CacheTier<Vec<Customer>> for FailingTier {
    async fn get(&self, _key: &str) -> Result<Option<Vec<Customer>>, CacheError> {
        Err(CacheError::Transport("connection refused".to_string()))
    }

    async fn set(
        &self,
        _key: &str,
        _value: &Vec<Customer>,
        _policy: &EntryPolicy,
    ) -> Result<(), CacheError> {
        Err(CacheError::Transport("connection refused".to_string()))
    }

    async fn delete(&self, _key: &str) -> Result<bool, CacheError> {
        Err(CacheError::Transport("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

pub fn sample_customers() -> Vec<Customer> {
    vec![
        Customer::new(
            1,
            "Alice".to_string(),
            "alice@example.com".to_string(),
            Utc::now(),
        ),
        Customer::new(
            2,
            "Bob".to_string(),
            "bob@example.com".to_string(),
            Utc::now(),
        ),
    ]
}

pub fn test_policies() -> CachePolicies {
    let policy = EntryPolicy::new(ExpirationPolicy::AbsoluteAndSliding {
        ttl: Duration::from_secs(300),
        idle: Duration::from_secs(120),
    })
    .with_priority(CachePriority::High)
    .with_weight(1024);

    CachePolicies {
        memory: policy,
        redis: policy,
        kv: policy,
    }
}

/// State with working in-process tiers on both cache endpoints.
pub fn create_test_state(repository: Arc<StubCustomerRepository>) -> AppState {
    AppState::new(
        Arc::new(CustomerService::new(repository)),
        Arc::new(MemoryTier::new(1_048_576)),
        Arc::new(MemoryTier::new(1_048_576)),
        Arc::new(MemoryTier::new(1_048_576)),
        test_policies(),
    )
}

/// State whose distributed tier is unreachable.
pub fn create_degraded_state(repository: Arc<StubCustomerRepository>) -> AppState {
    AppState::new(
        Arc::new(CustomerService::new(repository)),
        Arc::new(MemoryTier::new(1_048_576)),
        Arc::new(FailingTier),
        Arc::new(MemoryTier::new(1_048_576)),
        test_policies(),
    )
}
