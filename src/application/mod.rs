//! Application layer: business logic and cache orchestration.
//!
//! - [`services`] - domain services over the repository traits
//! - [`cache_aside`] - the read-through cache-aside orchestrator

pub mod cache_aside;
pub mod services;
