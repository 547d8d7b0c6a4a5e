//! Data Transfer Objects for request/response serialization.

pub mod cache_entry;
pub mod customer;
pub mod health;
