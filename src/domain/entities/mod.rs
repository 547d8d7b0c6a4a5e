//! Core business data structures.

mod customer;

pub use customer::Customer;
