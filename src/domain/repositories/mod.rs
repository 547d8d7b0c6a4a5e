//! Data access trait definitions.

mod customer_repository;

pub use customer_repository::CustomerRepository;

#[cfg(test)]
pub use customer_repository::MockCustomerRepository;
