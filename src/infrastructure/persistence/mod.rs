//! PostgreSQL repository implementations.

mod pg_customer_repository;

pub use pg_customer_repository::PgCustomerRepository;
