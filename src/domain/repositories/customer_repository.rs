//! Repository trait for customer data access.

use crate::domain::entities::Customer;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the authoritative customer store.
///
/// The caching layer only ever consults this on a miss; cached data is a
/// read optimization over this store, never the source of truth.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCustomerRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Loads all customers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_all(&self) -> Result<Vec<Customer>, AppError>;

    /// Counts customers. Used by the health check.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
