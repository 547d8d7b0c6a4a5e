//! Customer retrieval service.

use std::sync::Arc;

use crate::domain::entities::Customer;
use crate::domain::repositories::CustomerRepository;
use crate::error::AppError;

/// Service for reading customers from the authoritative store.
///
/// Deliberately thin: the caching layer sits in front of it (see
/// [`crate::application::cache_aside`]), so this service is the loader the
/// orchestrator falls back to on a miss.
pub struct CustomerService {
    repository: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    /// Creates a new customer service.
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }

    /// Loads all customers from the backing store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_customers(&self) -> Result<Vec<Customer>, AppError> {
        self.repository.find_all().await
    }

    /// Counts customers in the backing store. Used by the health check.
    pub async fn count_customers(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}
