//! PostgreSQL implementation of the customer repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Customer;
use crate::domain::repositories::CustomerRepository;
use crate::error::AppError;

/// PostgreSQL repository for the customer table.
pub struct PgCustomerRepository {
    pool: Arc<PgPool>,
}

impl PgCustomerRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer::new(row.id, row.name, row.email, row.created_at)
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn find_all(&self) -> Result<Vec<Customer>, AppError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, name, email, created_at FROM customers ORDER BY id",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
