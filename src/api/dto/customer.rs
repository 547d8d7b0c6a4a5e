//! DTOs for customer endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Customer;

/// One customer in a list response.
#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            email: customer.email,
            created_at: customer.created_at,
        }
    }
}
