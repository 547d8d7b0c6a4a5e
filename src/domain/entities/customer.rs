//! Customer entity backed by the relational customer table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A customer record.
///
/// Opaque to the caching core: tiers and the orchestrator pass it through
/// load/encode/decode without inspecting its fields. `Serialize`/`Deserialize`
/// exist so the byte-oriented tier can round-trip it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Creates a new Customer instance.
    pub fn new(id: i64, name: String, email: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            email,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_customer_creation() {
        let now = Utc::now();
        let customer = Customer::new(
            1,
            "Alice".to_string(),
            "alice@example.com".to_string(),
            now,
        );

        assert_eq!(customer.id, 1);
        assert_eq!(customer.name, "Alice");
        assert_eq!(customer.email, "alice@example.com");
        assert_eq!(customer.created_at, now);
    }

    #[test]
    fn test_customer_serde_round_trip() {
        let customer = Customer::new(
            7,
            "Bob".to_string(),
            "bob@example.com".to_string(),
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        );

        let json = serde_json::to_string(&customer).unwrap();
        let decoded: Customer = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, customer);
    }
}
