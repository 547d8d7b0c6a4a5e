//! Serialization adapter for byte-oriented cache tiers.
//!
//! The in-process tier stores values natively and never goes through this
//! module; the Redis tier stores opaque JSON bytes produced here.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::tier::{CacheError, CacheResult};

/// Encodes a domain value into the byte representation stored in the tier.
///
/// # Errors
///
/// Returns [`CacheError::Transport`]: an encode failure happens on the write
/// path, where callers treat it like any other transport fault (the write is
/// skipped and the request proceeds from the freshly loaded value).
/// [`CacheError::Decode`] is reserved for corrupted stored payloads.
pub fn encode<V: Serialize>(value: &V) -> CacheResult<Vec<u8>> {
    serde_json::to_vec(value)
        .map_err(|e| CacheError::Transport(format!("failed to encode cache value: {e}")))
}

/// Decodes stored bytes back into a domain value.
///
/// # Errors
///
/// Returns [`CacheError::Decode`] if the bytes are not valid encoded domain
/// data (corrupted or schema-mismatched payload). Callers must surface this,
/// not treat it as a miss.
pub fn decode<V: DeserializeOwned>(bytes: &[u8]) -> CacheResult<V> {
    serde_json::from_slice(bytes)
        .map_err(|e| CacheError::Decode(format!("failed to decode cache value: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Customer;
    use chrono::{TimeZone, Utc};

    fn sample_customers() -> Vec<Customer> {
        vec![
            Customer::new(
                1,
                "Alice".to_string(),
                "alice@example.com".to_string(),
                Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap(),
            ),
            Customer::new(
                2,
                "Bob".to_string(),
                "bob@example.com".to_string(),
                Utc.with_ymd_and_hms(2024, 2, 20, 14, 0, 0).unwrap(),
            ),
        ]
    }

    #[test]
    fn test_round_trip() {
        let customers = sample_customers();

        let bytes = encode(&customers).unwrap();
        let decoded: Vec<Customer> = decode(&bytes).unwrap();

        assert_eq!(decoded, customers);
    }

    #[test]
    fn test_round_trip_empty_collection() {
        let customers: Vec<Customer> = vec![];

        let bytes = encode(&customers).unwrap();
        let decoded: Vec<Customer> = decode(&bytes).unwrap();

        assert!(decoded.is_empty());
    }

    #[test]
    fn test_encode_failure_is_a_transport_fault() {
        // serde_json cannot represent non-string map keys.
        let unencodable: std::collections::HashMap<(u8, u8), u8> =
            [((1, 2), 3)].into_iter().collect();

        let result = encode(&unencodable);

        assert!(matches!(result, Err(CacheError::Transport(_))));
    }

    #[test]
    fn test_decode_corrupted_payload() {
        let result: CacheResult<Vec<Customer>> = decode(b"not json at all");

        match result {
            Err(CacheError::Decode(_)) => {}
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_schema_mismatch() {
        // Valid JSON, wrong shape for the target type.
        let result: CacheResult<Vec<Customer>> = decode(br#"{"unexpected": true}"#);

        assert!(matches!(result, Err(CacheError::Decode(_))));
    }
}
