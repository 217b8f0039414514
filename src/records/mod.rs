//! Record types and decoding of raw JSON payloads
//!
//! Collections are fetched and persisted as raw JSON arrays so the local
//! copies stay byte-for-byte what the endpoint returned. Decoding into typed
//! records happens one element at a time: an element that does not match the
//! expected shape is logged and skipped instead of rejecting the collection.

pub mod types;

pub use types::*;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

/// Result of decoding a raw collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

/// Decode each element of `values` into `T`, skipping the ones that fail.
///
/// `kind` names the collection in log output.
pub fn decode_records<T: DeserializeOwned>(kind: &str, values: &[Value]) -> Decoded<T> {
    let mut records = Vec::with_capacity(values.len());
    let mut skipped = 0;

    for (index, value) in values.iter().enumerate() {
        match T::deserialize(value) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!("Skipping malformed {} record at index {}: {}", kind, index, e);
                skipped += 1;
            }
        }
    }

    debug!(
        "Decoded {} {} record(s), skipped {}",
        records.len(),
        kind,
        skipped
    );
    Decoded { records, skipped }
}

/// Decode users; an absent collection decodes to nothing.
pub fn decode_users(values: Option<&[Value]>) -> Decoded<User> {
    decode_records("user", values.unwrap_or_default())
}

/// Decode posts; an absent collection decodes to nothing.
pub fn decode_posts(values: Option<&[Value]>) -> Decoded<Post> {
    decode_records("post", values.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_users_keeps_unknown_fields_out() {
        let values = vec![json!({
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": {"street": "Kulas Light", "city": "Gwenborough"},
            "phone": "1-770-736-8031 x56442"
        })];

        let decoded = decode_users(Some(&values));
        assert_eq!(decoded.skipped, 0);
        assert_eq!(decoded.records.len(), 1);
        assert_eq!(decoded.records[0].city(), Some("Gwenborough"));
    }

    #[test]
    fn test_decode_users_tolerates_missing_address() {
        let values = vec![json!({"id": 2, "name": "B", "email": "b@x.com"})];

        let decoded = decode_users(Some(&values));
        assert_eq!(decoded.records.len(), 1);
        assert_eq!(decoded.records[0].address, None);
        assert_eq!(decoded.records[0].city(), None);
    }

    #[test]
    fn test_decode_skips_malformed_elements() {
        let values = vec![
            json!({"id": 1, "name": "A", "email": "a@x.com", "address": {"city": "X"}}),
            json!({"id": "not-a-number", "name": "B", "email": "b@x.com"}),
            json!("just a string"),
        ];

        let decoded = decode_users(Some(&values));
        assert_eq!(decoded.records.len(), 1);
        assert_eq!(decoded.skipped, 2);
    }

    #[test]
    fn test_decode_posts_without_owner() {
        let values = vec![
            json!({"userId": 1, "id": 1, "title": "t", "body": "b"}),
            json!({"id": 2, "title": "orphan"}),
        ];

        let decoded = decode_posts(Some(&values));
        assert_eq!(decoded.skipped, 0);
        assert_eq!(decoded.records[0].user_id, Some(1));
        assert_eq!(decoded.records[1].user_id, None);
    }

    #[test]
    fn test_decode_absent_collection() {
        let decoded = decode_posts(None);
        assert!(decoded.records.is_empty());
        assert_eq!(decoded.skipped, 0);
    }
}
