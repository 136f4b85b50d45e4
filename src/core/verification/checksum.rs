//! Checksum calculation for exported documents
//!
//! Two documents with the same entries have the same checksum no matter
//! which layout they were rendered in or in which order their keys appear.

use crate::domain::Result;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Calculate SHA-256 checksum of JSON data
///
/// Keys are sorted recursively and the value is serialized without
/// whitespace before hashing.
///
/// # Examples
///
/// ```
/// use punkt_export::core::verification::checksum::calculate_checksum;
/// use serde_json::json;
///
/// let data = json!({"AbbrevTypes": {"dr": 1}});
/// let checksum = calculate_checksum(&data).unwrap();
/// assert_eq!(checksum.len(), 64);
/// ```
pub fn calculate_checksum(data: &Value) -> Result<String> {
    let normalized = normalize_json(data);
    let data_str = serde_json::to_string(&normalized)?;
    Ok(calculate_checksum_bytes(data_str.as_bytes()))
}

/// Recursively sort object keys
fn normalize_json(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> = map
                .iter()
                .map(|(k, v)| (k.clone(), normalize_json(v)))
                .collect();
            Value::Object(sorted.into_iter().collect())
        }
        Value::Array(arr) => Value::Array(arr.iter().map(normalize_json).collect()),
        _ => value.clone(),
    }
}

/// Calculate SHA-256 checksum of raw bytes as lowercase hex
pub fn calculate_checksum_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    format!("{result:x}")
}
