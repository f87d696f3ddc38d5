//! Fail-closed decoding of list responses.
//!
//! List endpoints answer either with a bare array or with the array wrapped
//! in an object under a known key. Any other shape is rejected with
//! [`GenlearnError::UnexpectedResponseShape`]; nothing is silently treated
//! as an empty list.

use genlearn_core::{GenlearnError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub const SESSIONS_KEY: &str = "sessions";
pub const QUESTIONS_KEY: &str = "questions";
pub const FIGURES_KEY: &str = "figures";
pub const TOPICS_KEY: &str = "topics";
pub const GAPS_KEY: &str = "gaps";
pub const ANALOGIES_KEY: &str = "analogies";

fn expected_shape(wrapper_keys: &[&str]) -> String {
    if wrapper_keys.is_empty() {
        "a JSON array".to_string()
    } else {
        format!("a JSON array or an object with '{}'", wrapper_keys.join("' or '"))
    }
}

/// Decodes `value` as a list of `T`.
pub fn decode_list<T: DeserializeOwned>(
    endpoint: &str,
    value: Value,
    wrapper_keys: &[&str],
) -> Result<Vec<T>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => wrapper_keys
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .ok_or_else(|| {
                GenlearnError::unexpected_shape(endpoint, expected_shape(wrapper_keys))
            })?,
        _ => {
            return Err(GenlearnError::unexpected_shape(
                endpoint,
                expected_shape(wrapper_keys),
            ));
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| GenlearnError::Serialization {
                format: "JSON".to_string(),
                message: format!("{endpoint}[{index}]: {e}"),
            })
        })
        .collect()
}

/// Extracts the object stored under `key`, e.g. `{"message": .., "tournament": {..}}`.
pub fn decode_field<T: DeserializeOwned>(endpoint: &str, value: Value, key: &str) -> Result<T> {
    let missing = || GenlearnError::unexpected_shape(endpoint, format!("an object with '{key}'"));
    let Value::Object(mut map) = value else {
        return Err(missing());
    };
    let field = map.remove(key).ok_or_else(missing)?;
    serde_json::from_value(field).map_err(|e| GenlearnError::Serialization {
        format: "JSON".to_string(),
        message: format!("{endpoint}.{key}: {e}"),
    })
}
