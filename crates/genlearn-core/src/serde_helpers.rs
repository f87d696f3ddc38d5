//! Small deserialization helpers for backend records.
//!
//! The backend stores optional columns as empty strings, so an absent
//! value can arrive as `""`, `null`, or not at all.

use serde::{Deserialize, Deserializer};

pub fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
