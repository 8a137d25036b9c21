//! Serde helpers for the loosely typed TheSportsDB payloads.
//!
//! The API reports missing text as `null`, `""` or omits the field
//! altogether. These helpers fold all three into one representation.

use serde::{Deserialize, Deserializer};

/// Deserializes an optional string, treating `null` and blank text as absent.
pub(crate) fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Deserializes a string, treating `null` as the empty string.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
