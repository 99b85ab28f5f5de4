use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};

use crate::domain::Timestamp;

/// Timestamp element that may be missing or empty.
///
/// Use with `#[serde(default, deserialize_with = "...")]`; missing and blank
/// elements both become `None`, anything else must match a known layout.
pub fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => Timestamp::parse(text).map(Some).map_err(D::Error::custom),
    }
}
