use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::domain::validation::ValidationError;

/// Zone-less layouts tried in order; `%.f` also accepts a missing fraction.
const NAIVE_LAYOUTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.fZ"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// An instant reported by, or sent to, the Esendex API.
///
/// Endpoints disagree on the textual layout: some emit fractional seconds,
/// some do not, and only some append a `Z`. The API always reports UTC, so
/// zone-less values are read as UTC.
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Parse any of the layouts the API is known to emit.
    ///
    /// Layouts are attempted in a fixed order and the first match wins:
    /// `2012-01-01T12:00:05[.fff]`, then `2012-01-01T12:00:05[.fff]Z`, then a
    /// full RFC 3339 value with an explicit offset (converted to UTC).
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();

        for layout in NAIVE_LAYOUTS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, layout) {
                return Ok(Self(naive.and_utc()));
            }
        }

        DateTime::parse_from_rfc3339(trimmed)
            .map(|parsed| Self(parsed.with_timezone(&Utc)))
            .map_err(|_| ValidationError::InvalidTimestamp {
                input: input.to_owned(),
            })
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    pub fn into_datetime(self) -> DateTime<Utc> {
        self.0
    }

    /// RFC 3339 with second precision, as used by the `start`/`finish` filters.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(value: Timestamp) -> Self {
        value.0
    }
}

impl FromStr for Timestamp {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Canonical request form (`sendat`): RFC 3339, sub-second digits only when
/// present, always `Z`.
impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
