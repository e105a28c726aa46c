//! Serde helpers for ISO 8601 timestamps.
//!
//! Timestamps are written as RFC 3339 UTC with millisecond precision
//! (`2025-01-31T12:00:00.000Z`), widened to micro- or nanoseconds when the
//! value carries them so that nothing is lost on a write. Reading also accepts a bare calendar date
//! (`2025-01-31`), interpreted as midnight UTC, since expiry dates are
//! often entered that way.

use chrono::{DateTime, NaiveDate, SecondsFormat, Timelike as _, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Parses an RFC 3339 timestamp or a `YYYY-MM-DD` date.
///
/// Returns `None` when the input matches neither form.
#[inline]
#[must_use]
pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Nanoseconds per millisecond.
const NANOS_PER_MILLI: u32 = 1_000_000;

/// Formats a timestamp the way it is persisted.
///
/// Whole-millisecond values keep the fixed three-digit fraction; finer
/// values use as many digits as they need.
#[inline]
#[must_use]
pub fn format(value: &DateTime<Utc>) -> String {
    let precision = if value.nanosecond() % NANOS_PER_MILLI == 0 {
        SecondsFormat::Millis
    } else {
        SecondsFormat::AutoSi
    };
    value.to_rfc3339_opts(precision, true)
}

/// Serializes a timestamp as RFC 3339 without losing precision.
///
/// # Errors
///
/// Propagates serializer errors.
#[inline]
pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(value))
}

/// Deserializes a timestamp from RFC 3339 or `YYYY-MM-DD`.
///
/// # Errors
///
/// Fails when the string is neither form.
#[inline]
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

/// Same as the parent module, for optional timestamps.
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes an optional timestamp (`None` as `null`).
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    #[inline]
    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value.as_ref() {
            Some(ts) => serializer.serialize_str(&super::format(ts)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes an optional timestamp.
    ///
    /// # Errors
    ///
    /// Fails when a present string is not a valid timestamp.
    #[inline]
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|value| {
            super::parse(&value)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {value}")))
        })
        .transpose()
    }
}
