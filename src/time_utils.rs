// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting and parsing.
//!
//! Persisted timestamps are ISO 8601 text with millisecond precision and a
//! `Z` suffix (`2024-01-15T10:30:00.000Z`), the same shape a browser's
//! `JSON.stringify(new Date())` produces.

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 with milliseconds and a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an ISO 8601 / RFC3339 timestamp into UTC.
pub fn parse_utc_rfc3339(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(text).map(|date| date.with_timezone(&Utc))
}

/// Build a fixed offset from minutes east of UTC.
pub fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
}

/// Millisecond timestamp used as a record identifier.
pub fn millis_id(now: DateTime<Utc>) -> String {
    now.timestamp_millis().to_string()
}

/// Serde adapter for `DateTime<Utc>` fields stored as ISO 8601 text.
///
/// Use with `#[serde(with = "crate::time_utils::iso8601")]`.
pub mod iso8601 {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_utc_rfc3339(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        super::parse_utc_rfc3339(&text)
            .map_err(|e| de::Error::custom(format!("invalid timestamp {text:?}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_uses_millis_and_z_suffix() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(format_utc_rfc3339(date), "2024-01-15T10:30:00.000Z");
    }

    #[test]
    fn test_parse_accepts_offsets() {
        let parsed = parse_utc_rfc3339("2024-01-15T12:30:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_utc_rfc3339("not a date").is_err());
        assert!(parse_utc_rfc3339("").is_err());
    }

    #[test]
    fn test_offset_from_minutes() {
        assert_eq!(offset_from_minutes(420).unwrap().local_minus_utc(), 25_200);
        assert!(offset_from_minutes(24 * 60).is_none());
    }
}
