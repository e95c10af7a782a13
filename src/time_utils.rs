// SPDX-License-Identifier: MIT

//! Shared helpers for date/time parsing and formatting.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Current UTC date as a lexically sortable `YYYY-MM-DD` string.
pub fn today_utc() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Parse a stored timestamp, treating naive values as UTC.
///
/// Session expiry timestamps come back from the store as strings; records
/// written by older clients may lack an offset.
pub fn parse_stored_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let parsed = parse_stored_timestamp("2024-06-01T10:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_treated_as_utc() {
        let parsed = parse_stored_timestamp("2024-06-01T10:00:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap());

        let with_frac = parse_stored_timestamp("2024-06-01T10:00:00.123456").unwrap();
        assert_eq!(
            with_frac.timestamp(),
            Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap().timestamp()
        );
    }

    #[test]
    fn test_parse_garbage_is_none() {
        assert!(parse_stored_timestamp("not a timestamp").is_none());
        assert!(parse_stored_timestamp("").is_none());
    }

    #[test]
    fn test_format_round_trips() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap();
        let formatted = format_utc_rfc3339(now);
        assert_eq!(formatted, "2024-06-01T08:30:00Z");
        assert_eq!(parse_stored_timestamp(&formatted), Some(now));
    }
}
