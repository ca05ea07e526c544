//! ISO-8601 date handling for release timestamps

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parse an ISO-8601 date or datetime string into epoch seconds.
///
/// Accepts a full datetime with offset, a naive datetime (treated as UTC)
/// or a bare date (midnight UTC). Returns `None` for anything else.
pub fn parse_iso8601(s: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc().timestamp());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp());
    }
    None
}

/// Format epoch seconds as an ISO-8601 UTC datetime string
pub fn format_iso8601(timestamp: i64) -> Option<String> {
    match Utc.timestamp_opt(timestamp, 0) {
        chrono::LocalResult::Single(dt) => Some(dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_naive_datetime() {
        assert_eq!(parse_iso8601("2020-01-01T00:00:00"), Some(1577836800));
    }

    #[test]
    fn test_parse_bare_date() {
        assert_eq!(parse_iso8601("2020-01-01"), Some(1577836800));
    }

    #[test]
    fn test_parse_with_offset() {
        assert_eq!(parse_iso8601("2020-01-01T01:00:00+01:00"), Some(1577836800));
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_iso8601("yesterday"), None);
        assert_eq!(parse_iso8601(""), None);
    }

    #[test]
    fn test_format_round_trip() {
        let formatted = format_iso8601(1577836800).unwrap();
        assert_eq!(formatted, "2020-01-01T00:00:00Z");
        assert_eq!(parse_iso8601(&formatted), Some(1577836800));
    }
}
