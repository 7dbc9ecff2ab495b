// logslice - core/timestamp.rs
//
// Fixed-pattern timestamp location and parsing.
//
// The extractor recognises exactly one embedded timestamp shape:
// `YYYY-MM-DDTHH:MM:SS` (e.g. `2024-01-15T13:45:02`), timezone-naive
// and interpreted as UTC. Any log format embedding this shape is
// compatible; anything else is simply unmatched, never an error.

use crate::util::constants;
use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// Compiled timestamp-shape regex, built once per process.
fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // The pattern is a constant verified by the unit tests below, so a
    // mistake shows up as a failing test rather than a runtime panic.
    PATTERN.get_or_init(|| {
        Regex::new(constants::TIMESTAMP_PATTERN).expect("timestamp: invalid pattern constant")
    })
}

/// Locate and parse the first embedded timestamp in `line`.
///
/// Returns `None` when no substring matches the fixed shape, or when a
/// matching substring is nonetheless not a valid calendar instant
/// (e.g. `2024-13-40T25:61:61` matches the digit shape but is not a
/// date). Both cases are skip decisions for the caller, by policy.
pub fn find_timestamp(line: &str) -> Option<DateTime<Utc>> {
    let m = pattern().find(line)?;
    NaiveDateTime::parse_from_str(m.as_str(), constants::TIMESTAMP_FORMAT)
        .ok()
        .map(|ndt| ndt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> String {
        find_timestamp(s)
            .expect(&format!("should find a timestamp in: {s:?}"))
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }

    #[test]
    fn test_finds_embedded_timestamp() {
        assert_eq!(
            ts("[2024-01-15T13:45:02] INFO user 123 connected"),
            "2024-01-15 13:45:02"
        );
    }

    #[test]
    fn test_finds_timestamp_mid_line() {
        assert_eq!(
            ts("worker=3 ts=2024-01-15T13:45:02 event=send"),
            "2024-01-15 13:45:02"
        );
    }

    /// Only the first match on a line is used.
    #[test]
    fn test_first_match_wins() {
        assert_eq!(
            ts("2023-06-01T00:00:00 retry of 2024-01-15T13:45:02"),
            "2023-06-01 00:00:00"
        );
    }

    #[test]
    fn test_no_timestamp_returns_none() {
        assert!(find_timestamp("plain line without any date").is_none());
        assert!(find_timestamp("").is_none());
    }

    /// Space-separated timestamps do not match the fixed shape; the literal
    /// 'T' separator is required.
    #[test]
    fn test_space_separator_is_not_matched() {
        assert!(find_timestamp("2024-01-15 13:45:02 INFO started").is_none());
    }

    /// A substring that matches the digit shape but is not a real calendar
    /// instant parses to None rather than panicking or erroring.
    #[test]
    fn test_shape_match_with_invalid_date_returns_none() {
        assert!(find_timestamp("bad 2024-13-40T25:61:61 record").is_none());
    }

    /// Fractional seconds after the matched shape are ignored; the parse
    /// consumes exactly the matched substring.
    #[test]
    fn test_fractional_seconds_suffix_ignored() {
        assert_eq!(
            ts("[2024-01-15T13:45:02.123456] DEBUG tick"),
            "2024-01-15 13:45:02"
        );
    }
}
