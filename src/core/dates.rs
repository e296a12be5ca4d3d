//! Canonical `YYYY-MM-DD` date text.
//!
//! Every page that accepts a date funnels it through [`normalize_date`]
//! before it reaches a URL or a request. Failure is an empty string, never
//! an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

fn iso_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid iso date pattern"))
}

fn dmy_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9]{1,2})[/-]([0-9]{1,2})[/-]([0-9]{4})$").expect("valid d/m/y date pattern")
    })
}

const DATE_FORMATS: &[&str] = &[
    "%Y/%m/%d",
    "%Y-%m-%d",
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%a %b %d %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Normalize heterogeneous date text to `YYYY-MM-DD`, or `""` if unparseable.
///
/// Text already shaped like `YYYY-MM-DD` is returned untouched, so the
/// function is idempotent. `D/M/YYYY` and `D-M-YYYY` are read day first.
pub fn normalize_date(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }

    if iso_pattern().is_match(value) {
        return value.to_string();
    }

    if let Some(caps) = dmy_pattern().captures(value) {
        return format!("{}-{:0>2}-{:0>2}", &caps[3], &caps[2], &caps[1]);
    }

    parse_loose(value)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn parse_loose(value: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.date_naive());
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    {
        return Some(dt.date());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Parse already-normalized text into a calendar date.
pub(crate) fn parse_canonical(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_passthrough() {
        assert_eq!(normalize_date("2025-10-15"), "2025-10-15");
        // shape is enough, no calendar check
        assert_eq!(normalize_date("2025-13-40"), "2025-13-40");
    }

    #[test]
    fn test_non_ascii_digits_rejected() {
        assert_eq!(normalize_date("٢٠٢٥-١٠-٠١"), "");
        assert_eq!(normalize_date("١/١٠/٢٠٢٥"), "");
    }

    #[test]
    fn test_day_month_year() {
        assert_eq!(normalize_date("1/10/2025"), "2025-10-01");
        assert_eq!(normalize_date("15-8-2025"), "2025-08-15");
        assert_eq!(normalize_date("05/11/2025"), "2025-11-05");
    }

    #[test]
    fn test_two_digit_year_not_special_cased() {
        assert_eq!(normalize_date("1/10/25"), "");
    }

    #[test]
    fn test_loose_forms() {
        assert_eq!(normalize_date("2025-10-01T18:30:00Z"), "2025-10-01");
        assert_eq!(normalize_date("2025/10/01"), "2025-10-01");
        assert_eq!(normalize_date("October 1, 2025"), "2025-10-01");
        assert_eq!(normalize_date("1 Oct 2025"), "2025-10-01");
        assert_eq!(normalize_date("Tue, 1 Jul 2025 10:52:37 +0200"), "2025-07-01");
    }

    #[test]
    fn test_empty_and_garbage() {
        assert_eq!(normalize_date(""), "");
        assert_eq!(normalize_date("   "), "");
        assert_eq!(normalize_date("next tuesday"), "");
    }

    #[test]
    fn test_idempotent() {
        for input in ["3/4/2026", "March 4, 2026", "2026-04-03", "nope"] {
            let once = normalize_date(input);
            assert_eq!(normalize_date(&once), once);
        }
    }
}
