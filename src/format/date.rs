//! Lenient calendar date parsing
//!
//! Backends hand dates over in whatever shape their JSON encoder produces:
//! ISO strings, RFC 2822 strings (`Sat, 01 Jan 2000 00:00:00 GMT`), plain
//! `YYYY-MM-DD`, `June 5, 2024`, a bare year, or epoch milliseconds. Anything
//! without a zone is read as UTC.

use crate::types::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

// Zone offsets without a colon (`+0000`), which RFC 3339 rejects
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%B %d, %Y %H:%M:%S",
];

// %B also accepts the three-letter month abbreviation
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%B %d, %Y", "%B %d %Y", "%d %B %Y"];

/// Parse a field value as an instant
pub fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(ms) if ms.is_finite() => Utc.timestamp_millis_opt(ms.trunc() as i64).single(),
        Value::Text(s) => parse_date_str(s),
        _ => None,
    }
}

/// Parse a date string in any of the accepted layouts
pub fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(naive.and_utc());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    parse_partial_date(trimmed)
}

/// `YYYY` or `YYYY-MM`, read as the first day of that year or month
fn parse_partial_date(s: &str) -> Option<DateTime<Utc>> {
    let (year, month) = match s.split_once('-') {
        Some((year, month)) if month.len() == 2 => (year, month),
        Some(_) => return None,
        None => (s, "1"),
    };
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) || !month.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let date = NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)?;
    date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc())
}

/// `en-US` short date of the UTC calendar day: `1/31/2024`
pub fn format_short_date(date: &DateTime<Utc>) -> String {
    date.format("%-m/%-d/%Y").to_string()
}
