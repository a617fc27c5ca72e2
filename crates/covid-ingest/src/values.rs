//! Cell value parsing for source tables.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Parse a source date cell into a calendar date.
///
/// Accepts plain dates as well as the timestamp forms the open data portal
/// exports (`2020-03-10T00:00:00Z`). Returns `None` for empty or
/// unparseable values; such rows are dropped by the builders.
pub fn parse_source_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    let naive = trimmed.trim_end_matches('Z');
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(dt.date());
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

/// Parse a non-empty count cell.
///
/// Accepts non-negative integers and integral floats (`12.0`). Returns
/// `None` for anything else.
pub fn parse_count(value: &str) -> Option<u64> {
    let trimmed = value.trim();
    if let Ok(count) = trimmed.parse::<u64>() {
        return Some(count);
    }
    let float = trimmed.parse::<f64>().ok()?;
    if float.is_finite() && float >= 0.0 && float.fract() == 0.0 && float <= u64::MAX as f64 {
        Some(float as u64)
    } else {
        None
    }
}
