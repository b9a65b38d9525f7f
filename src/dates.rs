//! Order date parsing.
//!
//! Dates must match the configured pattern over the whole value; a value
//! that merely contains a date somewhere is not a date. The same pattern
//! followed by a time of day is accepted, as are RFC 3339 timestamps.

use crate::models::MonthPeriod;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Time-of-day suffixes tried after the configured date pattern
const TIME_SUFFIXES: &[&str] = &[" %H:%M:%S", "T%H:%M:%S", " %H:%M", "T%H:%M"];

/// Calendar date of `raw`, or `None` when it does not parse
///
/// chrono accepts one or two digits for `%m` and `%d`, so `2024-1-5`
/// parses with the default `%Y-%m-%d` pattern.
pub fn parse_order_date(raw: &str, date_format: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, date_format) {
        return Some(date);
    }

    for suffix in TIME_SUFFIXES {
        let pattern = format!("{}{}", date_format, suffix);
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, &pattern) {
            return Some(timestamp.date());
        }
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|timestamp| timestamp.date_naive())
}

/// Month an order falls in, or `None` for an unparseable date
pub fn order_month(raw: &str, date_format: &str) -> Option<MonthPeriod> {
    parse_order_date(raw, date_format).map(|date| MonthPeriod::new(date.year(), date.month()))
}
