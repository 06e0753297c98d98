//! Date bound normalization for range filters
//!
//! Accepts calendar dates and ISO-8601 timestamps and reduces them to the UTC
//! calendar date the index stores.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::borrow::Cow;

use crate::error::QueryError;
use crate::Result;

/// Format range bounds are sent in
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// `%#z` takes `+05`, `+0500` and `+05:00`
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
    "%Y%m%dT%H%M%S%#z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y%m%dT%H%M%S",
];

/// Parse a date or timestamp into its UTC calendar date
///
/// Timestamps carrying an offset are shifted to UTC first; timestamps without
/// one are taken as UTC. Returns `None` for anything unparseable, including
/// impossible dates such as `2017-02-30`.
pub fn parse_utc_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(date) = parse_compact_date(raw) {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc).date_naive());
    }

    let zoned = match raw.strip_suffix(['Z', 'z']) {
        Some(local) => Cow::Owned(format!("{}+00:00", local)),
        None => Cow::Borrowed(raw),
    };
    for format in OFFSET_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(&zoned, format) {
            return Some(ts.with_timezone(&Utc).date_naive());
        }
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|ts| ts.date())
        .or_else(|| parse_hour_only(raw))
}

/// `YYYY-MM-DDTHH`, which chrono will not parse without minutes
fn parse_hour_only(raw: &str) -> Option<NaiveDate> {
    let (date, hour) = raw.split_once(['T', ' '])?;
    if hour.len() != 2 || !hour.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if hour.parse::<u32>().ok()? > 23 {
        return None;
    }
    NaiveDate::parse_from_str(date, DATE_FORMAT).ok()
}

/// `YYYY`, `YYYY-MM` and `YYYYMMDD`
fn parse_compact_date(raw: &str) -> Option<NaiveDate> {
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    let ymd = |y: &str, m: &str, d: &str| {
        NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, d.parse().ok()?)
    };

    match raw.len() {
        4 if digits(raw) => ymd(raw, "1", "1"),
        7 if raw.as_bytes()[4] == b'-' && digits(&raw[..4]) && digits(&raw[5..]) => {
            ymd(&raw[..4], &raw[5..], "1")
        }
        8 if digits(raw) => ymd(&raw[..4], &raw[4..6], &raw[6..]),
        _ => None,
    }
}

/// Normalize one `<field>_<bound>` parameter into a `YYYY-MM-DD` bound
pub fn normalize_date_bound(field: &str, bound: &str, raw: &str) -> Result<String> {
    parse_utc_date(raw)
        .map(|date| date.format(DATE_FORMAT).to_string())
        .ok_or_else(|| QueryError::InvalidDate {
            field: field.to_string(),
            bound: bound.to_string(),
            value: raw.to_string(),
        })
}
