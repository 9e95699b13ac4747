//! Best-effort date coercion.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use mls_model::RawValue;

use crate::coerce::clean_str;

/// Calendar formats tried in order. Two-digit year layouts precede their
/// four-digit twins. Month-first layouts win over day-first ones.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%m-%d-%y",
    "%m-%d-%Y",
    "%d-%b-%y",
    "%d-%b-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%Y%m%d",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

/// Earliest year a parsed date may carry. `%Y` also accepts one or two
/// digits, so "24-01-05" would otherwise parse as the year 24.
const MIN_YEAR: i32 = 1000;

/// Parse a date from free text.
///
/// Accepts ISO dates, common US layouts, datetimes (the time part is
/// dropped) and RFC 3339 timestamps. Returns `None` for anything else,
/// including layouts whose year is ambiguous such as "24-01-05".
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let text = clean_str(raw)?;
    let plausible = |date: &NaiveDate| date.year() >= MIN_YEAR;
    let date = DATE_FORMATS
        .iter()
        .filter_map(|format| NaiveDate::parse_from_str(&text, format).ok())
        .find(plausible);
    if date.is_some() {
        return date;
    }
    let date = DATETIME_FORMATS
        .iter()
        .filter_map(|format| NaiveDateTime::parse_from_str(&text, format).ok())
        .map(|ts| ts.date())
        .find(plausible);
    if date.is_some() {
        return date;
    }
    DateTime::parse_from_rfc3339(&text)
        .ok()
        .map(|ts| ts.date_naive())
        .filter(plausible)
}

/// Coerce a raw cell to a date.
///
/// Dates pass through unchanged, timestamps are truncated to their date and
/// text is parsed with [`parse_date`]. Numbers are not interpreted.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use mls_model::RawValue;
/// use mls_normalization::to_date;
///
/// let expected = NaiveDate::from_ymd_opt(2024, 3, 9);
/// assert_eq!(to_date(Some(&RawValue::text("03/09/2024"))), expected);
/// assert_eq!(to_date(Some(&RawValue::text("2024-03-09 14:30:00"))), expected);
/// assert_eq!(to_date(Some(&RawValue::text("soon"))), None);
/// ```
pub fn to_date(value: Option<&RawValue>) -> Option<NaiveDate> {
    match value? {
        RawValue::Date(date) => Some(*date),
        RawValue::Timestamp(ts) => Some(ts.date()),
        RawValue::Text(text) => parse_date(text),
        RawValue::Null | RawValue::Number(_) => None,
    }
}
