//! String and numeric coercion.

use mls_model::RawValue;

/// Spellings vendors use for "no value", compared after trimming and
/// case-folding.
pub const NULL_TOKENS: &[&str] = &["", "nan", "none", "null"];

/// Returns true when `value` is a vendor null spelling.
///
/// # Examples
///
/// ```
/// use mls_normalization::is_null_like;
///
/// assert!(is_null_like("  "));
/// assert!(is_null_like("NaN"));
/// assert!(is_null_like("Null"));
/// assert!(!is_null_like("0"));
/// ```
pub fn is_null_like(value: &str) -> bool {
    let folded = value.trim().to_lowercase();
    NULL_TOKENS.contains(&folded.as_str())
}

/// Trim a string, returning `None` for null spellings.
pub fn clean_str(value: &str) -> Option<String> {
    if is_null_like(value) {
        None
    } else {
        Some(value.trim().to_string())
    }
}

/// Clean any raw cell into an optional trimmed string.
///
/// Numbers render without trailing zeros, dates as ISO 8601.
///
/// # Examples
///
/// ```
/// use mls_model::RawValue;
/// use mls_normalization::clean_string;
///
/// assert_eq!(clean_string(None), None);
/// assert_eq!(clean_string(Some(&RawValue::text("  "))), None);
/// assert_eq!(clean_string(Some(&RawValue::text("NaN"))), None);
/// assert_eq!(
///     clean_string(Some(&RawValue::text(" 123 Main St "))),
///     Some("123 Main St".to_string())
/// );
/// assert_eq!(clean_string(Some(&RawValue::Number(12.0))), Some("12".to_string()));
/// ```
pub fn clean_string(value: Option<&RawValue>) -> Option<String> {
    match value? {
        RawValue::Null => None,
        RawValue::Text(text) => clean_str(text),
        RawValue::Number(number) if number.is_finite() => Some(format_numeric(*number)),
        RawValue::Number(_) => None,
        RawValue::Date(date) => Some(date.format("%Y-%m-%d").to_string()),
        RawValue::Timestamp(ts) => Some(ts.format("%Y-%m-%dT%H:%M:%S").to_string()),
    }
}

/// Coerce a raw cell to a float.
///
/// Numeric cells pass through; text has `$` and `,` stripped before parsing.
/// Anything that does not parse to a finite number yields `None`.
///
/// # Examples
///
/// ```
/// use mls_model::RawValue;
/// use mls_normalization::to_numeric;
///
/// assert_eq!(to_numeric(Some(&RawValue::text("$1,234.50"))), Some(1234.5));
/// assert_eq!(to_numeric(Some(&RawValue::text("n/a"))), None);
/// assert_eq!(to_numeric(Some(&RawValue::Number(3.0))), Some(3.0));
/// ```
pub fn to_numeric(value: Option<&RawValue>) -> Option<f64> {
    match value? {
        RawValue::Number(number) => number.is_finite().then_some(*number),
        RawValue::Text(text) => parse_numeric(text),
        RawValue::Null | RawValue::Date(_) | RawValue::Timestamp(_) => None,
    }
}

/// Parse a currency-formatted string.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    if is_null_like(raw) {
        return None;
    }
    let stripped: String = raw
        .trim()
        .chars()
        .filter(|ch| *ch != '$' && *ch != ',')
        .collect();
    stripped
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

/// Coerce a raw cell to an integer by truncating [`to_numeric`].
///
/// # Examples
///
/// ```
/// use mls_model::RawValue;
/// use mls_normalization::to_integer;
///
/// assert_eq!(to_integer(Some(&RawValue::text("3.7"))), Some(3));
/// assert_eq!(to_integer(Some(&RawValue::text("-2.5"))), Some(-2));
/// assert_eq!(to_integer(Some(&RawValue::Null)), None);
/// ```
pub fn to_integer(value: Option<&RawValue>) -> Option<i64> {
    to_numeric(value).map(|number| number.trunc() as i64)
}

/// Formats a floating-point number as a string without trailing zeros.
///
/// # Examples
///
/// ```
/// use mls_normalization::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.50), "1.5");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
