use chrono::NaiveDate;
use mls_model::RawValue;
use mls_normalization::{clean_string, format_numeric, to_date, to_integer, to_numeric};
use proptest::prelude::*;

fn text(value: &str) -> RawValue {
    RawValue::text(value)
}

#[test]
fn vendor_nulls_become_absent() {
    for raw in ["  ", "NaN", "none", "NULL", ""] {
        assert_eq!(clean_string(Some(&text(raw))), None, "{raw:?}");
        assert_eq!(to_numeric(Some(&text(raw))), None, "{raw:?}");
        assert_eq!(to_date(Some(&text(raw))), None, "{raw:?}");
    }
    assert_eq!(clean_string(None), None);
    assert_eq!(clean_string(Some(&RawValue::Null)), None);
}

#[test]
fn addresses_are_kept_verbatim() {
    assert_eq!(
        clean_string(Some(&text("123 Main St"))),
        Some("123 Main St".to_string())
    );
}

#[test]
fn currency_strings_parse() {
    assert_eq!(to_numeric(Some(&text("$1,234.50"))), Some(1234.5));
    assert_eq!(to_numeric(Some(&text("n/a"))), None);
    assert_eq!(to_integer(Some(&text("$2,000"))), Some(2000));
    assert_eq!(to_integer(Some(&text("n/a"))), None);
}

#[test]
fn dates_pass_through() {
    let date = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
    assert_eq!(to_date(Some(&RawValue::Date(date))), Some(date));
    assert_eq!(to_date(Some(&text("2/28/2025"))), Some(date));
}

proptest! {
    #![proptest_config(ProptestConfig {
        failure_persistence: None,
        ..ProptestConfig::default()
    })]

    #[test]
    fn coercion_is_total(raw in ".{0,40}") {
        let value = text(&raw);
        let _ = clean_string(Some(&value));
        let _ = to_numeric(Some(&value));
        let _ = to_integer(Some(&value));
        let _ = to_date(Some(&value));
    }

    #[test]
    fn cleaned_strings_are_trimmed_and_non_empty(raw in ".{0,40}") {
        if let Some(cleaned) = clean_string(Some(&text(&raw))) {
            prop_assert_eq!(cleaned.trim(), cleaned.as_str());
            prop_assert!(!cleaned.is_empty());
        }
    }

    #[test]
    fn formatted_currency_round_trips(cents in 0u64..1_000_000_000) {
        let amount = cents as f64 / 100.0;
        let whole = cents / 100;
        let grouped = group_thousands(whole);
        let raw = format!("${grouped}.{:02}", cents % 100);
        let parsed = to_numeric(Some(&text(&raw)));
        prop_assert!(parsed.is_some_and(|value| (value - amount).abs() < 1e-6), "{raw} -> {parsed:?}");
    }

    #[test]
    fn numbers_render_without_trailing_zeros(whole in -1_000_000i64..1_000_000) {
        prop_assert_eq!(format_numeric(whole as f64), whole.to_string());
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::new();
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
