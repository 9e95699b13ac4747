//! In-memory Polars frames.

use chrono::{DateTime, NaiveDateTime};
use mls_model::{RawTable, RawValue};
use polars::prelude::{AnyValue, DataFrame, TimeUnit};

const SECONDS_PER_DAY: i64 = 86_400;

/// Convert a Polars frame into a raw table. Numeric cells stay numbers, string
/// cells become text, temporal cells keep their type and everything else uses
/// its display form.
pub fn frame_to_table(name: &str, df: &DataFrame) -> RawTable {
    let columns: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    let mut table = RawTable::new(name, columns);
    let source = df.get_columns();
    for idx in 0..df.height() {
        let values = source
            .iter()
            .map(|column| any_to_raw(column.get(idx).unwrap_or(AnyValue::Null)))
            .collect();
        table.push_row(values);
    }
    table
}

pub fn any_to_raw(value: AnyValue<'_>) -> RawValue {
    match value {
        AnyValue::Null => RawValue::Null,
        AnyValue::Int8(v) => RawValue::Number(f64::from(v)),
        AnyValue::Int16(v) => RawValue::Number(f64::from(v)),
        AnyValue::Int32(v) => RawValue::Number(f64::from(v)),
        AnyValue::Int64(v) => RawValue::Number(v as f64),
        AnyValue::UInt8(v) => RawValue::Number(f64::from(v)),
        AnyValue::UInt16(v) => RawValue::Number(f64::from(v)),
        AnyValue::UInt32(v) => RawValue::Number(f64::from(v)),
        AnyValue::UInt64(v) => RawValue::Number(v as f64),
        AnyValue::Float32(v) => RawValue::Number(f64::from(v)),
        AnyValue::Float64(v) => RawValue::Number(v),
        AnyValue::String(s) => text(s),
        AnyValue::StringOwned(s) => text(s.as_str()),
        AnyValue::Boolean(b) => RawValue::text(if b { "TRUE" } else { "FALSE" }),
        AnyValue::Date(days) => DateTime::from_timestamp(i64::from(days) * SECONDS_PER_DAY, 0)
            .map_or(RawValue::Null, |ts| RawValue::Date(ts.date_naive())),
        AnyValue::Datetime(value, unit, _) | AnyValue::DatetimeOwned(value, unit, _) => {
            epoch_to_timestamp(value, unit).map_or(RawValue::Null, RawValue::Timestamp)
        }
        other => text(&other.to_string()),
    }
}

/// Timezone-aware values are taken as their UTC wall time.
fn epoch_to_timestamp(value: i64, unit: TimeUnit) -> Option<NaiveDateTime> {
    let ts = match unit {
        TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(value)),
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(value),
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(value),
    };
    ts.map(|ts| ts.naive_utc())
}

fn text(value: &str) -> RawValue {
    if value.trim().is_empty() {
        RawValue::Null
    } else {
        RawValue::text(value)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use polars::prelude::{Column, DataFrame};

    use super::*;

    #[test]
    fn temporal_cells_keep_their_type() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(any_to_raw(AnyValue::Date(19_791)), RawValue::Date(date));

        let expected = RawValue::Timestamp(date.and_hms_opt(14, 30, 0).unwrap());
        let millis = 1_709_994_600_000i64;
        assert_eq!(
            any_to_raw(AnyValue::Datetime(millis, TimeUnit::Milliseconds, None)),
            expected
        );
        assert_eq!(
            any_to_raw(AnyValue::Datetime(millis * 1_000, TimeUnit::Microseconds, None)),
            expected
        );
        assert_eq!(
            any_to_raw(AnyValue::Datetime(millis * 1_000_000, TimeUnit::Nanoseconds, None)),
            expected
        );
    }

    #[test]
    fn frame_cells_keep_their_kind() {
        let df = DataFrame::new(vec![
            Column::new("MLS #".into(), ["A1", ""]),
            Column::new("Price".into(), [Some(250_000i64), None]),
            Column::new("Beds".into(), [3.0f64, 2.5]),
        ])
        .unwrap();
        let table = frame_to_table("frame", &df);

        assert_eq!(table.columns(), ["MLS #", "Price", "Beds"]);
        let first = table.row(0).unwrap();
        assert_eq!(first.get("MLS #"), Some(&RawValue::text("A1")));
        assert_eq!(first.get("Price"), Some(&RawValue::Number(250_000.0)));
        let second = table.row(1).unwrap();
        assert_eq!(second.get("MLS #"), Some(&RawValue::Null));
        assert_eq!(second.get("Price"), Some(&RawValue::Null));
        assert_eq!(second.get("Beds"), Some(&RawValue::Number(2.5)));
    }
}
