use mls_model::{CanonicalField, CanonicalRecord, CanonicalValue, FieldKind};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};

/// Lay records out as a frame with one column per output field, in canonical
/// order. Dates are rendered as ISO 8601 strings. `extra` is not part of the
/// frame.
pub fn records_to_frame(records: &[CanonicalRecord]) -> PolarsResult<DataFrame> {
    let columns: Vec<Column> = CanonicalField::output_fields()
        .map(|field| field_column(field, records))
        .collect();
    DataFrame::new(columns)
}

fn field_column(field: CanonicalField, records: &[CanonicalRecord]) -> Column {
    let name = field.name();
    let values = records.iter().map(|record| record.value(field));
    let series = match field.kind() {
        FieldKind::Text | FieldKind::Date => {
            let values: Vec<Option<String>> = values
                .map(|v| v.as_ref().map(CanonicalValue::render))
                .collect();
            Series::new(name.into(), values)
        }
        FieldKind::Number => {
            let values: Vec<Option<f64>> = values
                .map(|v| match v {
                    Some(CanonicalValue::Number(n)) => Some(n),
                    Some(CanonicalValue::Integer(n)) => Some(n as f64),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values)
        }
        FieldKind::Integer => {
            let values: Vec<Option<i64>> = values
                .map(|v| match v {
                    Some(CanonicalValue::Integer(n)) => Some(n),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values)
        }
    };
    series.into_column()
}
