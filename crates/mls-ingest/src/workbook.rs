//! Spreadsheet exports (xlsx, xlsm, xlsb, xls, ods).

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use mls_model::{RawTable, RawValue};
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::format::{normalize_header, table_name};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Read the first worksheet of a workbook. The first non-blank row is the
/// header; fully blank rows are skipped.
pub fn read_workbook(path: &Path) -> Result<RawTable> {
    let workbook_error = |source| IngestError::Workbook {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
    let sheet_names = workbook.sheet_names().to_vec();
    let Some(sheet) = sheet_names.first() else {
        return Err(IngestError::NoWorksheets {
            path: path.to_path_buf(),
        });
    };
    if sheet_names.len() > 1 {
        debug!(
            path = %path.display(),
            sheet = %sheet,
            ignored = sheet_names.len() - 1,
            "Reading first worksheet only"
        );
    }
    let range = workbook.worksheet_range(sheet).map_err(workbook_error)?;

    let mut table: Option<RawTable> = None;
    for row in range.rows() {
        let values: Vec<RawValue> = row.iter().map(cell_value).collect();
        if values.iter().all(RawValue::is_null) {
            continue;
        }
        match table.as_mut() {
            None => {
                let headers = row.iter().map(|cell| normalize_header(&cell.to_string())).collect();
                table = Some(RawTable::new(table_name(path), headers));
            }
            Some(table) => table.push_row(values),
        }
    }

    table.ok_or_else(|| IngestError::Empty {
        path: path.to_path_buf(),
    })
}

fn cell_value(cell: &Data) -> RawValue {
    match cell {
        Data::Empty | Data::Error(_) => RawValue::Null,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            if s.trim().is_empty() {
                RawValue::Null
            } else {
                RawValue::text(s.as_str())
            }
        }
        Data::Float(n) => RawValue::Number(*n),
        Data::Int(n) => RawValue::Number(*n as f64),
        Data::Bool(b) => RawValue::text(if *b { "TRUE" } else { "FALSE" }),
        Data::DateTime(dt) => serial_to_value(dt.as_f64()),
    }
}

/// Convert an Excel serial date (1900 system) to a date, or to a timestamp
/// when it carries a time of day.
pub(crate) fn serial_to_value(serial: f64) -> RawValue {
    let Some(timestamp) = serial_to_datetime(serial) else {
        return RawValue::Number(serial);
    };
    if serial.fract() == 0.0 {
        RawValue::Date(timestamp.date())
    } else {
        RawValue::Timestamp(timestamp)
    }
}

fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * MILLIS_PER_DAY).round();
    if millis.abs() > i64::MAX as f64 {
        return None;
    }
    epoch.checked_add_signed(TimeDelta::try_milliseconds(millis as i64)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_serials_are_dates() {
        assert_eq!(
            serial_to_value(45_702.0),
            RawValue::Date(NaiveDate::from_ymd_opt(2025, 2, 14).unwrap())
        );
    }

    #[test]
    fn fractional_serials_are_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2025, 2, 14)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(serial_to_value(45_702.5), RawValue::Timestamp(expected));
    }

    #[test]
    fn non_finite_serials_stay_numbers() {
        assert!(matches!(serial_to_value(f64::INFINITY), RawValue::Number(_)));
    }

    #[test]
    fn cells_map_to_raw_values() {
        assert_eq!(cell_value(&Data::Empty), RawValue::Null);
        assert_eq!(cell_value(&Data::String("  ".into())), RawValue::Null);
        assert_eq!(cell_value(&Data::Int(3)), RawValue::Number(3.0));
        assert_eq!(cell_value(&Data::Bool(true)), RawValue::text("TRUE"));
    }
}
