//! Delimited text exports.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use mls_model::{RawTable, RawValue};

use crate::error::{IngestError, Result};
use crate::format::{normalize_header, table_name};

/// Read a CSV export. The first non-blank record is the header.
pub fn read_csv(path: &Path) -> Result<RawTable> {
    let file = File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv_from(table_name(path), path, file)
}

/// Read CSV text from any reader, labelling the table `name`.
pub fn read_csv_from_reader<R: Read>(name: &str, reader: R) -> Result<RawTable> {
    read_csv_from(name.to_string(), Path::new(name), reader)
}

fn read_csv_from<R: Read>(name: String, path: &Path, reader: R) -> Result<RawTable> {
    let csv_error = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut table: Option<RawTable> = None;
    let mut record = StringRecord::new();
    while reader.read_record(&mut record).map_err(csv_error)? {
        if is_blank(&record) {
            continue;
        }
        match table.as_mut() {
            None => {
                let headers = record.iter().map(normalize_header).collect();
                table = Some(RawTable::new(name.clone(), headers));
            }
            Some(table) => table.push_row(record.iter().map(cell).collect()),
        }
    }

    table.ok_or_else(|| IngestError::Empty {
        path: PathBuf::from(path),
    })
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

fn cell(raw: &str) -> RawValue {
    if raw.trim().is_empty() {
        RawValue::Null
    } else {
        RawValue::text(raw)
    }
}
