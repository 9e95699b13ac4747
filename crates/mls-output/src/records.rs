use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

use csv::Writer;
use mls_model::{CanonicalField, CanonicalRecord, CanonicalValue};
use tracing::info;

use crate::error::{OutputError, Result};

/// Prefix for pass-through columns, keeping them apart from canonical names.
pub const EXTRA_COLUMN_PREFIX: &str = "extra.";

/// Write records as CSV: canonical output columns first, then the union of
/// pass-through columns in name order. Absent values are empty cells.
pub fn write_records<W: Write>(writer: W, records: &[CanonicalRecord]) -> csv::Result<()> {
    let fields: Vec<CanonicalField> = CanonicalField::output_fields().collect();
    let extras: BTreeSet<&str> = records
        .iter()
        .flat_map(|record| record.extra.keys().map(String::as_str))
        .collect();

    let mut csv = Writer::from_writer(writer);
    let header = fields
        .iter()
        .map(|field| field.name().to_string())
        .chain(extras.iter().map(|name| format!("{EXTRA_COLUMN_PREFIX}{name}")));
    csv.write_record(header)?;

    for record in records {
        let canonical = fields.iter().map(|field| {
            record
                .value(*field)
                .as_ref()
                .map(CanonicalValue::render)
                .unwrap_or_default()
        });
        let extra = extras
            .iter()
            .map(|name| record.extra.get(*name).cloned().unwrap_or_default());
        csv.write_record(canonical.chain(extra))?;
    }
    csv.flush()?;
    Ok(())
}

/// Write records to `path`, creating or truncating the file.
pub fn write_records_csv(path: &Path, records: &[CanonicalRecord]) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    write_records(file, records).map_err(|source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), records = records.len(), "records written");
    Ok(())
}
