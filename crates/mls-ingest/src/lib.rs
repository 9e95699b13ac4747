//! Listing export ingestion.
//!
//! Turns vendor exports into [`RawTable`]s for the classifier: CSV via the
//! `csv` crate, spreadsheets via `calamine`, and in-memory Polars frames.

mod csv_reader;
mod discovery;
mod error;
mod format;
mod frame;
mod workbook;

use std::path::Path;
use std::time::Instant;

use mls_model::RawTable;
use tracing::info;

pub use csv_reader::{read_csv, read_csv_from_reader};
pub use discovery::{collect_inputs, discover_listing_files};
pub use error::{IngestError, Result};
pub use format::SourceFormat;
pub use frame::{any_to_raw, frame_to_table};
pub use workbook::read_workbook;

/// Read one listing file, choosing the reader by extension.
pub fn read_listing_file(path: &Path) -> Result<RawTable> {
    let start = Instant::now();
    let table = match SourceFormat::from_path(path) {
        Some(SourceFormat::Csv) => read_csv(path)?,
        Some(SourceFormat::Workbook) => read_workbook(path)?,
        None => {
            return Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
    };
    info!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.columns().len(),
        duration_ms = start.elapsed().as_millis(),
        "listing file loaded"
    );
    Ok(table)
}
