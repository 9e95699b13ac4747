//! Downstream outputs for classified listing batches.
//!
//! - **Records CSV**: every accepted record in canonical column order
//! - **Batch report**: JSON with contract identity, per-file outcomes, row
//!   errors and summary counts

mod error;
mod records;
mod report;

use std::fs;
use std::path::{Path, PathBuf};

pub use error::{OutputError, Result};
pub use records::{EXTRA_COLUMN_PREFIX, write_records, write_records_csv};
pub use report::{
    BatchReport, ContractInfo, FileReport, REPORT_SCHEMA, REPORT_SCHEMA_VERSION,
    write_batch_report_json,
};

/// File name of the aggregated records CSV.
pub const RECORDS_FILE: &str = "listings.csv";
/// File name of the JSON batch report.
pub const REPORT_FILE: &str = "batch_report.json";

pub(crate) fn ensure_output_dir(dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    Ok(dir.to_path_buf())
}
