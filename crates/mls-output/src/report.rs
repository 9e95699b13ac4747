use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use mls_contract::{Contract, ReconciliationMode};
use mls_model::{AssetClass, BatchSummary, ClassificationOutcome, RowError};
use serde::Serialize;

use crate::error::{OutputError, Result};
use crate::{REPORT_FILE, ensure_output_dir};

pub const REPORT_SCHEMA: &str = "mls.batch-report";
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// Identity of the contract a batch was classified against.
#[derive(Debug, Clone, Serialize)]
pub struct ContractInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub fingerprint: String,
    pub reconciliation: ReconciliationMode,
    pub origin: String,
}

impl From<&Contract> for ContractInfo {
    fn from(contract: &Contract) -> Self {
        Self {
            name: contract.name().to_string(),
            version: contract.version().map(str::to_string),
            fingerprint: contract.fingerprint().to_string(),
            reconciliation: contract.reconciliation(),
            origin: contract.origin().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub dataset: String,
    pub asset_class: AssetClass,
    pub input_rows: usize,
    pub records: usize,
    pub row_errors: Vec<RowError>,
}

impl From<&ClassificationOutcome> for FileReport {
    fn from(outcome: &ClassificationOutcome) -> Self {
        Self {
            dataset: outcome.dataset.clone(),
            asset_class: outcome.asset_class.clone(),
            input_rows: outcome.input_rows,
            records: outcome.records.len(),
            row_errors: outcome.row_errors.clone(),
        }
    }
}

/// Auditable record of one batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub schema: &'static str,
    pub schema_version: u32,
    pub generated_at: String,
    pub contract: ContractInfo,
    pub snapshot_date: NaiveDate,
    pub files: Vec<FileReport>,
    pub summary: BatchSummary,
}

impl BatchReport {
    pub fn new(
        contract: &Contract,
        snapshot_date: NaiveDate,
        outcomes: &[ClassificationOutcome],
    ) -> Self {
        Self {
            schema: REPORT_SCHEMA,
            schema_version: REPORT_SCHEMA_VERSION,
            generated_at: Utc::now().to_rfc3339(),
            contract: ContractInfo::from(contract),
            snapshot_date,
            files: outcomes.iter().map(FileReport::from).collect(),
            summary: BatchSummary::from_outcomes(outcomes),
        }
    }

    pub fn has_row_errors(&self) -> bool {
        self.summary.row_errors > 0
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Write `report` as `batch_report.json` inside `output_dir`.
pub fn write_batch_report_json(output_dir: &Path, report: &BatchReport) -> Result<PathBuf> {
    let output_path = ensure_output_dir(output_dir)?.join(REPORT_FILE);
    let json = report.to_json()?;
    std::fs::write(&output_path, format!("{json}\n")).map_err(|source| OutputError::Write {
        path: output_path.clone(),
        source,
    })?;
    Ok(output_path)
}
