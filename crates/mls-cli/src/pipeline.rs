//! Batch pipeline: ingest, classify, validate, write.
//!
//! Dataset-level failures (unreadable file, unknown forced class, schema
//! errors) abort the batch before anything is written. Row-level errors are
//! carried in the result and the batch report.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use tracing::{debug, info, info_span, warn};

use mls_contract::Contract;
use mls_core::{ClassifyOptions, RecordClassifier};
use mls_ingest::{collect_inputs, read_listing_file};
use mls_model::{AssetClass, CanonicalRecord, ClassificationOutcome};
use mls_output::{BatchReport, RECORDS_FILE, write_batch_report_json, write_records_csv};
use mls_validate::DatasetValidator;

use crate::logging::redact_value;

/// Exit code for a batch that completed but rejected rows.
pub const EXIT_ROW_ERRORS: i32 = 2;

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub snapshot_date: NaiveDate,
    /// Bind every file to this class instead of inferring it.
    pub asset_class: Option<AssetClass>,
    /// Worker threads per file.
    pub jobs: usize,
    pub output_dir: PathBuf,
    /// Classify and validate without writing outputs.
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct BatchResult {
    pub files: Vec<PathBuf>,
    pub outcomes: Vec<ClassificationOutcome>,
    pub report: BatchReport,
    pub output_dir: PathBuf,
    pub records_csv: Option<PathBuf>,
    pub report_json: Option<PathBuf>,
}

impl BatchResult {
    pub fn has_row_errors(&self) -> bool {
        self.report.has_row_errors()
    }

    pub fn exit_code(&self) -> i32 {
        if self.has_row_errors() { EXIT_ROW_ERRORS } else { 0 }
    }
}

/// Run one batch of listing files against `contract`.
pub fn run_batch(
    contract: &Contract,
    inputs: &[PathBuf],
    options: &BatchOptions,
) -> Result<BatchResult> {
    let batch_span = info_span!(
        "batch",
        contract = %contract.name(),
        fingerprint = %contract.short_fingerprint(),
        snapshot_date = %options.snapshot_date
    );
    let _batch_guard = batch_span.enter();
    let start = Instant::now();

    let files = collect_inputs(inputs).context("collect input files")?;
    if files.is_empty() {
        bail!("no listing files found in the given inputs");
    }

    let mut classify_options =
        ClassifyOptions::new(options.snapshot_date).with_workers(options.jobs);
    if let Some(asset_class) = &options.asset_class {
        classify_options = classify_options.with_asset_class(asset_class.clone());
    }
    let classifier = RecordClassifier::new(contract, classify_options);

    let mut outcomes = Vec::with_capacity(files.len());
    for path in &files {
        outcomes.push(classify_file(&classifier, path)?);
    }

    let records: Vec<CanonicalRecord> = outcomes
        .iter()
        .flat_map(|outcome| outcome.records.iter().cloned())
        .collect();
    let validate_span = info_span!("validate", records = records.len());
    validate_span
        .in_scope(|| DatasetValidator::new().validate(&records))
        .context("validate canonical output")?;

    let report = BatchReport::new(contract, options.snapshot_date, &outcomes);
    let (records_csv, report_json) = if options.dry_run {
        info!("dry run; no outputs written");
        (None, None)
    } else {
        write_outputs(&options.output_dir, &records, &report)?
    };

    info!(
        files = files.len(),
        records = report.summary.records,
        row_errors = report.summary.row_errors,
        duration_ms = start.elapsed().as_millis(),
        "batch complete"
    );

    Ok(BatchResult {
        files,
        outcomes,
        report,
        output_dir: options.output_dir.clone(),
        records_csv,
        report_json,
    })
}

fn classify_file(classifier: &RecordClassifier<'_>, path: &Path) -> Result<ClassificationOutcome> {
    let table = read_listing_file(path).with_context(|| format!("read {}", path.display()))?;
    let outcome = classifier
        .classify(&table)
        .with_context(|| format!("classify {}", path.display()))?;
    if outcome.has_row_errors() {
        warn!(
            dataset = %outcome.dataset,
            row_errors = outcome.row_errors.len(),
            "rows rejected"
        );
        for error in &outcome.row_errors {
            debug!(
                dataset = %outcome.dataset,
                row_index = error.row_index,
                ml_number = redact_value(error.source_identifier.as_deref().unwrap_or("-")),
                reason = %error.reason,
                "row error"
            );
        }
    }
    Ok(outcome)
}

fn write_outputs(
    output_dir: &Path,
    records: &[CanonicalRecord],
    report: &BatchReport,
) -> Result<(Option<PathBuf>, Option<PathBuf>)> {
    let report_path = write_batch_report_json(output_dir, report)
        .with_context(|| format!("write batch report to {}", output_dir.display()))?;
    let records_path = output_dir.join(RECORDS_FILE);
    write_records_csv(&records_path, records)
        .with_context(|| format!("write {}", records_path.display()))?;
    Ok((Some(records_path), Some(report_path)))
}
