//! Per-dataset orchestration.

use std::ops::Range;
use std::thread;
use std::time::Instant;

use mls_contract::Contract;
use mls_map::{ColumnMapping, ReconciliationStrategy, SchemaReconciler};
use mls_model::{
    AssetClass, CanonicalField, CanonicalRecord, ClassificationOutcome, RawRow, RawTable, RowError,
};
use mls_normalization::{clean_string, to_numeric};
use tracing::{debug, info, info_span, warn};

use crate::assemble::fill_descriptive;
use crate::error::{ClassifyError, MissingKeyError};
use crate::inference::{AssetClassInferer, Inference};
use crate::options::ClassifyOptions;
use crate::price::PriceResolver;
use crate::status::StatusMapper;

/// Dataset-wide decisions made once before any row is classified.
#[derive(Debug, Clone)]
pub struct PreparedDataset {
    pub label: String,
    /// Column names after header cleaning, in source order.
    pub columns: Vec<String>,
    pub inference: Inference,
    pub mapping: ColumnMapping,
}

impl PreparedDataset {
    pub fn asset_class(&self) -> &AssetClass {
        &self.inference.asset_class
    }
}

type RowResult = Result<CanonicalRecord, RowError>;

/// Classifies raw tables against one contract.
///
/// Holds only shared references and immutable lookup tables, so one
/// classifier can serve many threads.
#[derive(Debug, Clone)]
pub struct RecordClassifier<'c> {
    contract: &'c Contract,
    reconciler: SchemaReconciler,
    options: ClassifyOptions,
}

impl<'c> RecordClassifier<'c> {
    pub fn new(contract: &'c Contract, options: ClassifyOptions) -> Self {
        Self {
            contract,
            reconciler: SchemaReconciler::from_contract(contract),
            options,
        }
    }

    pub fn contract(&self) -> &'c Contract {
        self.contract
    }

    pub fn options(&self) -> &ClassifyOptions {
        &self.options
    }

    /// Clean headers, bind the asset class and reconcile columns.
    pub fn prepare(&self, table: &RawTable) -> Result<PreparedDataset, ClassifyError> {
        let label = self
            .options
            .dataset_label
            .clone()
            .unwrap_or_else(|| table.name.clone());
        let columns: Vec<String> = table.columns().iter().map(|c| clean_header(c)).collect();

        let inference = match &self.options.asset_class {
            Some(forced) => {
                if !self.contract.knows_asset_class(forced) {
                    return Err(ClassifyError::UnknownAssetClass {
                        asset_class: forced.clone(),
                        contract: self.contract.name().to_string(),
                    });
                }
                Inference {
                    asset_class: forced.clone(),
                    matched_columns: Vec::new(),
                    forced: true,
                }
            }
            None => AssetClassInferer::new(self.contract).infer(&columns),
        };

        let mapping = self.reconciler.reconcile(&columns);
        for field in [CanonicalField::MlNumber, CanonicalField::StatusRaw] {
            if !mapping.is_bound(field) {
                warn!(dataset = %label, field = %field, "No source column bound; every row will be rejected");
            }
        }
        if !mapping.is_bound(CanonicalField::Price) {
            debug!(dataset = %label, "No price column bound");
        }

        Ok(PreparedDataset {
            label,
            columns,
            inference,
            mapping,
        })
    }

    /// Classify one row. Status is checked before the key, so a row failing
    /// both reports the status error.
    pub fn classify_row(
        &self,
        prepared: &PreparedDataset,
        row_index: usize,
        row: &RawRow<'_>,
    ) -> RowResult {
        let mapping = &prepared.mapping;
        let asset_class = prepared.asset_class();
        let ml_number = clean_string(mapping.value(row, CanonicalField::MlNumber));

        let status = StatusMapper::new(self.contract)
            .map(asset_class, mapping.value(row, CanonicalField::StatusRaw))
            .map_err(|error| error.into_row_error(row_index, ml_number.clone()))?;

        let Some(ml_number) = ml_number else {
            let error = if mapping.is_bound(CanonicalField::MlNumber) {
                MissingKeyError::Empty
            } else {
                MissingKeyError::Unbound
            };
            return Err(error.into_row_error(row_index));
        };

        let price = to_numeric(mapping.value(row, CanonicalField::Price));
        let slots = PriceResolver::resolve(asset_class, &status.status_raw, price);

        let mut record = CanonicalRecord::new(
            self.options.snapshot_date,
            asset_class.clone(),
            ml_number,
            status.status_raw,
            status.group,
        );
        record.closed_type = status.closed_subtype;
        record.list_price = slots.list_price;
        record.close_price = slots.close_price;
        fill_descriptive(&mut record, row, mapping, &prepared.columns);
        Ok(record)
    }

    /// Classify with the configured worker count.
    pub fn classify(&self, table: &RawTable) -> Result<ClassificationOutcome, ClassifyError> {
        self.classify_parallel(table, self.options.workers)
    }

    pub fn classify_sequential(
        &self,
        table: &RawTable,
    ) -> Result<ClassificationOutcome, ClassifyError> {
        self.classify_parallel(table, 1)
    }

    /// Split rows into contiguous chunks, classify them on scoped threads and
    /// merge results back in row order. The outcome is identical to the
    /// sequential path.
    pub fn classify_parallel(
        &self,
        table: &RawTable,
        workers: usize,
    ) -> Result<ClassificationOutcome, ClassifyError> {
        let prepared = self.prepare(table)?;
        let span = info_span!(
            "classify",
            dataset = %prepared.label,
            asset_class = %prepared.asset_class(),
            forced = prepared.inference.forced
        );
        let _guard = span.enter();
        let start = Instant::now();

        let row_count = table.row_count();
        let chunks = chunk_ranges(row_count, workers);
        let results: Vec<RowResult> = if chunks.len() <= 1 {
            self.classify_range(&prepared, table, 0..row_count)
        } else {
            let prepared = &prepared;
            thread::scope(|scope| {
                let handles: Vec<_> = chunks
                    .into_iter()
                    .map(|range| scope.spawn(move || self.classify_range(prepared, table, range)))
                    .collect();
                // Join every handle before reporting, so no panic is left unobserved.
                let mut merged = Vec::with_capacity(row_count);
                let mut panicked = None;
                for (worker, handle) in handles.into_iter().enumerate() {
                    match handle.join() {
                        Ok(part) => merged.extend(part),
                        Err(_) => {
                            panicked.get_or_insert(worker);
                        }
                    }
                }
                match panicked {
                    Some(worker) => Err(ClassifyError::WorkerPanicked { worker }),
                    None => Ok(merged),
                }
            })?
        };

        let mut records = Vec::with_capacity(results.len());
        let mut row_errors = Vec::new();
        for result in results {
            match result {
                Ok(record) => records.push(record),
                Err(error) => {
                    debug!(
                        row_index = error.row_index,
                        kind = error.kind.as_str(),
                        "Row rejected"
                    );
                    row_errors.push(error);
                }
            }
        }

        info!(
            dataset = %prepared.label,
            asset_class = %prepared.asset_class(),
            input_rows = row_count,
            records = records.len(),
            row_errors = row_errors.len(),
            workers = workers.max(1),
            duration_ms = start.elapsed().as_millis(),
            "classification complete"
        );

        Ok(ClassificationOutcome {
            dataset: prepared.label.clone(),
            asset_class: prepared.asset_class().clone(),
            snapshot_date: self.options.snapshot_date,
            input_rows: row_count,
            records,
            row_errors,
        })
    }

    fn classify_range(
        &self,
        prepared: &PreparedDataset,
        table: &RawTable,
        range: Range<usize>,
    ) -> Vec<RowResult> {
        range
            .filter_map(|idx| table.row(idx).map(|row| self.classify_row(prepared, idx, &row)))
            .collect()
    }
}

/// Trim whitespace and byte-order marks from a header cell.
fn clean_header(raw: &str) -> String {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .to_string()
}

/// Contiguous, near-equal ranges covering `0..len`.
fn chunk_ranges(len: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.clamp(1, len.max(1));
    let size = len.div_ceil(workers).max(1);
    (0..len)
        .step_by(size)
        .map(|start| start..(start + size).min(len))
        .collect()
}

/// Classify one table with a fresh classifier.
pub fn classify(
    contract: &Contract,
    table: &RawTable,
    options: ClassifyOptions,
) -> Result<ClassificationOutcome, ClassifyError> {
    RecordClassifier::new(contract, options).classify(table)
}

/// Classify one table on `workers` scoped threads.
pub fn classify_parallel(
    contract: &Contract,
    table: &RawTable,
    options: ClassifyOptions,
    workers: usize,
) -> Result<ClassificationOutcome, ClassifyError> {
    RecordClassifier::new(contract, options).classify_parallel(table, workers)
}
