use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::asset::AssetClass;
use crate::record::CanonicalRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowErrorKind {
    /// The raw status was empty or has no rule for the dataset's asset class.
    StatusMapping,
    /// The row carries no ML number.
    MissingKey,
}

impl RowErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StatusMapping => "status_mapping",
            Self::MissingKey => "missing_key",
        }
    }
}

/// A row excluded from the output, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// Zero-based data row index within the source table.
    pub row_index: usize,
    /// The row's ML number when it has one.
    pub source_identifier: Option<String>,
    pub kind: RowErrorKind,
    pub reason: String,
}

/// Result of classifying one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationOutcome {
    /// Source label of the dataset.
    pub dataset: String,
    pub asset_class: AssetClass,
    pub snapshot_date: NaiveDate,
    /// Rows seen, accepted or not.
    pub input_rows: usize,
    pub records: Vec<CanonicalRecord>,
    /// Row errors in ascending `row_index` order.
    pub row_errors: Vec<RowError>,
}

impl ClassificationOutcome {
    pub fn has_row_errors(&self) -> bool {
        !self.row_errors.is_empty()
    }

    pub fn summary(&self) -> BatchSummary {
        let mut summary = BatchSummary::default();
        summary.add(self);
        summary
    }
}

/// Counts aggregated over one or more classification outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub datasets: usize,
    pub input_rows: usize,
    pub records: usize,
    pub row_errors: usize,
    pub by_status_group: BTreeMap<String, usize>,
    pub by_error_kind: BTreeMap<String, usize>,
    pub by_asset_class: BTreeMap<String, usize>,
}

impl BatchSummary {
    pub fn add(&mut self, outcome: &ClassificationOutcome) {
        self.datasets += 1;
        self.input_rows += outcome.input_rows;
        self.records += outcome.records.len();
        self.row_errors += outcome.row_errors.len();
        *self
            .by_asset_class
            .entry(outcome.asset_class.to_string())
            .or_insert(0) += outcome.records.len();
        for record in &outcome.records {
            *self
                .by_status_group
                .entry(record.status_group.to_string())
                .or_insert(0) += 1;
        }
        for error in &outcome.row_errors {
            *self
                .by_error_kind
                .entry(error.kind.as_str().to_string())
                .or_insert(0) += 1;
        }
    }

    pub fn from_outcomes<'a>(outcomes: impl IntoIterator<Item = &'a ClassificationOutcome>) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            summary.add(outcome);
        }
        summary
    }
}
