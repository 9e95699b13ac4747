use mls_model::{AssetClass, RowError, RowErrorKind};
use thiserror::Error;

/// A row whose status cannot be mapped. Row-scoped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusMappingError {
    #[error("status is empty or missing")]
    MissingStatus,
    #[error("status `{status}` has no mapping for asset class {asset_class}")]
    Unmapped {
        status: String,
        asset_class: AssetClass,
    },
}

/// A row without a natural key. Row-scoped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MissingKeyError {
    #[error("no source column maps to ml_number")]
    Unbound,
    #[error("ml_number is empty")]
    Empty,
}

/// Dataset-level failure; no records are produced.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("asset class `{asset_class}` is not defined by contract {contract}")]
    UnknownAssetClass {
        asset_class: AssetClass,
        contract: String,
    },
    #[error("classification worker {worker} panicked")]
    WorkerPanicked { worker: usize },
}

impl StatusMappingError {
    pub fn into_row_error(self, row_index: usize, source_identifier: Option<String>) -> RowError {
        RowError {
            row_index,
            source_identifier,
            kind: RowErrorKind::StatusMapping,
            reason: self.to_string(),
        }
    }
}

impl MissingKeyError {
    pub fn into_row_error(self, row_index: usize) -> RowError {
        RowError {
            row_index,
            source_identifier: None,
            kind: RowErrorKind::MissingKey,
            reason: self.to_string(),
        }
    }
}
