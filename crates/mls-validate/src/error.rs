use polars::prelude::PolarsError;
use thiserror::Error;

/// Mandatory canonical columns are structurally absent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("canonical output is missing mandatory field(s): {}", .missing.join(", "))]
pub struct SchemaError {
    pub missing: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("{count} accepted record(s) have no ml_number; first at frame row {first_row}")]
    MissingKey { count: usize, first_row: usize },
    #[error("{count} record(s) carry both list_price and close_price; first is `{ml_number}`")]
    PriceConflict { count: usize, ml_number: String },
    #[error("canonical frame: {0}")]
    Frame(#[from] PolarsError),
}
