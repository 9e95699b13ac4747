use std::time::Instant;

use mls_model::{CanonicalField, CanonicalRecord};
use polars::prelude::DataFrame;
use tracing::{info, warn};

use crate::error::{SchemaError, ValidationError};
use crate::frame::records_to_frame;

/// Checks the aggregated canonical output of a batch.
///
/// Runs once over every accepted record of every file. Row-level filtering in
/// the classifier already drops rows without a key, so the key and price
/// checks only fire on records assembled outside the classifier.
#[derive(Debug, Clone)]
pub struct DatasetValidator {
    mandatory: Vec<CanonicalField>,
}

impl Default for DatasetValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetValidator {
    pub fn new() -> Self {
        Self {
            mandatory: CanonicalField::mandatory_fields().collect(),
        }
    }

    pub fn mandatory(&self) -> &[CanonicalField] {
        &self.mandatory
    }

    /// Build the canonical frame for `records` and validate it. Returns the
    /// frame on success.
    pub fn validate(&self, records: &[CanonicalRecord]) -> Result<DataFrame, ValidationError> {
        let start = Instant::now();
        let frame = records_to_frame(records)?;
        self.validate_frame(&frame)?;
        info!(
            records = frame.height(),
            columns = frame.width(),
            duration_ms = start.elapsed().as_millis(),
            "validation complete"
        );
        Ok(frame)
    }

    pub fn validate_frame(&self, frame: &DataFrame) -> Result<(), ValidationError> {
        self.check_schema(frame)?;
        check_keys(frame)?;
        check_prices(frame)?;
        Ok(())
    }

    pub fn check_schema(&self, frame: &DataFrame) -> Result<(), SchemaError> {
        let missing: Vec<String> = self
            .mandatory
            .iter()
            .map(|field| field.name())
            .filter(|name| frame.column(name).is_err())
            .map(str::to_string)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            warn!(missing = ?missing, "Mandatory canonical fields absent");
            Err(SchemaError { missing })
        }
    }
}

fn check_keys(frame: &DataFrame) -> Result<(), ValidationError> {
    let keys = frame.column(CanonicalField::MlNumber.name())?.str()?;
    let mut count = 0;
    let mut first_row = None;
    for (idx, key) in keys.into_iter().enumerate() {
        if key.is_none_or(|key| key.trim().is_empty()) {
            count += 1;
            first_row.get_or_insert(idx);
        }
    }
    match first_row {
        Some(first_row) => Err(ValidationError::MissingKey { count, first_row }),
        None => Ok(()),
    }
}

/// Price slots are optional columns; a frame without them has nothing to check.
fn check_prices(frame: &DataFrame) -> Result<(), ValidationError> {
    let (Ok(list), Ok(close)) = (
        frame.column(CanonicalField::ListPrice.name()),
        frame.column(CanonicalField::ClosePrice.name()),
    ) else {
        return Ok(());
    };
    let (list, close) = (list.f64()?, close.f64()?);
    let keys = frame.column(CanonicalField::MlNumber.name())?.str()?;
    let mut count = 0;
    let mut first = None;
    for ((list, close), key) in list.into_iter().zip(close).zip(keys) {
        if list.is_some() && close.is_some() {
            count += 1;
            first.get_or_insert_with(|| key.unwrap_or_default().to_string());
        }
    }
    match first {
        Some(ml_number) => Err(ValidationError::PriceConflict { count, ml_number }),
        None => Ok(()),
    }
}
