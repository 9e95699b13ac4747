//! Canonical data model for multi-vendor listing exports.
//!
//! Raw input arrives as a [`RawTable`] of untyped [`RawValue`] cells; the
//! classification engine turns it into [`CanonicalRecord`]s whose shape is
//! described by the [`CanonicalField`] schema.

pub mod asset;
pub mod error;
pub mod outcome;
pub mod raw;
pub mod record;
pub mod schema;

pub use asset::{AssetClass, StatusGroup};
pub use error::{ModelError, Result};
pub use outcome::{BatchSummary, ClassificationOutcome, RowError, RowErrorKind};
pub use raw::{RawRow, RawTable, RawValue};
pub use record::{CanonicalRecord, CanonicalValue};
pub use schema::{
    CanonicalField, FIELD_SPECS, FieldKind, FieldRole, FieldSpec, normalize_column_name,
};
