//! Result of reconciling one dataset's columns.

use std::collections::BTreeMap;

use mls_model::{CanonicalField, RawRow, RawValue};
use serde::Serialize;

/// A canonical field bound to a source column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldBinding {
    pub field: CanonicalField,
    pub column_index: usize,
    pub column: String,
    /// The alias (or exact name) that matched.
    pub matched_by: String,
}

/// A source column that matched a field already bound to another column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShadowedColumn {
    pub column_index: usize,
    pub column: String,
    pub field: CanonicalField,
    /// The column that won the field.
    pub bound_to: String,
}

/// How every column of a dataset is used.
///
/// Each source column ends up in exactly one of three places: bound to a
/// canonical field, shadowed by an earlier match for the same field, or
/// passed through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnMapping {
    bindings: BTreeMap<CanonicalField, FieldBinding>,
    shadowed: Vec<ShadowedColumn>,
    passthrough: Vec<(usize, String)>,
}

impl ColumnMapping {
    pub(crate) fn bind(&mut self, binding: FieldBinding) {
        self.bindings.insert(binding.field, binding);
    }

    pub(crate) fn shadow(&mut self, column: ShadowedColumn) {
        self.shadowed.push(column);
    }

    pub(crate) fn pass_through(&mut self, column_index: usize, column: String) {
        self.passthrough.push((column_index, column));
    }

    pub fn binding(&self, field: CanonicalField) -> Option<&FieldBinding> {
        self.bindings.get(&field)
    }

    pub fn column_index(&self, field: CanonicalField) -> Option<usize> {
        self.bindings.get(&field).map(|binding| binding.column_index)
    }

    pub fn is_bound(&self, field: CanonicalField) -> bool {
        self.bindings.contains_key(&field)
    }

    /// Bindings in canonical field order.
    pub fn bindings(&self) -> impl Iterator<Item = &FieldBinding> {
        self.bindings.values()
    }

    pub fn shadowed(&self) -> &[ShadowedColumn] {
        &self.shadowed
    }

    /// Unmatched columns as `(index, name)`, in source order.
    pub fn passthrough(&self) -> &[(usize, String)] {
        &self.passthrough
    }

    /// The cell bound to `field` in `row`, if any.
    pub fn value<'a>(&self, row: &RawRow<'a>, field: CanonicalField) -> Option<&'a RawValue> {
        self.column_index(field).and_then(|idx| row.value_at(idx))
    }
}
