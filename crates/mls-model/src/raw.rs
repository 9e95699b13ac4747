//! Loosely typed input tables as handed over by the ingestion layer.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// An untyped source cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum RawValue {
    Null,
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
}

impl RawValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<NaiveDate> for RawValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A borrowed view of one source row: an ordered mapping from raw column
/// name to cell.
#[derive(Debug, Clone, Copy)]
pub struct RawRow<'a> {
    columns: &'a [String],
    values: &'a [RawValue],
}

impl<'a> RawRow<'a> {
    /// Cell for `column`, matched exactly. Absent columns yield `None`.
    pub fn get(&self, column: &str) -> Option<&'a RawValue> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|idx| self.values.get(idx))
    }

    /// Cell at a column position.
    pub fn value_at(&self, idx: usize) -> Option<&'a RawValue> {
        self.values.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a RawValue)> + 'a {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A tabular batch from one source file.
///
/// Every row has exactly `columns.len()` cells; short rows are padded with
/// [`RawValue::Null`] and long rows truncated on insert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    /// Label identifying the source (usually the file name).
    pub name: String,
    columns: Vec<String>,
    rows: Vec<Vec<RawValue>>,
}

impl RawTable {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from `(column, value)` pairs per row. Columns are
    /// collected in first-seen order across all rows.
    pub fn from_named_rows<K, V>(
        name: impl Into<String>,
        rows: impl IntoIterator<Item = Vec<(K, V)>>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<RawValue>,
    {
        let mut columns: Vec<String> = Vec::new();
        let mut named: Vec<Vec<(String, RawValue)>> = Vec::new();
        for row in rows {
            let mut cells = Vec::with_capacity(row.len());
            for (key, value) in row {
                let key = key.into();
                if !columns.contains(&key) {
                    columns.push(key.clone());
                }
                cells.push((key, value.into()));
            }
            named.push(cells);
        }
        let mut table = Self::new(name, columns);
        for cells in named {
            let mut values = vec![RawValue::Null; table.columns.len()];
            for (key, value) in cells {
                if let Some(idx) = table.columns.iter().position(|c| *c == key) {
                    values[idx] = value;
                }
            }
            table.rows.push(values);
        }
        table
    }

    pub fn push_row(&mut self, mut values: Vec<RawValue>) {
        values.resize(self.columns.len(), RawValue::Null);
        self.rows.push(values);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row(&self, idx: usize) -> Option<RawRow<'_>> {
        self.rows.get(idx).map(|values| RawRow {
            columns: &self.columns,
            values,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = RawRow<'_>> {
        self.rows.iter().map(|values| RawRow {
            columns: &self.columns,
            values,
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
