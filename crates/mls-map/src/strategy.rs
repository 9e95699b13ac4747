//! The two reconciliation strategies and the contract-selected wrapper.

use mls_contract::{Contract, ReconciliationMode};
use mls_model::{CanonicalField, normalize_column_name};
use tracing::debug;

use crate::mapping::{ColumnMapping, FieldBinding, ShadowedColumn};

/// Binds raw column names to canonical fields.
///
/// Implementations must be deterministic: the same column list always
/// produces the same mapping.
pub trait ReconciliationStrategy {
    fn mode(&self) -> ReconciliationMode;

    fn reconcile(&self, columns: &[String]) -> ColumnMapping;
}

#[derive(Debug, Clone)]
struct AliasEntry {
    field: CanonicalField,
    /// `(declared, normalized)` pairs in precedence order.
    aliases: Vec<(String, String)>,
}

/// Matches normalized column names against an alias table.
///
/// Each field's aliases are tried in order: the canonical name itself, then
/// contract aliases, then the built-in ones. For every alias the first
/// unclaimed column (in source order) whose normalized name matches wins.
/// Fields are processed in canonical order, so a column shared by two
/// fields' alias lists goes to the earlier field.
#[derive(Debug, Clone)]
pub struct AliasLookup {
    entries: Vec<AliasEntry>,
}

impl AliasLookup {
    pub fn new(contract: &Contract) -> Self {
        Self::build(|field| contract.aliases(field).to_vec())
    }

    /// Built-in aliases only.
    pub fn builtin() -> Self {
        Self::build(|_| Vec::new())
    }

    fn build(extra: impl Fn(CanonicalField) -> Vec<String>) -> Self {
        let entries = CanonicalField::reconcilable_fields()
            .map(|field| {
                let declared = std::iter::once(field.name().to_string())
                    .chain(extra(field))
                    .chain(field.aliases().iter().map(|alias| (*alias).to_string()));
                let mut aliases: Vec<(String, String)> = Vec::new();
                for alias in declared {
                    let normalized = normalize_column_name(&alias);
                    if normalized.is_empty() || aliases.iter().any(|(_, n)| *n == normalized) {
                        continue;
                    }
                    aliases.push((alias, normalized));
                }
                AliasEntry { field, aliases }
            })
            .collect();
        Self { entries }
    }

    /// Declared aliases for a field after de-duplication, in precedence order.
    pub fn aliases(&self, field: CanonicalField) -> Vec<&str> {
        self.entries
            .iter()
            .find(|entry| entry.field == field)
            .map(|entry| entry.aliases.iter().map(|(alias, _)| alias.as_str()).collect())
            .unwrap_or_default()
    }
}

impl ReconciliationStrategy for AliasLookup {
    fn mode(&self) -> ReconciliationMode {
        ReconciliationMode::AliasLookup
    }

    fn reconcile(&self, columns: &[String]) -> ColumnMapping {
        let normalized: Vec<String> = columns.iter().map(|c| normalize_column_name(c)).collect();
        let mut claimed = vec![false; columns.len()];
        let mut mapping = ColumnMapping::default();

        for entry in &self.entries {
            let hit = entry.aliases.iter().find_map(|(alias, key)| {
                normalized
                    .iter()
                    .enumerate()
                    .find(|(idx, name)| !claimed[*idx] && *name == key)
                    .map(|(idx, _)| (idx, alias))
            });
            if let Some((idx, alias)) = hit {
                claimed[idx] = true;
                mapping.bind(FieldBinding {
                    field: entry.field,
                    column_index: idx,
                    column: columns[idx].clone(),
                    matched_by: alias.clone(),
                });
            }
        }

        for (idx, column) in columns.iter().enumerate() {
            if claimed[idx] {
                continue;
            }
            let rival = self.entries.iter().find(|entry| {
                entry
                    .aliases
                    .iter()
                    .any(|(_, key)| *key == normalized[idx])
            });
            match rival.and_then(|entry| mapping.binding(entry.field).map(|b| (entry.field, b))) {
                Some((field, winner)) => {
                    debug!(
                        column = %column,
                        field = %field,
                        bound_to = %winner.column,
                        "Column shadowed by an earlier alias match"
                    );
                    let bound_to = winner.column.clone();
                    mapping.shadow(ShadowedColumn {
                        column_index: idx,
                        column: column.clone(),
                        field,
                        bound_to,
                    });
                }
                None => mapping.pass_through(idx, column.clone()),
            }
        }

        mapping
    }
}

/// Binds fields to columns named verbatim in the contract's `[columns]`
/// section. Fields without an entry fall back to their canonical name.
/// Names are compared exactly after trimming.
#[derive(Debug, Clone)]
pub struct ExactColumnName {
    columns: Vec<(CanonicalField, String)>,
}

impl ExactColumnName {
    pub fn new(contract: &Contract) -> Self {
        let columns = CanonicalField::reconcilable_fields()
            .map(|field| {
                let name = contract
                    .column(field)
                    .map_or_else(|| field.name().to_string(), str::to_string);
                (field, name)
            })
            .collect();
        Self { columns }
    }

    pub fn column(&self, field: CanonicalField) -> Option<&str> {
        self.columns
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, name)| name.as_str())
    }
}

impl ReconciliationStrategy for ExactColumnName {
    fn mode(&self) -> ReconciliationMode {
        ReconciliationMode::ExactColumnName
    }

    fn reconcile(&self, columns: &[String]) -> ColumnMapping {
        let mut claimed = vec![false; columns.len()];
        let mut mapping = ColumnMapping::default();

        for (field, name) in &self.columns {
            let hit = columns
                .iter()
                .enumerate()
                .find(|(idx, column)| !claimed[*idx] && column.trim() == name.as_str());
            if let Some((idx, column)) = hit {
                claimed[idx] = true;
                mapping.bind(FieldBinding {
                    field: *field,
                    column_index: idx,
                    column: column.clone(),
                    matched_by: name.clone(),
                });
            }
        }

        for (idx, column) in columns.iter().enumerate() {
            if claimed[idx] {
                continue;
            }
            let rival = self
                .columns
                .iter()
                .find(|(_, name)| column.trim() == name.as_str())
                .and_then(|(field, _)| mapping.binding(*field).map(|b| (*field, b)));
            match rival {
                Some((field, winner)) => {
                    let bound_to = winner.column.clone();
                    mapping.shadow(ShadowedColumn {
                        column_index: idx,
                        column: column.clone(),
                        field,
                        bound_to,
                    });
                }
                None => mapping.pass_through(idx, column.clone()),
            }
        }

        mapping
    }
}

/// The strategy a contract selects.
#[derive(Debug, Clone)]
pub enum SchemaReconciler {
    AliasLookup(AliasLookup),
    ExactColumnName(ExactColumnName),
}

impl SchemaReconciler {
    pub fn from_contract(contract: &Contract) -> Self {
        match contract.reconciliation() {
            ReconciliationMode::AliasLookup => Self::AliasLookup(AliasLookup::new(contract)),
            ReconciliationMode::ExactColumnName => {
                Self::ExactColumnName(ExactColumnName::new(contract))
            }
        }
    }
}

impl ReconciliationStrategy for SchemaReconciler {
    fn mode(&self) -> ReconciliationMode {
        match self {
            Self::AliasLookup(inner) => inner.mode(),
            Self::ExactColumnName(inner) => inner.mode(),
        }
    }

    fn reconcile(&self, columns: &[String]) -> ColumnMapping {
        let mapping = match self {
            Self::AliasLookup(inner) => inner.reconcile(columns),
            Self::ExactColumnName(inner) => inner.reconcile(columns),
        };
        debug!(
            mode = %self.mode(),
            columns = columns.len(),
            bound = mapping.bindings().count(),
            shadowed = mapping.shadowed().len(),
            passthrough = mapping.passthrough().len(),
            "Reconciled columns"
        );
        mapping
    }
}
