#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use mls_model::{AssetClass, CanonicalField, StatusGroup};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::document::ContractDocument;
use crate::error::ContractError;
use crate::hash::sha256_hex;

const CLOSED_PREFIX: &str = "closed";

/// How raw column names are bound to canonical fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconciliationMode {
    /// Normalized names matched against contract and built-in alias lists.
    #[default]
    AliasLookup,
    /// Source columns named verbatim in the contract's `[columns]` section.
    ExactColumnName,
}

impl ReconciliationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AliasLookup => "alias_lookup",
            Self::ExactColumnName => "exact_column_name",
        }
    }

    fn parse(raw: &str) -> Result<Self, ContractError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "alias_lookup" => Ok(Self::AliasLookup),
            "exact_column_name" => Ok(Self::ExactColumnName),
            _ => Err(ContractError::UnknownReconciliation {
                mode: raw.to_string(),
            }),
        }
    }
}

impl fmt::Display for ReconciliationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed status-rule value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTarget {
    pub group: StatusGroup,
    pub closed_subtype: Option<String>,
}

impl StatusTarget {
    /// Parse a mapped value. `closed:<subtype>` splits on the first `:`;
    /// anything else names the status group directly.
    ///
    /// Returns `None` for an empty value or an empty closed subtype.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        if let Some((head, subtype)) = value.split_once(':')
            && head.trim().eq_ignore_ascii_case(CLOSED_PREFIX)
        {
            let subtype = subtype.trim();
            if subtype.is_empty() {
                return None;
            }
            return Some(Self {
                group: StatusGroup::Closed,
                closed_subtype: Some(subtype.to_string()),
            });
        }
        Some(Self {
            group: StatusGroup::from_tag(value),
            closed_subtype: None,
        })
    }
}

/// A validated, immutable contract.
#[derive(Debug, Clone)]
pub struct Contract {
    name: String,
    version: Option<String>,
    reconciliation: ReconciliationMode,
    signatures: BTreeMap<AssetClass, Vec<String>>,
    status_rules: BTreeMap<AssetClass, BTreeMap<String, StatusTarget>>,
    aliases: BTreeMap<CanonicalField, Vec<String>>,
    columns: BTreeMap<CanonicalField, String>,
    fingerprint: String,
    origin: String,
}

impl Contract {
    /// Load a contract from disk. Files ending in `.json` are read as JSON,
    /// everything else as TOML.
    pub fn load(path: &Path) -> Result<Self, ContractError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ContractError::io(path, e))?;
        let origin = path.display().to_string();
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let contract = if is_json {
            Self::parse_json(&contents, origin)?
        } else {
            Self::parse_toml(&contents, origin)?
        };
        info!(
            contract = %contract.name,
            version = contract.version.as_deref().unwrap_or("-"),
            fingerprint = %contract.short_fingerprint(),
            reconciliation = %contract.reconciliation,
            path = %path.display(),
            "Loaded contract"
        );
        Ok(contract)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ContractError> {
        Self::parse_toml(contents, "<inline>".to_string())
    }

    pub fn from_json_str(contents: &str) -> Result<Self, ContractError> {
        Self::parse_json(contents, "<inline>".to_string())
    }

    fn parse_toml(contents: &str, origin: String) -> Result<Self, ContractError> {
        let document: ContractDocument =
            toml::from_str(contents).map_err(|source| ContractError::Toml {
                origin: origin.clone(),
                source,
            })?;
        Self::from_document(document, sha256_hex(contents.as_bytes()), origin)
    }

    fn parse_json(contents: &str, origin: String) -> Result<Self, ContractError> {
        let document: ContractDocument =
            serde_json::from_str(contents).map_err(|source| ContractError::Json {
                origin: origin.clone(),
                source,
            })?;
        Self::from_document(document, sha256_hex(contents.as_bytes()), origin)
    }

    /// Validate a parsed document.
    pub fn from_document(
        document: ContractDocument,
        fingerprint: String,
        origin: String,
    ) -> Result<Self, ContractError> {
        let reconciliation = match document.contract.reconciliation.as_deref() {
            Some(mode) => ReconciliationMode::parse(mode)?,
            None => ReconciliationMode::default(),
        };

        let mut signatures: BTreeMap<AssetClass, Vec<String>> = BTreeMap::new();
        for (tag, columns) in document.signatures {
            let entry = signatures.entry(AssetClass::from_tag(&tag)).or_default();
            for column in columns {
                let column = column.trim().to_string();
                if !column.is_empty() && !entry.contains(&column) {
                    entry.push(column);
                }
            }
        }

        let mut status_rules: BTreeMap<AssetClass, BTreeMap<String, StatusTarget>> =
            BTreeMap::new();
        for (tag, rules) in document.status_rules {
            let asset_class = AssetClass::from_tag(&tag);
            if !asset_class.is_built_in() && !signatures.contains_key(&asset_class) {
                return Err(ContractError::UnknownAssetClass { asset_class: tag });
            }
            let table = status_rules.entry(asset_class).or_default();
            for (status, value) in rules {
                let key = status.trim();
                if key.is_empty() {
                    return Err(ContractError::EmptyStatusKey {
                        asset_class: tag.clone(),
                    });
                }
                let target = match StatusTarget::parse(&value) {
                    Some(target) => target,
                    None if value.trim().is_empty() => {
                        return Err(ContractError::EmptyStatusTarget {
                            asset_class: tag.clone(),
                            status: status.clone(),
                        });
                    }
                    None => {
                        return Err(ContractError::EmptyClosedSubtype {
                            asset_class: tag.clone(),
                            status: status.clone(),
                        });
                    }
                };
                table.insert(key.to_string(), target);
            }
        }

        let mut aliases: BTreeMap<CanonicalField, Vec<String>> = BTreeMap::new();
        for (name, names) in document.aliases {
            let field = reconcilable_field("aliases", &name)?;
            let entry = aliases.entry(field).or_default();
            for alias in names {
                let alias = alias.trim();
                if alias.is_empty() {
                    return Err(ContractError::EmptyColumnName {
                        section: "aliases",
                        field: name.clone(),
                    });
                }
                entry.push(alias.to_string());
            }
        }

        let mut columns = BTreeMap::new();
        for (name, column) in document.columns {
            let field = reconcilable_field("columns", &name)?;
            let column = column.trim();
            if column.is_empty() {
                return Err(ContractError::EmptyColumnName {
                    section: "columns",
                    field: name,
                });
            }
            columns.insert(field, column.to_string());
        }

        for (asset_class, rules) in &status_rules {
            debug!(asset_class = %asset_class, rules = rules.len(), "Status rules loaded");
        }

        Ok(Self {
            name: document.contract.name,
            version: document.contract.version,
            reconciliation,
            signatures,
            status_rules,
            aliases,
            columns,
            fingerprint,
            origin,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn reconciliation(&self) -> ReconciliationMode {
        self.reconciliation
    }

    /// SHA-256 of the document text, hex encoded.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn short_fingerprint(&self) -> &str {
        self.fingerprint.get(..12).unwrap_or(&self.fingerprint)
    }

    /// Path the contract was loaded from, or `<inline>`.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Diagnostic columns for an asset class.
    pub fn signature(&self, asset_class: &AssetClass) -> Option<&[String]> {
        self.signatures.get(asset_class).map(Vec::as_slice)
    }

    pub fn signatures(&self) -> impl Iterator<Item = (&AssetClass, &[String])> {
        self.signatures
            .iter()
            .map(|(class, columns)| (class, columns.as_slice()))
    }

    /// Status rule table for an asset class.
    pub fn status_rules(&self, asset_class: &AssetClass) -> Option<&BTreeMap<String, StatusTarget>> {
        self.status_rules.get(asset_class)
    }

    pub fn all_status_rules(
        &self,
    ) -> impl Iterator<Item = (&AssetClass, &BTreeMap<String, StatusTarget>)> {
        self.status_rules.iter()
    }

    /// Every asset class the contract mentions, sorted.
    pub fn asset_classes(&self) -> Vec<AssetClass> {
        let mut classes: Vec<AssetClass> = self
            .signatures
            .keys()
            .chain(self.status_rules.keys())
            .cloned()
            .collect();
        classes.sort();
        classes.dedup();
        classes
    }

    /// True when `asset_class` may be bound to a dataset.
    pub fn knows_asset_class(&self, asset_class: &AssetClass) -> bool {
        asset_class.is_built_in()
            || self.signatures.contains_key(asset_class)
            || self.status_rules.contains_key(asset_class)
    }

    /// Contract-declared aliases for a field, in declaration order.
    pub fn aliases(&self, field: CanonicalField) -> &[String] {
        self.aliases
            .get(&field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn all_aliases(&self) -> impl Iterator<Item = (CanonicalField, &[String])> {
        self.aliases
            .iter()
            .map(|(field, names)| (*field, names.as_slice()))
    }

    /// Exact source column for a field, if the contract names one.
    pub fn column(&self, field: CanonicalField) -> Option<&str> {
        self.columns.get(&field).map(String::as_str)
    }

    pub fn all_columns(&self) -> impl Iterator<Item = (CanonicalField, &str)> {
        self.columns
            .iter()
            .map(|(field, column)| (*field, column.as_str()))
    }
}

fn reconcilable_field(section: &'static str, name: &str) -> Result<CanonicalField, ContractError> {
    CanonicalField::reconcilable_from_name(name).map_err(|source| ContractError::InvalidField {
        section,
        field: name.to_string(),
        source,
    })
}
