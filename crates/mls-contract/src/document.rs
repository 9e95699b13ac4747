#![deny(unsafe_code)]

//! On-disk shape of a contract document, before validation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractDocument {
    #[serde(default)]
    pub contract: ContractHeader,
    /// Asset-class tag -> diagnostic column names.
    pub signatures: BTreeMap<String, Vec<String>>,
    /// Asset-class tag -> raw status -> mapped value (`listing`, `closed:sold`, ...).
    pub status_rules: BTreeMap<String, BTreeMap<String, String>>,
    /// Canonical field name -> extra aliases, tried before the built-in ones.
    #[serde(default)]
    pub aliases: BTreeMap<String, Vec<String>>,
    /// Canonical field name -> exact source column name.
    #[serde(default)]
    pub columns: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractHeader {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub reconciliation: Option<String>,
}

impl Default for ContractHeader {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: None,
            reconciliation: None,
        }
    }
}

fn default_name() -> String {
    "unnamed".to_string()
}
