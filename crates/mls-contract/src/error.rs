#![deny(unsafe_code)]

use std::path::PathBuf;

use mls_model::ModelError;

/// A contract document that cannot be used. Always fatal to the batch.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("failed to read contract {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML contract {origin}: {source}")]
    Toml {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse JSON contract {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown reconciliation mode `{mode}` (expected alias_lookup or exact_column_name)")]
    UnknownReconciliation { mode: String },

    #[error("status_rules references asset class `{asset_class}` which is neither built in nor declared in signatures")]
    UnknownAssetClass { asset_class: String },

    #[error("status_rules.{asset_class} contains an empty status key")]
    EmptyStatusKey { asset_class: String },

    #[error("status_rules.{asset_class}.{status} maps to an empty value")]
    EmptyStatusTarget { asset_class: String, status: String },

    #[error("status_rules.{asset_class}.{status} uses `closed:` without a subtype")]
    EmptyClosedSubtype { asset_class: String, status: String },

    #[error("invalid field `{field}` in [{section}]: {source}")]
    InvalidField {
        section: &'static str,
        field: String,
        #[source]
        source: ModelError,
    },

    #[error("[{section}] entry for `{field}` contains an empty column name")]
    EmptyColumnName {
        section: &'static str,
        field: String,
    },
}

impl ContractError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
