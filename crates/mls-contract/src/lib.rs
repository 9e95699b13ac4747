#![deny(unsafe_code)]

//! Contract documents: the declarative rule set that drives asset-class
//! inference, status mapping and column reconciliation.
//!
//! A [`Contract`] is validated once on load and is read-only afterwards, so a
//! single instance can be shared by any number of concurrent batch runs.

pub mod check;
pub mod contract;
pub mod document;
pub mod error;
pub mod hash;

pub use crate::check::{ContractFinding, ContractReport, FindingKind};
pub use crate::contract::{Contract, ReconciliationMode, StatusTarget};
pub use crate::document::{ContractDocument, ContractHeader};
pub use crate::error::ContractError;
