#![deny(unsafe_code)]

//! Column reconciliation.
//!
//! A [`SchemaReconciler`] binds the raw column names of one dataset to
//! canonical fields without looking at row content. The contract selects one
//! of two strategies: [`AliasLookup`] or [`ExactColumnName`].

pub mod mapping;
pub mod strategy;

pub use crate::mapping::{ColumnMapping, FieldBinding, ShadowedColumn};
pub use crate::strategy::{AliasLookup, ExactColumnName, ReconciliationStrategy, SchemaReconciler};
