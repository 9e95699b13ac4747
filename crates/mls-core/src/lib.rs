//! Classification engine.
//!
//! [`RecordClassifier`] turns one [`RawTable`](mls_model::RawTable) into
//! canonical records: it infers the asset class once per dataset, then maps
//! status, resolves price and coerces descriptive fields row by row. Rows
//! that fail are reported, never fatal.

pub mod assemble;
pub mod classifier;
pub mod error;
pub mod inference;
pub mod options;
pub mod price;
pub mod status;

pub use classifier::{PreparedDataset, RecordClassifier, classify, classify_parallel};
pub use error::{ClassifyError, MissingKeyError, StatusMappingError};
pub use inference::{AssetClassInferer, Inference};
pub use options::ClassifyOptions;
pub use price::{PriceResolver, PriceSlots};
pub use status::{MappedStatus, StatusMapper};
