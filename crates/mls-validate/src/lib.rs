//! Batch-level validation of classified listings.
//!
//! Records from every file of a batch are laid out as one canonical frame
//! ([`records_to_frame`]) and checked by [`DatasetValidator`] before anything
//! is handed downstream.

mod error;
mod frame;
mod validator;

pub use error::{SchemaError, ValidationError};
pub use frame::records_to_frame;
pub use validator::DatasetValidator;
