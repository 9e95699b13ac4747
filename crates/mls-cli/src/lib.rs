//! CLI library components for the listing classifier.

pub mod logging;
pub mod pipeline;
