use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown canonical field: {0}")]
    UnknownField(String),
    #[error("{0} is derived by the engine and cannot be bound to a source column")]
    DerivedField(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
