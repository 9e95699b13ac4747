//! Asset class and status group tags.
//!
//! Both tags have a small set of built-in values and an open `Other` variant
//! for tags that only exist in a contract document. Tags serialize as plain
//! lowercase strings (`"rental"`, `"closed"`, ...).

use std::fmt;

use serde::{Deserialize, Serialize};

/// The category of listing a dataset represents.
///
/// A dataset carries exactly one asset class; it is inferred once per file
/// and broadcast to every record produced from it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AssetClass {
    Rental,
    Land,
    ResidentialSale,
    /// A contract-defined class with no built-in pricing semantics.
    Other(String),
}

impl AssetClass {
    /// Parse a tag. Built-in tags match case-insensitively; anything else is
    /// kept verbatim (trimmed) as [`AssetClass::Other`].
    pub fn from_tag(tag: &str) -> Self {
        let trimmed = tag.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "rental" => Self::Rental,
            "land" => Self::Land,
            "residential_sale" => Self::ResidentialSale,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Rental => "rental",
            Self::Land => "land",
            Self::ResidentialSale => "residential_sale",
            Self::Other(tag) => tag.as_str(),
        }
    }

    pub fn is_built_in(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// The three classes the engine knows how to price.
    pub fn built_in() -> [AssetClass; 3] {
        [Self::Rental, Self::Land, Self::ResidentialSale]
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for AssetClass {
    fn from(value: String) -> Self {
        Self::from_tag(&value)
    }
}

impl From<&str> for AssetClass {
    fn from(value: &str) -> Self {
        Self::from_tag(value)
    }
}

impl From<AssetClass> for String {
    fn from(value: AssetClass) -> Self {
        value.as_str().to_string()
    }
}

/// Canonical lifecycle stage of a listing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusGroup {
    Listing,
    Pending,
    Closed,
    /// Any other group tag a contract maps statuses onto.
    Other(String),
}

impl StatusGroup {
    pub fn from_tag(tag: &str) -> Self {
        let trimmed = tag.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "listing" => Self::Listing,
            "pending" => Self::Pending,
            "closed" => Self::Closed,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Listing => "listing",
            Self::Pending => "pending",
            Self::Closed => "closed",
            Self::Other(tag) => tag.as_str(),
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl fmt::Display for StatusGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for StatusGroup {
    fn from(value: String) -> Self {
        Self::from_tag(&value)
    }
}

impl From<&str> for StatusGroup {
    fn from(value: &str) -> Self {
        Self::from_tag(value)
    }
}

impl From<StatusGroup> for String {
    fn from(value: StatusGroup) -> Self {
        value.as_str().to_string()
    }
}
