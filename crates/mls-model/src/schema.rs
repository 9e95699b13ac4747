//! Canonical field schema.
//!
//! [`FIELD_SPECS`] is the single source of truth for the canonical output
//! shape: field order, scalar kind, whether the field is derived by the
//! engine or read from the source, and the built-in vendor aliases used by
//! alias-based column reconciliation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Scalar type a canonical field is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Integer,
    Date,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Date => "date",
        }
    }
}

/// Where a canonical field's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    /// Computed by the engine (asset class, status group, price slots).
    Derived,
    /// Read from a reconciled source column and emitted.
    Source,
    /// Read from a source column but only consumed by the engine.
    Input,
}

impl FieldRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Derived => "derived",
            Self::Source => "source",
            Self::Input => "input",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    SnapshotDate,
    AssetClass,
    MlNumber,
    StatusRaw,
    StatusGroup,
    ClosedType,
    ListPrice,
    ClosePrice,
    Price,
    Address,
    StreetNumber,
    StreetName,
    UnitNumber,
    City,
    State,
    Zip,
    County,
    Subdivision,
    PropertyType,
    PropertyStyle,
    Beds,
    BathsFull,
    BathsHalf,
    BathsTotal,
    HeatedArea,
    TotalArea,
    LotSizeAcres,
    LotSizeSqft,
    YearBuilt,
    GarageSpaces,
    Pool,
    Waterfront,
    ListDate,
    PendingDate,
    CloseDate,
    ExpirationDate,
    Dom,
    Adom,
    Cdom,
    OriginalListPrice,
    ListAgentId,
    ListAgentName,
    ListOfficeId,
    ListOfficeName,
    BuyerAgentId,
    BuyerOfficeId,
    LeaseTerm,
    Zoning,
    Latitude,
    Longitude,
}

#[derive(Debug)]
pub struct FieldSpec {
    pub field: CanonicalField,
    pub name: &'static str,
    pub kind: FieldKind,
    pub role: FieldRole,
    pub mandatory: bool,
    pub aliases: &'static [&'static str],
}

const fn derived(field: CanonicalField, name: &'static str, kind: FieldKind, mandatory: bool) -> FieldSpec {
    FieldSpec {
        field,
        name,
        kind,
        role: FieldRole::Derived,
        mandatory,
        aliases: &[],
    }
}

const fn source(
    field: CanonicalField,
    name: &'static str,
    kind: FieldKind,
    aliases: &'static [&'static str],
) -> FieldSpec {
    FieldSpec {
        field,
        name,
        kind,
        role: FieldRole::Source,
        mandatory: false,
        aliases,
    }
}

use CanonicalField as F;
use FieldKind::{Date, Integer, Number, Text};

/// Every canonical field, in output order. Indexed by `CanonicalField as usize`.
pub static FIELD_SPECS: &[FieldSpec] = &[
    derived(F::SnapshotDate, "snapshot_date", Date, true),
    derived(F::AssetClass, "asset_class", Text, true),
    FieldSpec {
        field: F::MlNumber,
        name: "ml_number",
        kind: Text,
        role: FieldRole::Source,
        mandatory: true,
        aliases: &["ML Number", "MLS Number", "MLS #", "ML #", "MLS ID", "Listing ID", "List Number"],
    },
    FieldSpec {
        field: F::StatusRaw,
        name: "status_raw",
        kind: Text,
        role: FieldRole::Source,
        mandatory: true,
        aliases: &["Status", "Listing Status", "MLS Status", "Stat", "Status Code"],
    },
    derived(F::StatusGroup, "status_group", Text, true),
    derived(F::ClosedType, "closed_type", Text, false),
    derived(F::ListPrice, "list_price", Number, false),
    derived(F::ClosePrice, "close_price", Number, false),
    FieldSpec {
        field: F::Price,
        name: "price",
        kind: Number,
        role: FieldRole::Input,
        mandatory: false,
        aliases: &["Current Price", "Price", "List Price", "Sold Price", "Lease Price", "Rent"],
    },
    source(F::Address, "address", Text, &["Address", "Full Address", "Street Address", "Property Address"]),
    source(F::StreetNumber, "street_number", Text, &["Street Number", "Street #", "House Number"]),
    source(F::StreetName, "street_name", Text, &["Street Name", "St Name"]),
    source(F::UnitNumber, "unit_number", Text, &["Unit Number", "Unit #", "Unit", "Apt"]),
    source(F::City, "city", Text, &["City", "Municipality", "Postal City"]),
    source(F::State, "state", Text, &["State", "State Or Province", "St"]),
    source(F::Zip, "zip", Text, &["Zip", "Zip Code", "Postal Code", "Zip/Postal Code"]),
    source(F::County, "county", Text, &["County", "County Or Parish"]),
    source(F::Subdivision, "subdivision", Text, &["Subdivision", "Subdivision Name", "Legal Subdivision Name", "Neighborhood"]),
    source(F::PropertyType, "property_type", Text, &["Property Type", "Prop Type", "Type"]),
    source(F::PropertyStyle, "property_style", Text, &["Property Style", "Style", "Property Sub Type", "Sub Type"]),
    source(F::Beds, "beds", Integer, &["Beds", "Bedrooms", "Beds Total", "BR", "Bedrooms Total"]),
    source(F::BathsFull, "baths_full", Integer, &["Full Baths", "Baths Full", "Bathrooms Full", "FB"]),
    source(F::BathsHalf, "baths_half", Integer, &["Half Baths", "Baths Half", "Bathrooms Half", "HB"]),
    source(F::BathsTotal, "baths_total", Number, &["Baths", "Total Baths", "Baths Total", "Bathrooms Total"]),
    source(F::HeatedArea, "heated_area", Number, &["Heated Area", "SqFt Heated", "Heated SqFt", "Living Area", "Sq Ft Heated"]),
    source(F::TotalArea, "total_area", Number, &["Total Area", "SqFt Total", "Total SqFt", "Building Area Total"]),
    source(F::LotSizeAcres, "lot_size_acres", Number, &["Lot Size Acres", "Total Acreage", "Acres", "Acreage"]),
    source(F::LotSizeSqft, "lot_size_sqft", Number, &["Lot Size SqFt", "Lot Size Square Footage", "Lot SqFt", "Lot Size"]),
    source(F::YearBuilt, "year_built", Integer, &["Year Built", "Yr Built", "YearBuilt"]),
    source(F::GarageSpaces, "garage_spaces", Number, &["Garage Spaces", "Garage", "Garage Spcs"]),
    source(F::Pool, "pool", Text, &["Pool", "Pool Private", "Private Pool"]),
    source(F::Waterfront, "waterfront", Text, &["Waterfront", "Water Frontage", "Waterfront YN"]),
    source(F::ListDate, "list_date", Date, &["List Date", "Listing Date", "Listing Contract Date"]),
    source(F::PendingDate, "pending_date", Date, &["Pending Date", "Under Contract Date", "Contract Date"]),
    source(F::CloseDate, "close_date", Date, &["Close Date", "Closing Date", "Sold Date", "Lease Date", "Leased Date"]),
    source(F::ExpirationDate, "expiration_date", Date, &["Expiration Date", "Expire Date", "Listing Expiration Date"]),
    source(F::Dom, "dom", Integer, &["DOM", "Days On Market"]),
    source(F::Adom, "adom", Integer, &["ADOM", "Agent Days On Market"]),
    source(F::Cdom, "cdom", Integer, &["CDOM", "Cumulative Days On Market", "CDOM Total"]),
    source(F::OriginalListPrice, "original_list_price", Number, &["Original List Price", "Orig List Price", "Original Price"]),
    source(F::ListAgentId, "list_agent_id", Text, &["List Agent ID", "List Agent MLS ID", "Listing Agent ID", "LA ID"]),
    source(F::ListAgentName, "list_agent_name", Text, &["List Agent Name", "List Agent Full Name", "Listing Agent", "List Agent"]),
    source(F::ListOfficeId, "list_office_id", Text, &["List Office ID", "List Office MLS ID", "Listing Office ID", "LO ID"]),
    source(F::ListOfficeName, "list_office_name", Text, &["List Office Name", "Listing Office", "List Office"]),
    source(F::BuyerAgentId, "buyer_agent_id", Text, &["Buyer Agent ID", "Selling Agent ID", "Buyer Agent MLS ID", "SA ID"]),
    source(F::BuyerOfficeId, "buyer_office_id", Text, &["Buyer Office ID", "Selling Office ID", "Buyer Office MLS ID", "SO ID"]),
    source(F::LeaseTerm, "lease_term", Text, &["Lease Term", "Lease Length", "Term Of Lease"]),
    source(F::Zoning, "zoning", Text, &["Zoning", "Zoning Code", "Zone"]),
    source(F::Latitude, "latitude", Number, &["Latitude", "Lat"]),
    source(F::Longitude, "longitude", Number, &["Longitude", "Long", "Lng", "Lon"]),
];

impl CanonicalField {
    pub fn spec(self) -> &'static FieldSpec {
        &FIELD_SPECS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn kind(self) -> FieldKind {
        self.spec().kind
    }

    pub fn role(self) -> FieldRole {
        self.spec().role
    }

    pub fn is_mandatory(self) -> bool {
        self.spec().mandatory
    }

    /// Built-in vendor aliases, in precedence order.
    pub fn aliases(self) -> &'static [&'static str] {
        self.spec().aliases
    }

    /// Fields that can be bound to a source column.
    pub fn is_reconcilable(self) -> bool {
        self.role() != FieldRole::Derived
    }

    /// Every field, in output order followed by input-only fields.
    pub fn all() -> impl Iterator<Item = CanonicalField> {
        Self::output_fields().chain(
            FIELD_SPECS
                .iter()
                .filter(|spec| spec.role == FieldRole::Input)
                .map(|spec| spec.field),
        )
    }

    /// Fields that appear in the canonical output, in output order.
    pub fn output_fields() -> impl Iterator<Item = CanonicalField> {
        FIELD_SPECS
            .iter()
            .filter(|spec| spec.role != FieldRole::Input)
            .map(|spec| spec.field)
    }

    /// Fields read from source columns, in reconciliation order.
    pub fn reconcilable_fields() -> impl Iterator<Item = CanonicalField> {
        FIELD_SPECS
            .iter()
            .filter(|spec| spec.role != FieldRole::Derived)
            .map(|spec| spec.field)
    }

    pub fn mandatory_fields() -> impl Iterator<Item = CanonicalField> {
        FIELD_SPECS
            .iter()
            .filter(|spec| spec.mandatory)
            .map(|spec| spec.field)
    }

    /// Look up a field by canonical name (normalized before comparison).
    pub fn from_name(name: &str) -> Option<Self> {
        let key = normalize_column_name(name);
        FIELD_SPECS
            .iter()
            .find(|spec| spec.name == key)
            .map(|spec| spec.field)
    }

    /// Like [`FromStr`](std::str::FromStr), but rejects fields the engine
    /// derives itself.
    pub fn reconcilable_from_name(name: &str) -> Result<Self, ModelError> {
        let field: Self = name.parse()?;
        if field.is_reconcilable() {
            Ok(field)
        } else {
            Err(ModelError::DerivedField(field.name().to_string()))
        }
    }
}

impl std::str::FromStr for CanonicalField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ModelError::UnknownField(s.trim().to_string()))
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Normalize a raw column name for comparison: case-fold, collapse runs of
/// non-alphanumeric characters to a single `_`, trim leading and trailing
/// separators.
///
/// `"  List  Price ($) "` becomes `"list_price"`.
pub fn normalize_column_name(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    let mut pending_separator = false;
    for ch in raw.trim_matches('\u{feff}').chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            if pending_separator && !normalized.is_empty() {
                normalized.push('_');
            }
            pending_separator = false;
            normalized.push(ch);
        } else {
            pending_separator = true;
        }
    }
    normalized
}
