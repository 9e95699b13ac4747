use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::asset::{AssetClass, StatusGroup};
use crate::schema::CanonicalField;

/// A typed canonical value, used for generic (column-wise) access to a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CanonicalValue {
    Text(String),
    Number(f64),
    Integer(i64),
    Date(NaiveDate),
}

impl CanonicalValue {
    /// Plain string rendering; dates use ISO 8601.
    pub fn render(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Number(value) => value.to_string(),
            Self::Integer(value) => value.to_string(),
            Self::Date(value) => value.format("%Y-%m-%d").to_string(),
        }
    }
}

/// The classification engine's output unit.
///
/// Records are immutable once assembled. `list_price` and `close_price` are
/// never both populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub snapshot_date: NaiveDate,
    pub asset_class: AssetClass,
    pub ml_number: String,
    pub status_raw: String,
    pub status_group: StatusGroup,
    pub closed_type: Option<String>,
    pub list_price: Option<f64>,
    pub close_price: Option<f64>,

    pub address: Option<String>,
    pub street_number: Option<String>,
    pub street_name: Option<String>,
    pub unit_number: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub county: Option<String>,
    pub subdivision: Option<String>,
    pub property_type: Option<String>,
    pub property_style: Option<String>,
    pub beds: Option<i64>,
    pub baths_full: Option<i64>,
    pub baths_half: Option<i64>,
    pub baths_total: Option<f64>,
    pub heated_area: Option<f64>,
    pub total_area: Option<f64>,
    pub lot_size_acres: Option<f64>,
    pub lot_size_sqft: Option<f64>,
    pub year_built: Option<i64>,
    pub garage_spaces: Option<f64>,
    pub pool: Option<String>,
    pub waterfront: Option<String>,
    pub list_date: Option<NaiveDate>,
    pub pending_date: Option<NaiveDate>,
    pub close_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
    pub dom: Option<i64>,
    pub adom: Option<i64>,
    pub cdom: Option<i64>,
    pub original_list_price: Option<f64>,
    pub list_agent_id: Option<String>,
    pub list_agent_name: Option<String>,
    pub list_office_id: Option<String>,
    pub list_office_name: Option<String>,
    pub buyer_agent_id: Option<String>,
    pub buyer_office_id: Option<String>,
    pub lease_term: Option<String>,
    pub zoning: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    /// Source columns with no canonical counterpart, keyed by raw column name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl CanonicalRecord {
    /// A record with the mandatory fields set and every optional field absent.
    pub fn new(
        snapshot_date: NaiveDate,
        asset_class: AssetClass,
        ml_number: impl Into<String>,
        status_raw: impl Into<String>,
        status_group: StatusGroup,
    ) -> Self {
        Self {
            snapshot_date,
            asset_class,
            ml_number: ml_number.into(),
            status_raw: status_raw.into(),
            status_group,
            closed_type: None,
            list_price: None,
            close_price: None,
            address: None,
            street_number: None,
            street_name: None,
            unit_number: None,
            city: None,
            state: None,
            zip: None,
            county: None,
            subdivision: None,
            property_type: None,
            property_style: None,
            beds: None,
            baths_full: None,
            baths_half: None,
            baths_total: None,
            heated_area: None,
            total_area: None,
            lot_size_acres: None,
            lot_size_sqft: None,
            year_built: None,
            garage_spaces: None,
            pool: None,
            waterfront: None,
            list_date: None,
            pending_date: None,
            close_date: None,
            expiration_date: None,
            dom: None,
            adom: None,
            cdom: None,
            original_list_price: None,
            list_agent_id: None,
            list_agent_name: None,
            list_office_id: None,
            list_office_name: None,
            buyer_agent_id: None,
            buyer_office_id: None,
            lease_term: None,
            zoning: None,
            latitude: None,
            longitude: None,
            extra: BTreeMap::new(),
        }
    }

    /// Value of an output field. Returns `None` for absent values and for
    /// input-only fields such as `price`.
    pub fn value(&self, field: CanonicalField) -> Option<CanonicalValue> {
        use CanonicalValue as V;

        fn text(value: &Option<String>) -> Option<CanonicalValue> {
            value.clone().map(CanonicalValue::Text)
        }
        fn number(value: Option<f64>) -> Option<CanonicalValue> {
            value.map(CanonicalValue::Number)
        }
        fn integer(value: Option<i64>) -> Option<CanonicalValue> {
            value.map(CanonicalValue::Integer)
        }
        fn date(value: Option<NaiveDate>) -> Option<CanonicalValue> {
            value.map(CanonicalValue::Date)
        }

        match field {
            CanonicalField::SnapshotDate => Some(V::Date(self.snapshot_date)),
            CanonicalField::AssetClass => Some(V::Text(self.asset_class.to_string())),
            CanonicalField::MlNumber => Some(V::Text(self.ml_number.clone())),
            CanonicalField::StatusRaw => Some(V::Text(self.status_raw.clone())),
            CanonicalField::StatusGroup => Some(V::Text(self.status_group.to_string())),
            CanonicalField::ClosedType => text(&self.closed_type),
            CanonicalField::ListPrice => number(self.list_price),
            CanonicalField::ClosePrice => number(self.close_price),
            CanonicalField::Price => None,
            CanonicalField::Address => text(&self.address),
            CanonicalField::StreetNumber => text(&self.street_number),
            CanonicalField::StreetName => text(&self.street_name),
            CanonicalField::UnitNumber => text(&self.unit_number),
            CanonicalField::City => text(&self.city),
            CanonicalField::State => text(&self.state),
            CanonicalField::Zip => text(&self.zip),
            CanonicalField::County => text(&self.county),
            CanonicalField::Subdivision => text(&self.subdivision),
            CanonicalField::PropertyType => text(&self.property_type),
            CanonicalField::PropertyStyle => text(&self.property_style),
            CanonicalField::Beds => integer(self.beds),
            CanonicalField::BathsFull => integer(self.baths_full),
            CanonicalField::BathsHalf => integer(self.baths_half),
            CanonicalField::BathsTotal => number(self.baths_total),
            CanonicalField::HeatedArea => number(self.heated_area),
            CanonicalField::TotalArea => number(self.total_area),
            CanonicalField::LotSizeAcres => number(self.lot_size_acres),
            CanonicalField::LotSizeSqft => number(self.lot_size_sqft),
            CanonicalField::YearBuilt => integer(self.year_built),
            CanonicalField::GarageSpaces => number(self.garage_spaces),
            CanonicalField::Pool => text(&self.pool),
            CanonicalField::Waterfront => text(&self.waterfront),
            CanonicalField::ListDate => date(self.list_date),
            CanonicalField::PendingDate => date(self.pending_date),
            CanonicalField::CloseDate => date(self.close_date),
            CanonicalField::ExpirationDate => date(self.expiration_date),
            CanonicalField::Dom => integer(self.dom),
            CanonicalField::Adom => integer(self.adom),
            CanonicalField::Cdom => integer(self.cdom),
            CanonicalField::OriginalListPrice => number(self.original_list_price),
            CanonicalField::ListAgentId => text(&self.list_agent_id),
            CanonicalField::ListAgentName => text(&self.list_agent_name),
            CanonicalField::ListOfficeId => text(&self.list_office_id),
            CanonicalField::ListOfficeName => text(&self.list_office_name),
            CanonicalField::BuyerAgentId => text(&self.buyer_agent_id),
            CanonicalField::BuyerOfficeId => text(&self.buyer_office_id),
            CanonicalField::LeaseTerm => text(&self.lease_term),
            CanonicalField::Zoning => text(&self.zoning),
            CanonicalField::Latitude => number(self.latitude),
            CanonicalField::Longitude => number(self.longitude),
        }
    }

    /// True when at most one price slot is populated.
    pub fn prices_are_exclusive(&self) -> bool {
        !(self.list_price.is_some() && self.close_price.is_some())
    }
}
