//! Descriptive field coercion.

use mls_map::ColumnMapping;
use mls_model::{CanonicalField, CanonicalRecord, RawRow, RawValue};
use mls_normalization::{clean_string, to_date, to_integer, to_numeric};

/// Fill every descriptive field of `record` from the bound cells of `row`,
/// and copy pass-through columns into `extra`.
pub fn fill_descriptive(
    record: &mut CanonicalRecord,
    row: &RawRow<'_>,
    mapping: &ColumnMapping,
    columns: &[String],
) {
    for binding in mapping.bindings() {
        set_field(record, binding.field, row.value_at(binding.column_index));
    }
    for (idx, _) in mapping.passthrough() {
        if let Some(value) = clean_string(row.value_at(*idx))
            && let Some(column) = columns.get(*idx)
        {
            record.extra.insert(column.clone(), value);
        }
    }
}

/// Coerce one cell into a descriptive field. Mandatory and derived fields are
/// owned by the classifier and ignored here.
pub fn set_field(record: &mut CanonicalRecord, field: CanonicalField, cell: Option<&RawValue>) {
    use CanonicalField as F;

    match field {
        F::Address => record.address = clean_string(cell),
        F::StreetNumber => record.street_number = clean_string(cell),
        F::StreetName => record.street_name = clean_string(cell),
        F::UnitNumber => record.unit_number = clean_string(cell),
        F::City => record.city = clean_string(cell),
        F::State => record.state = clean_string(cell),
        F::Zip => record.zip = clean_string(cell),
        F::County => record.county = clean_string(cell),
        F::Subdivision => record.subdivision = clean_string(cell),
        F::PropertyType => record.property_type = clean_string(cell),
        F::PropertyStyle => record.property_style = clean_string(cell),
        F::Beds => record.beds = to_integer(cell),
        F::BathsFull => record.baths_full = to_integer(cell),
        F::BathsHalf => record.baths_half = to_integer(cell),
        F::BathsTotal => record.baths_total = to_numeric(cell),
        F::HeatedArea => record.heated_area = to_numeric(cell),
        F::TotalArea => record.total_area = to_numeric(cell),
        F::LotSizeAcres => record.lot_size_acres = to_numeric(cell),
        F::LotSizeSqft => record.lot_size_sqft = to_numeric(cell),
        F::YearBuilt => record.year_built = to_integer(cell),
        F::GarageSpaces => record.garage_spaces = to_numeric(cell),
        F::Pool => record.pool = clean_string(cell),
        F::Waterfront => record.waterfront = clean_string(cell),
        F::ListDate => record.list_date = to_date(cell),
        F::PendingDate => record.pending_date = to_date(cell),
        F::CloseDate => record.close_date = to_date(cell),
        F::ExpirationDate => record.expiration_date = to_date(cell),
        F::Dom => record.dom = to_integer(cell),
        F::Adom => record.adom = to_integer(cell),
        F::Cdom => record.cdom = to_integer(cell),
        F::OriginalListPrice => record.original_list_price = to_numeric(cell),
        F::ListAgentId => record.list_agent_id = clean_string(cell),
        F::ListAgentName => record.list_agent_name = clean_string(cell),
        F::ListOfficeId => record.list_office_id = clean_string(cell),
        F::ListOfficeName => record.list_office_name = clean_string(cell),
        F::BuyerAgentId => record.buyer_agent_id = clean_string(cell),
        F::BuyerOfficeId => record.buyer_office_id = clean_string(cell),
        F::LeaseTerm => record.lease_term = clean_string(cell),
        F::Zoning => record.zoning = clean_string(cell),
        F::Latitude => record.latitude = to_numeric(cell),
        F::Longitude => record.longitude = to_numeric(cell),
        F::SnapshotDate
        | F::AssetClass
        | F::MlNumber
        | F::StatusRaw
        | F::StatusGroup
        | F::ClosedType
        | F::ListPrice
        | F::ClosePrice
        | F::Price => {}
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use mls_model::{AssetClass, StatusGroup};

    use super::*;

    fn record() -> CanonicalRecord {
        CanonicalRecord::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            AssetClass::ResidentialSale,
            "A1",
            "ACT",
            StatusGroup::Listing,
        )
    }

    #[test]
    fn fields_coerce_to_their_kind() {
        let mut rec = record();
        set_field(&mut rec, CanonicalField::Beds, Some(&RawValue::text("3")));
        set_field(&mut rec, CanonicalField::HeatedArea, Some(&RawValue::text("1,850")));
        set_field(&mut rec, CanonicalField::ListDate, Some(&RawValue::text("01/15/2025")));
        set_field(&mut rec, CanonicalField::Zip, Some(&RawValue::Number(33602.0)));
        set_field(&mut rec, CanonicalField::YearBuilt, Some(&RawValue::text("unknown")));

        assert_eq!(rec.beds, Some(3));
        assert_eq!(rec.heated_area, Some(1850.0));
        assert_eq!(rec.list_date, NaiveDate::from_ymd_opt(2025, 1, 15));
        assert_eq!(rec.zip.as_deref(), Some("33602"));
        assert_eq!(rec.year_built, None);
    }

    #[test]
    fn derived_fields_are_not_overwritten() {
        let mut rec = record();
        set_field(&mut rec, CanonicalField::MlNumber, Some(&RawValue::text("B2")));
        set_field(&mut rec, CanonicalField::Price, Some(&RawValue::Number(1.0)));
        assert_eq!(rec, record());
    }
}
