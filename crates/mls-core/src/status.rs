//! Raw status to canonical `(status_group, closed_subtype)`.

use mls_contract::Contract;
use mls_model::{AssetClass, RawValue, StatusGroup};
use mls_normalization::clean_string;

use crate::error::StatusMappingError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedStatus {
    /// The cleaned raw status.
    pub status_raw: String,
    pub group: StatusGroup,
    pub closed_subtype: Option<String>,
}

/// Looks raw statuses up in the contract's per-class rule tables.
///
/// A status with no rule is an error; there is no default group.
///
/// # Case matching
///
/// Every contract gets the same lookup: the cleaned status is matched
/// against the rule keys exactly first, then ASCII case-insensitively, so
/// `sld` maps through an `SLD` rule. An exact key always wins over a key
/// that only matches after case folding. When a class declares keys that
/// differ only by case, the first one in key order takes the folded match;
/// `contract check` reports such keys as `ambiguous_status_case`.
/// [`PriceResolver`](crate::PriceResolver) compares closing statuses the
/// same way, so a lowercase closing status still lands in `close_price`.
#[derive(Debug, Clone, Copy)]
pub struct StatusMapper<'c> {
    contract: &'c Contract,
}

impl<'c> StatusMapper<'c> {
    pub fn new(contract: &'c Contract) -> Self {
        Self { contract }
    }

    pub fn map(
        &self,
        asset_class: &AssetClass,
        raw: Option<&RawValue>,
    ) -> Result<MappedStatus, StatusMappingError> {
        let status = clean_string(raw).ok_or(StatusMappingError::MissingStatus)?;
        let rules = self.contract.status_rules(asset_class);
        let target = rules
            .and_then(|rules| {
                rules.get(&status).or_else(|| {
                    rules
                        .iter()
                        .find(|(key, _)| key.eq_ignore_ascii_case(&status))
                        .map(|(_, target)| target)
                })
            })
            .ok_or_else(|| StatusMappingError::Unmapped {
                status: status.clone(),
                asset_class: asset_class.clone(),
            })?;
        Ok(MappedStatus {
            status_raw: status,
            group: target.group.clone(),
            closed_subtype: target.closed_subtype.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract() -> Contract {
        Contract::from_toml_str(
            r#"
[signatures]
rental = ["Lease Term"]

[status_rules.residential_sale]
ACT = "listing"
PND = "pending"
SLD = "closed:sold"
CLS = "closed"

[status_rules.rental]
ACT = "listing"
LSE = "closed:leased"
"#,
        )
        .unwrap()
    }

    fn text(value: &str) -> RawValue {
        RawValue::text(value)
    }

    #[test]
    fn closed_values_carry_the_subtype() {
        let contract = contract();
        let mapped = StatusMapper::new(&contract)
            .map(&AssetClass::ResidentialSale, Some(&text("SLD")))
            .unwrap();
        assert_eq!(mapped.group, StatusGroup::Closed);
        assert_eq!(mapped.closed_subtype.as_deref(), Some("sold"));
        assert_eq!(mapped.status_raw, "SLD");
    }

    #[test]
    fn plain_closed_has_no_subtype() {
        let contract = contract();
        let mapped = StatusMapper::new(&contract)
            .map(&AssetClass::ResidentialSale, Some(&text("CLS")))
            .unwrap();
        assert_eq!(mapped.group, StatusGroup::Closed);
        assert_eq!(mapped.closed_subtype, None);
    }

    #[test]
    fn lookup_falls_back_to_case_insensitive() {
        let contract = contract();
        let mapped = StatusMapper::new(&contract)
            .map(&AssetClass::Rental, Some(&text(" lse ")))
            .unwrap();
        assert_eq!(mapped.closed_subtype.as_deref(), Some("leased"));
        assert_eq!(mapped.status_raw, "lse");
    }

    #[test]
    fn exact_key_wins_over_case_folded_key() {
        let contract = Contract::from_toml_str(
            r#"
[status_rules.residential_sale]
ACT = "listing"
act = "pending"
"#,
        )
        .unwrap();
        let mapper = StatusMapper::new(&contract);
        let upper = mapper
            .map(&AssetClass::ResidentialSale, Some(&text("ACT")))
            .unwrap();
        let lower = mapper
            .map(&AssetClass::ResidentialSale, Some(&text("act")))
            .unwrap();
        assert_eq!(upper.group, StatusGroup::Listing);
        assert_eq!(lower.group, StatusGroup::Pending);
    }

    #[test]
    fn unmapped_status_names_class_and_status() {
        let contract = contract();
        let error = StatusMapper::new(&contract)
            .map(&AssetClass::Rental, Some(&text("PND")))
            .unwrap_err();
        insta::assert_snapshot!(error, @"status `PND` has no mapping for asset class rental");
    }

    #[test]
    fn class_without_rules_maps_nothing() {
        let contract = contract();
        let error = StatusMapper::new(&contract)
            .map(&AssetClass::Land, Some(&text("ACT")))
            .unwrap_err();
        assert!(matches!(error, StatusMappingError::Unmapped { .. }));
    }

    #[test]
    fn empty_status_is_reported() {
        let contract = contract();
        let mapper = StatusMapper::new(&contract);
        for raw in [None, Some(RawValue::Null), Some(text("  ")), Some(text("nan"))] {
            assert_eq!(
                mapper.map(&AssetClass::ResidentialSale, raw.as_ref()),
                Err(StatusMappingError::MissingStatus)
            );
        }
    }
}
