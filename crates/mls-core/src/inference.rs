//! Asset-class inference from a dataset's column set.

use std::collections::BTreeSet;

use mls_contract::Contract;
use mls_model::{AssetClass, normalize_column_name};
use tracing::debug;

/// Outcome of inference for one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inference {
    pub asset_class: AssetClass,
    /// Dataset columns that matched the winning signature. Empty for the
    /// fallback class and for forced classes.
    pub matched_columns: Vec<String>,
    pub forced: bool,
}

/// Decides a dataset's asset class from contract signatures.
///
/// Signatures are tested in a fixed order: `rental`, then `land`. The first
/// class whose signature shares a column with the dataset wins; otherwise the
/// dataset is `residential_sale`. Column names are compared after
/// normalization.
///
/// Contract-defined classes are never inferred, even when they declare a
/// signature; a dataset is bound to one only through
/// [`ClassifyOptions::with_asset_class`](crate::ClassifyOptions::with_asset_class).
#[derive(Debug, Clone, Copy)]
pub struct AssetClassInferer<'c> {
    contract: &'c Contract,
}

impl<'c> AssetClassInferer<'c> {
    pub fn new(contract: &'c Contract) -> Self {
        Self { contract }
    }

    /// Classes tested before falling back to `residential_sale`.
    pub fn priority(&self) -> [AssetClass; 2] {
        [AssetClass::Rental, AssetClass::Land]
    }

    pub fn infer(&self, columns: &[String]) -> Inference {
        let present: BTreeSet<String> = columns.iter().map(|c| normalize_column_name(c)).collect();
        for asset_class in self.priority() {
            let Some(signature) = self.contract.signature(&asset_class) else {
                continue;
            };
            let matched: Vec<String> = signature
                .iter()
                .filter(|column| present.contains(&normalize_column_name(column)))
                .cloned()
                .collect();
            if !matched.is_empty() {
                debug!(asset_class = %asset_class, matched = ?matched, "Signature matched");
                return Inference {
                    asset_class,
                    matched_columns: matched,
                    forced: false,
                };
            }
        }
        Inference {
            asset_class: AssetClass::ResidentialSale,
            matched_columns: Vec::new(),
            forced: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTRACT: &str = r#"
[signatures]
rental = ["Lease Price", "Lease Term"]
land = ["Lot Size Acres", "Zoning"]
commercial = ["Cap Rate"]

[status_rules.residential_sale]
ACT = "listing"
"#;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn rental_wins_when_both_signatures_match() {
        let contract = Contract::from_toml_str(CONTRACT).unwrap();
        let inference = AssetClassInferer::new(&contract).infer(&cols(&[
            "MLS #",
            "Zoning",
            "Lease Term",
        ]));
        assert_eq!(inference.asset_class, AssetClass::Rental);
        assert_eq!(inference.matched_columns, ["Lease Term"]);
    }

    #[test]
    fn signature_columns_match_after_normalization() {
        let contract = Contract::from_toml_str(CONTRACT).unwrap();
        let inference = AssetClassInferer::new(&contract).infer(&cols(&["LOT_SIZE_ACRES"]));
        assert_eq!(inference.asset_class, AssetClass::Land);
    }

    #[test]
    fn contract_class_signatures_are_not_inferred() {
        let contract = Contract::from_toml_str(CONTRACT).unwrap();
        let inferer = AssetClassInferer::new(&contract);
        assert_eq!(inferer.priority(), [AssetClass::Rental, AssetClass::Land]);

        let inference = inferer.infer(&cols(&["MLS #", "Status", "Cap Rate"]));
        assert_eq!(inference.asset_class, AssetClass::ResidentialSale);
        assert!(inference.matched_columns.is_empty());
    }

    #[test]
    fn no_match_falls_back_to_residential_sale() {
        let contract = Contract::from_toml_str(CONTRACT).unwrap();
        let inference = AssetClassInferer::new(&contract).infer(&cols(&["MLS #", "Status"]));
        assert_eq!(inference.asset_class, AssetClass::ResidentialSale);
        assert!(inference.matched_columns.is_empty());
    }
}
