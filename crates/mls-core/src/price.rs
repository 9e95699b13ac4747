//! Which price slot the source price lands in.

use mls_model::AssetClass;

/// Raw status marking a completed sale.
pub const SOLD_STATUS: &str = "SLD";
/// Raw status marking a signed lease.
pub const LEASED_STATUS: &str = "LSE";

/// The two mutually exclusive price slots of a record.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceSlots {
    pub list_price: Option<f64>,
    pub close_price: Option<f64>,
}

/// Routes the source price by `(asset_class, status_raw)`.
///
/// | asset class | closing status | else |
/// |---|---|---|
/// | `land`, `residential_sale` | `SLD` -> `close_price` | `list_price` |
/// | `rental` | `LSE` -> `close_price` | `list_price` |
/// | other | neither | neither |
///
/// Statuses compare case-insensitively after trimming.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceResolver;

impl PriceResolver {
    pub fn closing_status(asset_class: &AssetClass) -> Option<&'static str> {
        match asset_class {
            AssetClass::Land | AssetClass::ResidentialSale => Some(SOLD_STATUS),
            AssetClass::Rental => Some(LEASED_STATUS),
            AssetClass::Other(_) => None,
        }
    }

    pub fn resolve(asset_class: &AssetClass, status_raw: &str, price: Option<f64>) -> PriceSlots {
        let Some(closing) = Self::closing_status(asset_class) else {
            return PriceSlots::default();
        };
        if status_raw.trim().eq_ignore_ascii_case(closing) {
            PriceSlots {
                list_price: None,
                close_price: price,
            }
        } else {
            PriceSlots {
                list_price: price,
                close_price: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sold_sale_goes_to_close_price() {
        let slots = PriceResolver::resolve(&AssetClass::ResidentialSale, "SLD", Some(250_000.0));
        assert_eq!(slots.close_price, Some(250_000.0));
        assert_eq!(slots.list_price, None);
    }

    #[test]
    fn active_sale_goes_to_list_price() {
        let slots = PriceResolver::resolve(&AssetClass::ResidentialSale, "ACT", Some(250_000.0));
        assert_eq!(slots.list_price, Some(250_000.0));
        assert_eq!(slots.close_price, None);
    }

    #[test]
    fn land_follows_sale_rules() {
        let slots = PriceResolver::resolve(&AssetClass::Land, "sld", Some(90_000.0));
        assert_eq!(slots.close_price, Some(90_000.0));
    }

    #[test]
    fn rental_closes_on_lease_only() {
        let leased = PriceResolver::resolve(&AssetClass::Rental, "LSE", Some(2_100.0));
        assert_eq!(leased.close_price, Some(2_100.0));
        let sold = PriceResolver::resolve(&AssetClass::Rental, "SLD", Some(2_100.0));
        assert_eq!(sold.list_price, Some(2_100.0));
        assert_eq!(sold.close_price, None);
    }

    #[test]
    fn other_classes_have_no_price() {
        let slots = PriceResolver::resolve(
            &AssetClass::Other("commercial".to_string()),
            "SLD",
            Some(1.0),
        );
        assert_eq!(slots, PriceSlots::default());
    }

    #[test]
    fn absent_price_fills_neither_slot() {
        let slots = PriceResolver::resolve(&AssetClass::ResidentialSale, "SLD", None);
        assert_eq!(slots, PriceSlots::default());
    }
}
