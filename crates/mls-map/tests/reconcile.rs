use mls_contract::{Contract, ReconciliationMode};
use mls_map::{ReconciliationStrategy, SchemaReconciler};
use mls_model::{CanonicalField, RawTable, RawValue, normalize_column_name};
use proptest::prelude::*;

fn contract(extra: &str) -> Contract {
    let text = format!(
        r#"
{extra}

[signatures]
rental = ["Lease Term"]

[status_rules.residential_sale]
ACT = "listing"
"#
    );
    Contract::from_toml_str(&text).unwrap()
}

fn cols(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

#[test]
fn contract_aliases_take_precedence_over_builtins() {
    let contract = contract(
        r#"
[aliases]
ml_number = ["Listing Key"]
"#,
    );
    let reconciler = SchemaReconciler::from_contract(&contract);
    assert_eq!(reconciler.mode(), ReconciliationMode::AliasLookup);

    let mapping = reconciler.reconcile(&cols(&["MLS #", "Listing Key"]));
    let binding = mapping.binding(CanonicalField::MlNumber).unwrap();
    assert_eq!(binding.column, "Listing Key");
    assert_eq!(mapping.shadowed()[0].column, "MLS #");
}

#[test]
fn exact_mode_uses_contract_columns_verbatim() {
    let contract = contract(
        r#"
[contract]
reconciliation = "exact_column_name"

[columns]
ml_number = "MLS #"
status_raw = "Stat"
"#,
    );
    let reconciler = SchemaReconciler::from_contract(&contract);
    assert_eq!(reconciler.mode(), ReconciliationMode::ExactColumnName);

    let mapping = reconciler.reconcile(&cols(&["mls #", "MLS #", " Stat ", "city", "Bedrooms"]));
    assert_eq!(mapping.column_index(CanonicalField::MlNumber), Some(1));
    assert_eq!(mapping.column_index(CanonicalField::StatusRaw), Some(2));
    assert_eq!(mapping.column_index(CanonicalField::City), Some(3));
    // No alias matching in exact mode.
    assert!(!mapping.is_bound(CanonicalField::Beds));
    let passthrough: Vec<&str> = mapping
        .passthrough()
        .iter()
        .map(|(_, name)| name.as_str())
        .collect();
    assert_eq!(passthrough, ["mls #", "Bedrooms"]);
}

#[test]
fn mapping_reads_bound_cells_from_rows() {
    let table = RawTable::from_named_rows(
        "listings.csv",
        vec![vec![
            ("ML Number", RawValue::text("A100")),
            ("Zip Code", RawValue::text("33602")),
        ]],
    );
    let reconciler = SchemaReconciler::from_contract(&contract(""));
    let mapping = reconciler.reconcile(table.columns());
    let row = table.row(0).unwrap();
    assert_eq!(
        mapping.value(&row, CanonicalField::Zip),
        Some(&RawValue::text("33602"))
    );
    assert_eq!(mapping.value(&row, CanonicalField::City), None);
}

fn arb_column() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => prop::sample::select(vec![
            "MLS #", "ML Number", "Status", "STATUS", "List Price", "Current Price",
            "Zip", "Zip Code", "Postal Code", "Beds", "Bedrooms", "City", "Remarks",
            "Lease Term", "Acres",
        ])
        .prop_map(str::to_string),
        1 => "[ A-Za-z#_()-]{0,16}",
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        failure_persistence: None,
        ..ProptestConfig::default()
    })]

    #[test]
    fn normalization_is_idempotent(raw in ".{0,32}") {
        let once = normalize_column_name(&raw);
        prop_assert_eq!(normalize_column_name(&once), once.clone());
        prop_assert!(!once.starts_with('_') && !once.ends_with('_'));
    }

    #[test]
    fn every_column_is_accounted_for_once(columns in prop::collection::vec(arb_column(), 0..12)) {
        let reconciler = SchemaReconciler::from_contract(&contract(""));
        let mapping = reconciler.reconcile(&columns);

        let mut seen: Vec<usize> = mapping
            .bindings()
            .map(|binding| binding.column_index)
            .chain(mapping.shadowed().iter().map(|s| s.column_index))
            .chain(mapping.passthrough().iter().map(|(idx, _)| *idx))
            .collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..columns.len()).collect::<Vec<_>>());
    }

    #[test]
    fn reconciliation_is_deterministic(columns in prop::collection::vec(arb_column(), 0..12)) {
        let reconciler = SchemaReconciler::from_contract(&contract(""));
        prop_assert_eq!(reconciler.reconcile(&columns), reconciler.reconcile(&columns));
    }
}
