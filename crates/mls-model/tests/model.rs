use chrono::NaiveDate;

use mls_model::{
    AssetClass, BatchSummary, CanonicalField, CanonicalRecord, CanonicalValue,
    ClassificationOutcome, RowError, RowErrorKind, StatusGroup,
};

fn snapshot() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

fn sold_record(ml_number: &str) -> CanonicalRecord {
    CanonicalRecord {
        closed_type: Some("sold".to_string()),
        close_price: Some(250_000.0),
        city: Some("Tampa".to_string()),
        beds: Some(3),
        ..CanonicalRecord::new(
            snapshot(),
            AssetClass::ResidentialSale,
            ml_number,
            "SLD",
            StatusGroup::Closed,
        )
    }
}

#[test]
fn record_serializes_tags_as_strings() {
    let record = sold_record("T100");
    let json = serde_json::to_value(&record).expect("serialize record");
    assert_eq!(json["asset_class"], "residential_sale");
    assert_eq!(json["status_group"], "closed");
    assert_eq!(json["snapshot_date"], "2025-03-01");
    assert!(json.get("extra").is_none());

    let round: CanonicalRecord = serde_json::from_value(json).expect("deserialize record");
    assert_eq!(round, record);
}

#[test]
fn generic_value_access_follows_schema() {
    let record = sold_record("T100");
    assert_eq!(
        record.value(CanonicalField::MlNumber),
        Some(CanonicalValue::Text("T100".to_string()))
    );
    assert_eq!(
        record.value(CanonicalField::ClosePrice),
        Some(CanonicalValue::Number(250_000.0))
    );
    assert_eq!(record.value(CanonicalField::ListPrice), None);
    assert_eq!(record.value(CanonicalField::Price), None);
    assert_eq!(
        record
            .value(CanonicalField::SnapshotDate)
            .as_ref()
            .map(CanonicalValue::render),
        Some("2025-03-01".to_string())
    );
    assert!(record.prices_are_exclusive());
}

#[test]
fn summary_counts_groups_and_errors() {
    let outcome = ClassificationOutcome {
        dataset: "sales.csv".to_string(),
        asset_class: AssetClass::ResidentialSale,
        snapshot_date: snapshot(),
        input_rows: 3,
        records: vec![sold_record("T100"), sold_record("T101")],
        row_errors: vec![RowError {
            row_index: 2,
            source_identifier: Some("T102".to_string()),
            kind: RowErrorKind::StatusMapping,
            reason: "unmapped".to_string(),
        }],
    };
    let summary = BatchSummary::from_outcomes([&outcome, &outcome]);
    assert_eq!(summary.datasets, 2);
    assert_eq!(summary.input_rows, 6);
    assert_eq!(summary.records, 4);
    assert_eq!(summary.row_errors, 2);
    assert_eq!(summary.by_status_group.get("closed"), Some(&4));
    assert_eq!(summary.by_error_kind.get("status_mapping"), Some(&2));
    assert_eq!(summary.by_asset_class.get("residential_sale"), Some(&4));
}
