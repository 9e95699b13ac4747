use std::fs;

use chrono::NaiveDate;
use mls_contract::Contract;
use mls_model::{
    AssetClass, CanonicalRecord, ClassificationOutcome, RowError, RowErrorKind, StatusGroup,
};
use mls_output::{
    BatchReport, OutputError, REPORT_FILE, REPORT_SCHEMA, write_batch_report_json,
    write_records_csv,
};

const CONTRACT: &str = r#"
[contract]
name = "metro-mls"
version = "2025.1"

[signatures]
rental = ["Lease Term"]

[status_rules.residential_sale]
ACT = "listing"

[status_rules.rental]
LSE = "closed:leased"
"#;

fn snapshot() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

fn outcome() -> ClassificationOutcome {
    let mut record = CanonicalRecord::new(
        snapshot(),
        AssetClass::Rental,
        "R1",
        "LSE",
        StatusGroup::Closed,
    );
    record.closed_type = Some("leased".to_string());
    record.close_price = Some(2_100.0);
    ClassificationOutcome {
        dataset: "rentals.csv".to_string(),
        asset_class: AssetClass::Rental,
        snapshot_date: snapshot(),
        input_rows: 2,
        records: vec![record],
        row_errors: vec![RowError {
            row_index: 1,
            source_identifier: Some("R2".to_string()),
            kind: RowErrorKind::StatusMapping,
            reason: "status `PND` has no mapping for asset class rental".to_string(),
        }],
    }
}

#[test]
fn batch_report_is_written_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let contract = Contract::from_toml_str(CONTRACT).unwrap();
    let report = BatchReport::new(&contract, snapshot(), &[outcome()]);
    assert!(report.has_row_errors());

    let out = dir.path().join("reports");
    let path = write_batch_report_json(&out, &report).unwrap();
    assert_eq!(path, out.join(REPORT_FILE));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["schema"], REPORT_SCHEMA);
    assert_eq!(json["schema_version"], 1);
    assert_eq!(json["contract"]["name"], "metro-mls");
    assert_eq!(json["contract"]["version"], "2025.1");
    assert_eq!(json["contract"]["fingerprint"], contract.fingerprint());
    assert_eq!(json["contract"]["reconciliation"], "alias_lookup");
    assert_eq!(json["snapshot_date"], "2025-03-01");

    let file = &json["files"][0];
    assert_eq!(file["dataset"], "rentals.csv");
    assert_eq!(file["asset_class"], "rental");
    assert_eq!(file["records"], 1);
    assert_eq!(file["row_errors"][0]["row_index"], 1);
    assert_eq!(file["row_errors"][0]["kind"], "status_mapping");

    assert_eq!(json["summary"]["records"], 1);
    assert_eq!(json["summary"]["row_errors"], 1);
    assert_eq!(json["summary"]["by_status_group"]["closed"], 1);
}

#[test]
fn records_csv_round_trips_through_the_csv_reader() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("listings.csv");
    write_records_csv(&path, &outcome().records).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    let row = reader.records().next().unwrap().unwrap();
    let cell = |name: &str| {
        let idx = headers.iter().position(|h| h == name).unwrap();
        row.get(idx).unwrap().to_string()
    };
    assert_eq!(cell("ml_number"), "R1");
    assert_eq!(cell("asset_class"), "rental");
    assert_eq!(cell("closed_type"), "leased");
    assert_eq!(cell("close_price"), "2100");
    assert_eq!(cell("list_price"), "");
    assert!(headers.iter().all(|h| h != "price"));
}

#[test]
fn writing_into_a_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let error = write_records_csv(&dir.path().join("nope/listings.csv"), &[]).unwrap_err();
    assert!(matches!(error, OutputError::Write { .. }));
}
