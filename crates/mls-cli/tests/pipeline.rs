use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use mls_cli::pipeline::{BatchOptions, EXIT_ROW_ERRORS, run_batch};
use mls_contract::Contract;
use mls_model::AssetClass;
use tempfile::TempDir;

const CONTRACT: &str = r#"
[contract]
name = "metro-mls"
version = "2025.1"

[signatures]
rental = ["Lease Price", "Lease Term"]
land = ["Lot Size Acres", "Zoning"]

[status_rules.residential_sale]
ACT = "listing"
PND = "pending"
SLD = "closed:sold"

[status_rules.rental]
ACT = "listing"
LSE = "closed:leased"

[status_rules.land]
ACT = "listing"
SLD = "closed:sold"
"#;

const SALES_CSV: &str = "\
MLS #,Status,Current Price,Address
A100,SLD,\"$250,000\",123 Main St
A101,ACT,199000,9 Elm Ave
";

const RENTALS_CSV: &str = "\
MLS #,Status,Lease Price,Lease Term
R1,LSE,1850,12 months
R2,PND,2100,6 months
,ACT,900,12 months
";

fn contract() -> Contract {
    Contract::from_toml_str(CONTRACT).unwrap()
}

fn options(output_dir: &Path) -> BatchOptions {
    BatchOptions {
        snapshot_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        asset_class: None,
        jobs: 2,
        output_dir: output_dir.to_path_buf(),
        dry_run: false,
    }
}

fn input_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).unwrap();
    }
    dir
}

#[test]
fn batch_writes_records_and_report() {
    let inputs = input_dir(&[("sales.csv", SALES_CSV)]);
    let output = TempDir::new().unwrap();
    let output_dir = output.path().join("out");

    let result = run_batch(
        &contract(),
        &[inputs.path().to_path_buf()],
        &options(&output_dir),
    )
    .unwrap();

    assert_eq!(result.files.len(), 1);
    assert_eq!(result.report.summary.records, 2);
    assert!(!result.has_row_errors());
    assert_eq!(result.exit_code(), 0);

    let records_csv = result.records_csv.as_ref().unwrap();
    let report_json = result.report_json.as_ref().unwrap();
    assert!(records_csv.starts_with(&output_dir));
    let csv = fs::read_to_string(records_csv).unwrap();
    assert!(csv.starts_with("snapshot_date,asset_class,ml_number"));
    assert!(csv.contains("A100"));
    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(report_json).unwrap()).unwrap();
    assert_eq!(report["contract"]["name"], "metro-mls");
    assert_eq!(report["snapshot_date"], "2025-03-01");
}

#[test]
fn rejected_rows_set_the_row_error_exit_code() {
    let inputs = input_dir(&[("rentals.csv", RENTALS_CSV), ("sales.csv", SALES_CSV)]);
    let output = TempDir::new().unwrap();

    let result = run_batch(
        &contract(),
        &[inputs.path().to_path_buf()],
        &options(output.path()),
    )
    .unwrap();

    assert_eq!(result.outcomes.len(), 2);
    let rentals = &result.outcomes[0];
    assert_eq!(rentals.dataset, "rentals.csv");
    assert_eq!(rentals.asset_class, AssetClass::Rental);
    assert_eq!(rentals.records.len(), 1);
    assert_eq!(rentals.row_errors.len(), 2);
    assert_eq!(result.report.summary.row_errors, 2);
    assert_eq!(result.exit_code(), EXIT_ROW_ERRORS);
}

#[test]
fn dry_run_writes_nothing() {
    let inputs = input_dir(&[("sales.csv", SALES_CSV)]);
    let output = TempDir::new().unwrap();
    let output_dir = output.path().join("out");
    let mut options = options(&output_dir);
    options.dry_run = true;

    let result = run_batch(&contract(), &[inputs.path().to_path_buf()], &options).unwrap();

    assert_eq!(result.report.summary.records, 2);
    assert!(result.records_csv.is_none());
    assert!(result.report_json.is_none());
    assert!(!output_dir.exists());
}

#[test]
fn unknown_forced_class_aborts_the_batch() {
    let inputs = input_dir(&[("sales.csv", SALES_CSV)]);
    let output = TempDir::new().unwrap();
    let output_dir = output.path().join("out");
    let mut options = options(&output_dir);
    options.asset_class = Some(AssetClass::from_tag("commercial"));

    let error = run_batch(&contract(), &[inputs.path().to_path_buf()], &options).unwrap_err();

    assert!(format!("{error:#}").contains("sales.csv"));
    assert!(!output_dir.exists());
}

#[test]
fn empty_input_directory_is_an_error() {
    let inputs = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    let error = run_batch(
        &contract(),
        &[inputs.path().to_path_buf()],
        &options(output.path()),
    )
    .unwrap_err();

    insta::assert_snapshot!(error.to_string(), @"no listing files found in the given inputs");
}
