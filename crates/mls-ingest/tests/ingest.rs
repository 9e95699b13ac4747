use std::fs;
use std::path::{Path, PathBuf};

use mls_ingest::{IngestError, collect_inputs, discover_listing_files, read_listing_file};
use mls_model::RawValue;

fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, "MLS #,Status\nA1,ACT\n").expect("write file");
    path
}

#[test]
fn reads_csv_exports_by_extension() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("metro_sales.CSV");
    fs::write(
        &path,
        "\u{feff}MLS #,Status,Current Price,Close Date\n\
         A100,SLD,\"$250,000\",02/14/2025\n\
         ,,,\n\
         A101,ACT,,\n",
    )
    .expect("write csv");

    let table = read_listing_file(&path).expect("read csv");
    assert_eq!(table.name, "metro_sales.CSV");
    assert_eq!(table.columns(), ["MLS #", "Status", "Current Price", "Close Date"]);
    assert_eq!(table.row_count(), 2);

    let sold = table.row(0).expect("row");
    assert_eq!(sold.get("Current Price"), Some(&RawValue::text("$250,000")));
    let active = table.row(1).expect("row");
    assert_eq!(active.get("Close Date"), Some(&RawValue::Null));
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = touch(dir.path(), "notes.txt");
    let error = read_listing_file(&path).unwrap_err();
    assert!(matches!(error, IngestError::UnsupportedFormat { .. }));
}

#[test]
fn missing_csv_is_a_read_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let error = read_listing_file(&dir.path().join("gone.csv")).unwrap_err();
    assert!(matches!(error, IngestError::FileRead { .. }));
}

#[test]
fn unreadable_workbook_is_a_workbook_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("broken.xlsx");
    fs::write(&path, "not a zip archive").expect("write file");
    let error = read_listing_file(&path).unwrap_err();
    assert!(matches!(error, IngestError::Workbook { .. }));
}

#[test]
fn discovers_supported_files_in_name_order() {
    let dir = tempfile::tempdir().expect("temp dir");
    touch(dir.path(), "b_rentals.csv");
    touch(dir.path(), "a_land.xlsx");
    touch(dir.path(), "README.md");
    touch(dir.path(), "c_sales.ods");
    fs::create_dir(dir.path().join("archive.csv")).expect("create dir");

    let files = discover_listing_files(dir.path()).expect("discover");
    let names: Vec<String> = files
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["a_land.xlsx", "b_rentals.csv", "c_sales.ods"]);
}

#[test]
fn discovery_requires_a_directory() {
    let dir = tempfile::tempdir().expect("temp dir");
    let file = touch(dir.path(), "listings.csv");
    let error = discover_listing_files(&file).unwrap_err();
    assert!(matches!(error, IngestError::DirectoryNotFound { .. }));
}

#[test]
fn inputs_expand_directories_and_keep_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    let folder = dir.path().join("exports");
    fs::create_dir(&folder).expect("create dir");
    let inner = touch(&folder, "rentals.csv");
    let outer = touch(dir.path(), "sales.csv");

    let files = collect_inputs(&[outer.clone(), folder]).expect("collect");
    assert_eq!(files, [outer, inner]);
}
