use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use mls_cli::logging::redact_value;
use mls_cli::pipeline::BatchResult;
use mls_contract::{ContractReport, FindingKind};
use mls_model::RowErrorKind;

/// Row errors listed individually; the rest are only counted.
const MAX_ROW_ERRORS_SHOWN: usize = 50;

pub fn print_summary(result: &BatchResult) {
    let contract = &result.report.contract;
    match &contract.version {
        Some(version) => println!(
            "Contract: {} {} ({})",
            contract.name,
            version,
            short(&contract.fingerprint)
        ),
        None => println!("Contract: {} ({})", contract.name, short(&contract.fingerprint)),
    }
    println!("Snapshot date: {}", result.report.snapshot_date);
    match (&result.records_csv, &result.report_json) {
        (Some(records), Some(report)) => {
            println!("Records: {}", records.display());
            println!("Batch report: {}", report.display());
        }
        _ => println!("Output: dry run, nothing written"),
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Asset class"),
        header_cell("Rows"),
        header_cell("Records"),
        header_cell("Row errors"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for file in &result.report.files {
        table.add_row(vec![
            Cell::new(&file.dataset).fg(Color::Blue),
            Cell::new(file.asset_class.as_str()),
            Cell::new(file.input_rows),
            Cell::new(file.records),
            count_cell(file.row_errors.len(), Color::Red),
        ]);
    }
    let summary = &result.report.summary;
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell(format!("{} file(s)", summary.datasets)),
        Cell::new(summary.input_rows).add_attribute(Attribute::Bold),
        Cell::new(summary.records).add_attribute(Attribute::Bold),
        count_cell(summary.row_errors, Color::Red).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    print_status_groups(result);
    print_row_errors(result);
}

fn print_status_groups(result: &BatchResult) {
    let groups = &result.report.summary.by_status_group;
    if groups.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Status group"), header_cell("Records")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (group, count) in groups {
        table.add_row(vec![Cell::new(group), Cell::new(count)]);
    }
    println!();
    println!("Status groups:");
    println!("{table}");
}

fn print_row_errors(result: &BatchResult) {
    let total = result.report.summary.row_errors;
    if total == 0 {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Row"),
        header_cell("Kind"),
        header_cell("ML number"),
        header_cell("Reason"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    let errors = result
        .report
        .files
        .iter()
        .flat_map(|file| file.row_errors.iter().map(move |error| (&file.dataset, error)));
    for (dataset, error) in errors.take(MAX_ROW_ERRORS_SHOWN) {
        let ml_number = match error.source_identifier.as_deref() {
            Some(value) => Cell::new(redact_value(value)),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(dataset),
            Cell::new(error.row_index),
            kind_cell(error.kind),
            ml_number,
            Cell::new(&error.reason),
        ]);
    }
    println!();
    println!("Row errors:");
    println!("{table}");
    if total > MAX_ROW_ERRORS_SHOWN {
        println!(
            "... {} more; see the batch report for the full list",
            total - MAX_ROW_ERRORS_SHOWN
        );
    }
}

pub fn print_contract_report(report: &ContractReport) {
    match &report.version {
        Some(version) => println!("Contract: {} {}", report.name, version),
        None => println!("Contract: {}", report.name),
    }
    println!("Fingerprint: {}", report.fingerprint);
    println!("Reconciliation: {}", report.reconciliation);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Asset class"),
        header_cell("Signature columns"),
        header_cell("Status rules"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for class in &report.asset_classes {
        table.add_row(vec![
            Cell::new(&class.asset_class).fg(Color::Blue),
            count_cell(class.signature_columns, Color::Reset),
            count_cell(class.status_rules, Color::Reset),
        ]);
    }
    println!("{table}");

    if !report.has_findings() {
        println!("No findings.");
        return;
    }
    let mut findings = Table::new();
    findings.set_header(vec![
        header_cell("Finding"),
        header_cell("Asset class"),
        header_cell("Message"),
    ]);
    apply_summary_table_style(&mut findings);
    for finding in &report.findings {
        findings.add_row(vec![
            finding_cell(finding.kind),
            match &finding.asset_class {
                Some(class) => Cell::new(class),
                None => dim_cell("-"),
            },
            Cell::new(&finding.message),
        ]);
    }
    println!();
    println!("Findings:");
    println!("{findings}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn kind_cell(kind: RowErrorKind) -> Cell {
    match kind {
        RowErrorKind::StatusMapping => Cell::new("STATUS").fg(Color::Red),
        RowErrorKind::MissingKey => Cell::new("KEY").fg(Color::Yellow),
    }
}

fn finding_cell(kind: FindingKind) -> Cell {
    let label = match kind {
        FindingKind::SignatureWithoutStatusRules => "signature without status rules",
        FindingKind::EmptySignature => "empty signature",
        FindingKind::StatusRulesWithoutSignature => "status rules without signature",
        FindingKind::DefaultClassWithoutStatusRules => "fallback class without status rules",
        FindingKind::AmbiguousStatusCase => "ambiguous status case",
        FindingKind::DuplicateAlias => "duplicate alias",
        FindingKind::RedundantAlias => "redundant alias",
        FindingKind::IgnoredSection => "ignored section",
    };
    Cell::new(label).fg(Color::Yellow)
}

fn short(fingerprint: &str) -> &str {
    fingerprint.get(..12).unwrap_or(fingerprint)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
