use std::num::NonZero;

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use tracing::info;

use mls_cli::pipeline::{BatchOptions, BatchResult, run_batch};
use mls_contract::{Contract, ContractReport};
use mls_model::{AssetClass, CanonicalField};

use crate::cli::{ClassifyArgs, ContractCheckArgs};
use crate::summary::apply_table_style;

pub fn run_fields() {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Kind", "Role", "Mandatory", "Built-in aliases"]);
    apply_table_style(&mut table);
    for field in CanonicalField::all() {
        let aliases = if field.aliases().is_empty() {
            "-".to_string()
        } else {
            field.aliases().join(", ")
        };
        table.add_row(vec![
            field.name().to_string(),
            field.kind().as_str().to_string(),
            field.role().as_str().to_string(),
            if field.is_mandatory() { "yes" } else { "" }.to_string(),
            aliases,
        ]);
    }
    println!("{table}");
}

pub fn run_classify(args: &ClassifyArgs) -> Result<BatchResult> {
    let contract = Contract::load(&args.contract)
        .with_context(|| format!("load contract {}", args.contract.display()))?;
    info!(
        contract = %contract.name(),
        fingerprint = %contract.short_fingerprint(),
        reconciliation = %contract.reconciliation(),
        "contract loaded"
    );

    let asset_class = match &args.asset_class {
        Some(tag) if tag.trim().is_empty() => bail!("--asset-class must not be empty"),
        Some(tag) => Some(AssetClass::from_tag(tag)),
        None => None,
    };
    let jobs = match args.jobs {
        Some(0) => bail!("--jobs must be at least 1"),
        Some(jobs) => jobs,
        None => std::thread::available_parallelism().map_or(1, NonZero::get),
    };
    let options = BatchOptions {
        snapshot_date: args
            .snapshot_date
            .unwrap_or_else(|| chrono::Local::now().date_naive()),
        asset_class,
        jobs,
        output_dir: args.output_dir.clone(),
        dry_run: args.dry_run,
    };
    run_batch(&contract, &args.inputs, &options)
}

pub fn run_contract_check(args: &ContractCheckArgs) -> Result<ContractReport> {
    let contract = Contract::load(&args.path)
        .with_context(|| format!("load contract {}", args.path.display()))?;
    let report = contract.check();
    info!(
        contract = %report.name,
        findings = report.findings.len(),
        "contract checked"
    );
    if args.json {
        let json = serde_json::to_string_pretty(&report).context("serialize contract report")?;
        println!("{json}");
    }
    Ok(report)
}
