use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::Table;

use carebill_cli::pipeline::{RunOptions, run_billing};
use carebill_cli::types::RunResult;
use carebill_model::{BillingConfig, BillingMonth};

use crate::cli::{FacilitiesArgs, RunArgs};
use crate::summary::apply_table_style;

pub fn run_facilities(args: &FacilitiesArgs) -> Result<()> {
    let config = BillingConfig::from_path(&args.config).context("load config")?;
    let mut table = Table::new();
    table.set_header(vec!["Key", "Facility", "Directory"]);
    apply_table_style(&mut table);
    for (key, facility) in &config.facilities {
        table.add_row(vec![
            key.clone(),
            facility.display_name.clone(),
            facility.dir.clone(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_month(args: &RunArgs) -> Result<RunResult> {
    let config = BillingConfig::from_path(&args.config).context("load config")?;
    let month = BillingMonth::parse(&args.month)?;
    let issue_date = match &args.issue_date {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("issue date '{raw}': expected YYYY-MM-DD"))?,
        None => month.default_issue_date(),
    };
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.input.base_dir.join("output"));
    let options = RunOptions {
        allow_fallback: args.allow_fallback,
        skip_documents: args.skip_documents,
        dry_run: args.dry_run,
    };
    run_billing(&config, month, issue_date, &output_dir, options)
}
