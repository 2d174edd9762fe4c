//! The monthly billing run.
//!
//! Input layout under the configured base directory:
//!
//! ```text
//! <base_dir>/
//!   <facility dir>/
//!     roster.csv            room↔name roster
//!     ledger/R8.1.csv       one ledger sheet per month
//!     meal/R8.1.csv         one meal-attendance log per month
//!   usage.csv               shared usage log (path from config)
//! ```
//!
//! Each facility runs in isolation: a facility that fails to load is
//! reported and excluded, the rest of the run continues.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, error, info, info_span, warn};

use carebill_calc::{
    UnmatchedUsage, build_all_results, calc_all_meals, merge_roster_into_ledger,
    reconcile_and_aggregate,
};
use carebill_ingest::{LedgerLoad, load_ledger, read_meal_attendance, read_roster, read_usage_log};
use carebill_match::RoomIndex;
use carebill_model::{BillingConfig, BillingMonth, FacilityConfig, UsageRecord};
use carebill_report::{
    DocumentContext, write_combined_statements, write_invoices, write_ledger_sheet, write_receipts,
};

use crate::types::{FacilitySummary, RunResult};

/// Behavior switches for one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Seed from the nearest prior ledger sheet when the target month
    /// has none, applying rollover semantics.
    pub allow_fallback: bool,
    /// Write only the updated ledger sheet, no per-resident documents.
    pub skip_documents: bool,
    /// Compute and report without writing anything.
    pub dry_run: bool,
}

/// Runs the whole month: shared usage log once, then every facility.
pub fn run_billing(
    config: &BillingConfig,
    month: BillingMonth,
    issue_date: NaiveDate,
    output_dir: &Path,
    options: RunOptions,
) -> Result<RunResult> {
    let usage_records = load_usage_log(config, month)?;

    let mut facilities = Vec::new();
    let mut errors = Vec::new();
    for (key, facility) in &config.facilities {
        let span = info_span!("facility", key = %key);
        let _guard = span.enter();
        match process_facility(
            key,
            facility,
            config,
            month,
            issue_date,
            &usage_records,
            output_dir,
            options,
        ) {
            Ok(summary) => facilities.push(summary),
            Err(err) => {
                error!(facility = %key, error = %format!("{err:#}"), "facility excluded from run");
                errors.push(format!("{key}: {err:#}"));
            }
        }
    }

    let unmatched = run_unmatched(&facilities);
    for record in &unmatched {
        warn!(
            name = %record.name,
            station = %record.station_id,
            "usage record matches no facility"
        );
    }

    let has_errors = !errors.is_empty();
    Ok(RunResult {
        month,
        output_dir: output_dir.to_path_buf(),
        facilities,
        unmatched,
        errors,
        has_errors,
    })
}

/// The usage log is shared, so a record one facility's roster cannot
/// resolve is normal as long as some other facility claimed it. Only a
/// record every facility passed over is genuinely unmatched.
fn run_unmatched(facilities: &[FacilitySummary]) -> Vec<UnmatchedUsage> {
    let Some((first, rest)) = facilities.split_first() else {
        return Vec::new();
    };
    first
        .unmatched
        .iter()
        .filter(|candidate| {
            rest.iter().all(|facility| {
                facility.unmatched.iter().any(|other| {
                    other.station_id == candidate.station_id
                        && other.user_id == candidate.user_id
                        && other.name == candidate.name
                })
            })
        })
        .cloned()
        .collect()
}

/// One facility, end to end: read, merge, reconcile, aggregate, write.
#[allow(clippy::too_many_arguments)]
pub fn process_facility(
    key: &str,
    facility: &FacilityConfig,
    config: &BillingConfig,
    month: BillingMonth,
    issue_date: NaiveDate,
    usage_records: &[UsageRecord],
    output_dir: &Path,
    options: RunOptions,
) -> Result<FacilitySummary> {
    let facility_dir = config.input.base_dir.join(&facility.dir);

    let roster = read_roster(&facility_dir.join("roster.csv"))
        .with_context(|| format!("roster for {key}"))?;
    let LedgerLoad {
        rows,
        source_month,
        is_rollover,
    } = load_ledger(&facility_dir.join("ledger"), month, options.allow_fallback)
        .with_context(|| format!("ledger for {key}"))?;
    if is_rollover {
        info!(
            facility = %key,
            seed = %source_month.era_label(),
            "rolling the ledger forward into a new month"
        );
    }

    let ledger = merge_roster_into_ledger(&roster, &rows, &config.fixed_charges);

    let meal_path = facility_dir
        .join("meal")
        .join(format!("{}.csv", month.era_label()));
    let meal_records = if meal_path.is_file() {
        read_meal_attendance(&meal_path, month.days_in_month())?
    } else {
        warn!(facility = %key, path = %meal_path.display(), "no meal-attendance log, billing no meals");
        Vec::new()
    };
    let meal_amounts = calc_all_meals(&meal_records, &config.meal_prices);

    let index = RoomIndex::new(
        ledger
            .iter()
            .map(|row| (row.room.clone(), row.name.clone())),
    );
    let reconciled = reconcile_and_aggregate(usage_records, &index, config);
    for unmatched in &reconciled.unmatched {
        debug!(
            facility = %key,
            name = %unmatched.name,
            station = %unmatched.station_id,
            "usage record matches no resident here"
        );
    }

    let results = build_all_results(
        &ledger,
        &meal_amounts,
        &reconciled.by_room,
        config,
        is_rollover,
    );
    let billed = results.iter().filter(|result| !result.is_vacant()).count();
    let billed_total: i64 = results
        .iter()
        .filter(|result| !result.is_vacant())
        .map(|result| result.total)
        .sum();
    let capped = results
        .iter()
        .filter(|result| !result.is_vacant() && result.welfare_limit.is_some())
        .count();
    info!(
        facility = %key,
        residents = billed,
        total = billed_total,
        capped,
        unmatched = reconciled.unmatched.len(),
        "facility computed"
    );

    let mut ledger_sheet = None;
    let mut documents = 0;
    if !options.dry_run {
        let facility_out = output_dir.join(key);
        std::fs::create_dir_all(&facility_out)
            .with_context(|| format!("create output dir {}", facility_out.display()))?;

        let sheet_path = facility_out.join(format!("{}.csv", month.era_label()));
        write_ledger_sheet(&sheet_path, &results)?;
        ledger_sheet = Some(sheet_path);

        if !options.skip_documents {
            let ctx = DocumentContext {
                facility_name: facility.display_name.clone(),
                month,
                issue_date,
                offsets: config.due_date_offsets,
            };
            documents += write_invoices(&facility_out, &results, &ctx)?.len();
            documents += write_receipts(&facility_out, &results, &ctx)?.len();
            documents += write_combined_statements(&facility_out, &results, &ctx)?.len();
        }
    }

    Ok(FacilitySummary {
        key: key.to_string(),
        display_name: facility.display_name.clone(),
        billed,
        rows: results.len(),
        billed_total,
        capped,
        unmatched: reconciled.unmatched,
        unknown_set_types: reconciled.unknown_set_types,
        rollover: is_rollover,
        ledger_sheet,
        documents,
    })
}

/// Reads the shared usage log. A missing log is recoverable: everything
/// else still bills, with no usage charges this month.
fn load_usage_log(config: &BillingConfig, month: BillingMonth) -> Result<Vec<UsageRecord>> {
    let path = resolve_input(&config.input.base_dir, &config.input.usage_file);
    if !path.is_file() {
        warn!(path = %path.display(), "usage log not found, billing no usage charges");
        return Ok(Vec::new());
    }
    let records = read_usage_log(&path, month.days_in_month())?;
    info!(records = records.len(), "usage log loaded");
    Ok(records)
}

/// Absolute paths pass through; relative ones anchor at the base dir.
fn resolve_input(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
