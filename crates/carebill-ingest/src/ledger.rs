//! Monthly ledger sheet reading with prior-month fallback.
//!
//! A facility keeps one CSV per month in its ledger directory, named by
//! the era label (`R8.1.csv`). When the target month's sheet does not
//! exist yet and fallback is allowed, the nearest prior month seeds the
//! new month and the caller must apply rollover semantics.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use tracing::info;

use carebill_model::{BillingError, BillingMonth, LedgerRow, normalize_room};

/// Outcome of resolving and reading a facility's ledger for a month.
#[derive(Debug)]
pub struct LedgerLoad {
    pub rows: Vec<LedgerRow>,
    /// Month whose sheet was actually read.
    pub source_month: BillingMonth,
    /// True when a prior month seeded the target month, which obliges
    /// the caller to run the rollover branch of the aggregator.
    pub is_rollover: bool,
}

/// Parses one ledger sheet. Columns are matched by header name against
/// the `LedgerRow` field names; missing columns read as absent.
pub fn parse_ledger_sheet<R: Read>(reader: R) -> Result<Vec<LedgerRow>> {
    let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut rows = Vec::new();
    for record in csv_reader.deserialize::<LedgerRow>() {
        let mut row: LedgerRow = record.context("ledger row")?;
        row.room = normalize_room(&row.room);
        row.name = row.name.trim().to_string();
        if row.room.is_empty() {
            continue;
        }
        rows.push(row);
    }
    Ok(rows)
}

pub fn read_ledger_sheet(path: &Path) -> Result<Vec<LedgerRow>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("open ledger sheet {}", path.display()))?;
    parse_ledger_sheet(file).with_context(|| format!("parse ledger sheet {}", path.display()))
}

/// Lists the ledger sheets in a facility directory, sorted by month.
pub fn list_ledger_sheets(dir: &Path) -> Result<Vec<(BillingMonth, PathBuf)>> {
    let mut sheets = Vec::new();
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("read ledger directory {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("csv") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        if let Ok(month) = BillingMonth::parse(stem) {
            sheets.push((month, path));
        }
    }
    sheets.sort_by_key(|(month, _)| *month);
    Ok(sheets)
}

/// Resolves the sheet for `month`, falling back to the nearest prior
/// month when allowed. No sheet at all is fatal for this facility and
/// the error names the sheets that do exist.
pub fn load_ledger(dir: &Path, month: BillingMonth, allow_fallback: bool) -> Result<LedgerLoad> {
    let sheets = list_ledger_sheets(dir)?;
    let available: Vec<String> = sheets
        .iter()
        .map(|(sheet_month, _)| sheet_month.era_label())
        .collect();

    if let Some((_, path)) = sheets.iter().find(|(sheet_month, _)| *sheet_month == month) {
        return Ok(LedgerLoad {
            rows: read_ledger_sheet(path)?,
            source_month: month,
            is_rollover: false,
        });
    }

    if allow_fallback
        && let Some((prior_month, path)) = sheets
            .iter()
            .filter(|(sheet_month, _)| *sheet_month < month)
            .next_back()
    {
        info!(
            target_month = %month.era_label(),
            seed_month = %prior_month.era_label(),
            "ledger sheet missing, seeding from prior month"
        );
        return Ok(LedgerLoad {
            rows: read_ledger_sheet(path)?,
            source_month: *prior_month,
            is_rollover: true,
        });
    }

    Err(BillingError::MissingLedgerSheet {
        label: month.era_label(),
        available,
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cells_stay_absent_and_zero_stays_zero() {
        let data = "\
room,name,rent,meal,total,notes\n\
608,岡村三男,40000,,62000,\n\
703,安藤静子,40000,0,90000,9〇\n";
        let rows = parse_ledger_sheet(data.as_bytes()).expect("ledger");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].meal, None);
        assert_eq!(rows[1].meal, Some(0));
        assert_eq!(rows[1].welfare_limit(), Some(90_000));
    }

    #[test]
    fn rows_without_a_room_are_skipped() {
        let data = "room,name,rent\n,孤立した名前,100\n913,加藤敬子,40000\n";
        let rows = parse_ledger_sheet(data.as_bytes()).expect("ledger");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].room, "913");
    }
}
