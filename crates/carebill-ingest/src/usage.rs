//! Shared usage-log reader.
//!
//! The upstream export keeps one row per billable set. A person with
//! two sets spans two rows, and the identifying columns are only filled
//! on the first one; continuation rows carry a blank name and attach to
//! the record above them.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use tracing::warn;

use carebill_model::{UsageRecord, UsageSetRecord};

use crate::parse_day_list;
use crate::roster::column_index;

/// Parses the usage log CSV. Expected headers: `station`, `user_id`,
/// `name`, `set_type`, `days`; the `days` column holds a
/// space-separated day-of-month list.
pub fn parse_usage_log<R: Read>(reader: R, days_in_month: u32) -> Result<Vec<UsageRecord>> {
    let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = csv_reader.headers().context("usage log headers")?.clone();
    let name_idx = column_index(&headers, "name").context("usage log is missing a name column")?;
    let station_idx = column_index(&headers, "station");
    let user_idx = column_index(&headers, "user_id");
    let set_type_idx = column_index(&headers, "set_type");
    let days_idx = column_index(&headers, "days");

    let cell = |record: &csv::StringRecord, idx: Option<usize>| -> String {
        idx.and_then(|idx| record.get(idx))
            .unwrap_or("")
            .trim()
            .to_string()
    };

    let mut records: Vec<UsageRecord> = Vec::new();
    for record in csv_reader.records() {
        let record = record.context("usage log row")?;
        let name = record.get(name_idx).unwrap_or("").trim().to_string();
        let set = UsageSetRecord {
            set_type: cell(&record, set_type_idx),
            use_days: parse_day_list(&cell(&record, days_idx), days_in_month, "usage"),
        };

        if name.is_empty() {
            // Continuation row: a second set for the person above.
            match records.last_mut() {
                Some(current) => current.sets.push(set),
                None => warn!("dropping continuation row with no preceding usage record"),
            }
            continue;
        }

        records.push(UsageRecord {
            station_id: cell(&record, station_idx),
            user_id: cell(&record, user_idx),
            name,
            sets: vec![set],
        });
    }
    Ok(records)
}

pub fn read_usage_log(path: &Path, days_in_month: u32) -> Result<Vec<UsageRecord>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("open usage log {}", path.display()))?;
    parse_usage_log(file, days_in_month)
        .with_context(|| format!("parse usage log {}", path.display()))
}
