use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use carebill_model::{RosterEntry, normalize_room};

/// Parses a roster CSV (`room,name`). Rows without a room are skipped;
/// an empty name marks a vacant unit and is kept.
pub fn parse_roster<R: Read>(reader: R) -> Result<Vec<RosterEntry>> {
    let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = csv_reader.headers().context("roster headers")?.clone();
    let room_idx = column_index(&headers, "room").context("roster is missing a room column")?;
    let name_idx = column_index(&headers, "name");

    let mut entries = Vec::new();
    for record in csv_reader.records() {
        let record = record.context("roster row")?;
        let room = normalize_room(record.get(room_idx).unwrap_or(""));
        if room.is_empty() {
            continue;
        }
        let name = name_idx
            .and_then(|idx| record.get(idx))
            .unwrap_or("")
            .trim()
            .to_string();
        entries.push(RosterEntry { room, name });
    }
    Ok(entries)
}

pub fn read_roster(path: &Path) -> Result<Vec<RosterEntry>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("open roster {}", path.display()))?;
    parse_roster(file).with_context(|| format!("parse roster {}", path.display()))
}

pub(crate) fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(name))
}
