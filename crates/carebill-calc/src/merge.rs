//! Roster-against-ledger merge.

use std::collections::BTreeMap;

use tracing::debug;

use carebill_model::{
    FixedCharges, LedgerRow, RosterEntry, TOTAL_ROW_LABEL, compare_rooms, is_retired_room,
};

/// Reconciles the roster against the existing ledger rows and returns a
/// fresh, sorted collection; neither input is touched.
///
/// - The grand-total pseudo-row is dropped.
/// - Rooms flagged retired on the roster are never inserted.
/// - Vacant roster entries (empty name) are skipped outright, so an
///   empty unit never accrues default charges.
/// - An existing row gets its name forward-filled only when blank, and
///   the default fixed charges only when all five fixed fields are
///   still absent. An already-configured row is never disturbed.
/// - A roster room with no ledger row is appended with the roster name,
///   the default fixed charges, and every other field absent.
/// - Existing ledger rows whose room left the roster are retained.
#[must_use]
pub fn merge_roster_into_ledger(
    roster: &[RosterEntry],
    ledger_rows: &[LedgerRow],
    defaults: &FixedCharges,
) -> Vec<LedgerRow> {
    let mut merged: Vec<LedgerRow> = ledger_rows
        .iter()
        .filter(|row| row.room != TOTAL_ROW_LABEL && row.name != TOTAL_ROW_LABEL)
        .cloned()
        .collect();
    let mut by_room: BTreeMap<String, usize> = merged
        .iter()
        .enumerate()
        .map(|(idx, row)| (row.room.clone(), idx))
        .collect();

    for entry in roster {
        if entry.is_vacant() || is_retired_room(&entry.room) {
            continue;
        }
        match by_room.get(&entry.room) {
            Some(&idx) => {
                let row = &mut merged[idx];
                if row.name.is_empty() && !entry.name.is_empty() {
                    debug!(room = %entry.room, name = %entry.name, "activating placeholder row");
                    row.name = entry.name.clone();
                }
                if row.fixed_charges_absent() {
                    apply_fixed_defaults(row, defaults);
                }
            }
            None => {
                let mut row = LedgerRow {
                    room: entry.room.clone(),
                    name: entry.name.clone(),
                    ..LedgerRow::default()
                };
                apply_fixed_defaults(&mut row, defaults);
                by_room.insert(row.room.clone(), merged.len());
                merged.push(row);
            }
        }
    }

    merged.sort_by(|a, b| compare_rooms(&a.room, &b.room));
    merged
}

fn apply_fixed_defaults(row: &mut LedgerRow, defaults: &FixedCharges) {
    row.rent = defaults.rent;
    row.management = defaults.management;
    row.common_area = defaults.common_area;
    row.water = defaults.water;
    row.utility = defaults.utility;
}
