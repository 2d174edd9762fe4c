//! Upstream data-source collaborator: CSV readers that turn flat
//! exports of the three source logs plus the roster into model
//! entities. Spreadsheet cell-grid parsing happens outside this
//! system; these readers consume one-record-per-row CSV.
//!
//! Every reader comes in two flavors: a `parse_*` function over any
//! `io::Read` (unit-testable on string literals) and a `read_*`
//! wrapper that opens a path and attaches it to errors.

mod ledger;
mod meal;
mod roster;
mod usage;

pub use ledger::{LedgerLoad, list_ledger_sheets, load_ledger, parse_ledger_sheet, read_ledger_sheet};
pub use meal::{parse_meal_attendance, read_meal_attendance};
pub use roster::{parse_roster, read_roster};
pub use usage::{parse_usage_log, read_usage_log};

use tracing::warn;

/// Parses a space-separated day list, dropping duplicates and days
/// outside `[1, days_in_month]` with a warning.
pub(crate) fn parse_day_list(raw: &str, days_in_month: u32, context: &str) -> Vec<u32> {
    let mut days = Vec::new();
    for token in raw.split_whitespace() {
        match token.parse::<u32>() {
            Ok(day) if (1..=days_in_month).contains(&day) => {
                if !days.contains(&day) {
                    days.push(day);
                }
            }
            _ => warn!(token, context, "dropping invalid day-of-month entry"),
        }
    }
    days.sort_unstable();
    days
}

/// Parses an optional integer cell: empty means absent, `0` means
/// billed at zero.
pub(crate) fn parse_opt_amount(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}
