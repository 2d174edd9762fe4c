use std::path::PathBuf;

use carebill_calc::UnmatchedUsage;
use carebill_model::BillingMonth;

/// Outcome of one monthly billing run across all facilities.
#[derive(Debug)]
pub struct RunResult {
    pub month: BillingMonth,
    pub output_dir: PathBuf,
    pub facilities: Vec<FacilitySummary>,
    /// Usage records no facility could resolve.
    pub unmatched: Vec<UnmatchedUsage>,
    /// Facility-level failures; each names the facility it excluded.
    pub errors: Vec<String>,
    pub has_errors: bool,
}

/// Per-facility outcome.
#[derive(Debug)]
pub struct FacilitySummary {
    pub key: String,
    pub display_name: String,
    /// Residents billed (non-vacant results).
    pub billed: usize,
    /// Rows on the sheet, vacant placeholders included.
    pub rows: usize,
    pub billed_total: i64,
    /// Residents whose total was pinned to a welfare cap.
    pub capped: usize,
    /// Records this facility's roster could not resolve. Raw material
    /// for the run-wide diagnostic; most of these belong to another
    /// facility.
    pub unmatched: Vec<UnmatchedUsage>,
    pub unknown_set_types: Vec<String>,
    /// True when this month was seeded from a prior sheet.
    pub rollover: bool,
    pub ledger_sheet: Option<PathBuf>,
    pub documents: usize,
}
