//! Per-resident receipt documents: the single total plus boilerplate.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use carebill_model::BillingResult;

use crate::common::{DocumentContext, format_japanese_date, format_yen};

#[must_use]
pub fn render_receipt(result: &BillingResult, ctx: &DocumentContext) -> String {
    format!(
        "領収書\n\n{facility}\n{room}号室 {name} 様\n\n令和{era_year}年{month}月分\n\
         金額: {total}円\n\n上記の金額を正に領収いたしました。\n{issue}\n",
        facility = ctx.facility_name,
        room = result.room,
        name = result.name,
        era_year = ctx.month.era_year(),
        month = ctx.month.month,
        total = format_yen(result.total),
        issue = format_japanese_date(ctx.issue_date),
    )
}

/// Writes one receipt per billed resident.
pub fn write_receipts(
    dir: &Path,
    results: &[BillingResult],
    ctx: &DocumentContext,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for result in results.iter().filter(|result| !result.is_vacant()) {
        let path = dir.join(format!("領収書_{}.txt", result.room));
        std::fs::write(&path, render_receipt(result, ctx))
            .with_context(|| format!("write receipt {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}
