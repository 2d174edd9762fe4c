//! Combined statements for residents with copay lines.
//!
//! Sums the primary subtotal and the two copay lines into one document.
//! The primary amount and the care copay share the standard due date;
//! the nurse copay allows the longer window. Residents with no copay at
//! all get no combined statement.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use carebill_model::BillingResult;

use crate::common::{DocumentContext, format_japanese_date, format_yen};

#[must_use]
pub fn render_combined_statement(result: &BillingResult, ctx: &DocumentContext) -> String {
    let primary_due = format_japanese_date(ctx.primary_due_date());
    let nurse_due = format_japanese_date(ctx.nurse_due_date());
    let mut doc = String::new();
    doc.push_str("御請求合算書\n\n");
    doc.push_str(&format!("{}\n", ctx.facility_name));
    doc.push_str(&format!("{}号室 {} 様\n\n", result.room, result.name));
    doc.push_str(&format!(
        "令和{}年{}月分\n\n",
        ctx.month.era_year(),
        ctx.month.month
    ));
    doc.push_str(&format!(
        "利用料金: {}円（期限 {primary_due}）\n",
        format_yen(result.subtotal)
    ));
    if let Some(care) = result.care_copay {
        doc.push_str(&format!(
            "介護保険負担金: {}円（期限 {primary_due}）\n",
            format_yen(care)
        ));
    }
    if let Some(nurse) = result.nurse_copay {
        doc.push_str(&format!(
            "訪問看護負担金: {}円（期限 {nurse_due}）\n",
            format_yen(nurse)
        ));
    }
    doc.push_str(&format!("合計金額: {}円\n", format_yen(result.total)));
    doc
}

/// Writes a combined statement for each resident with a nonzero copay.
pub fn write_combined_statements(
    dir: &Path,
    results: &[BillingResult],
    ctx: &DocumentContext,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    let eligible = results
        .iter()
        .filter(|result| !result.is_vacant() && result.has_copay());
    for result in eligible {
        let path = dir.join(format!("合算書_{}.txt", result.room));
        std::fs::write(&path, render_combined_statement(result, ctx))
            .with_context(|| format!("write combined statement {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use carebill_model::{BillingMonth, DueDateOffsets, charge};

    use super::*;

    #[test]
    fn copay_lines_get_their_own_due_dates() {
        let ctx = DocumentContext {
            facility_name: "マンションセレーネ".to_string(),
            month: BillingMonth::new(2026, 1).unwrap(),
            issue_date: NaiveDate::from_ymd_opt(2026, 2, 3).unwrap(),
            offsets: DueDateOffsets::default(),
        };
        let result = BillingResult {
            room: "703".to_string(),
            name: "安藤静子".to_string(),
            subtotal: 84_300,
            care_copay: Some(4_500),
            nurse_copay: Some(1_200),
            total: 90_000,
            ..BillingResult::default()
        };
        let doc = render_combined_statement(&result, &ctx);
        assert!(doc.contains("利用料金: 84,300円（期限 2026年2月23日）"));
        assert!(doc.contains("介護保険負担金: 4,500円（期限 2026年2月23日）"));
        assert!(doc.contains("訪問看護負担金: 1,200円（期限 2026年2月28日）"));
        assert!(doc.contains("合計金額: 90,000円"));
        assert!(charge(result.care_copay) + charge(result.nurse_copay) + result.subtotal == result.total);
    }
}
