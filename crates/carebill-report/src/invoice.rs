//! Per-resident invoice documents.
//!
//! Fixed charges are billed one month ahead, the computed variable
//! charges cover the billing month itself, and the hand-entered and
//! copay lines settle the month before. Each line carries its period so
//! the mixed billing windows stay auditable.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use carebill_model::BillingResult;

use crate::common::{DocumentContext, format_japanese_date, format_yen};

/// Renders one resident's invoice as plain text.
#[must_use]
pub fn render_invoice(result: &BillingResult, ctx: &DocumentContext) -> String {
    let (next_month, current_month, prev_month) = ctx.month.surrounding_month_numbers();
    let mut doc = String::new();
    doc.push_str("御請求書\n\n");
    doc.push_str(&format!("{}\n", ctx.facility_name));
    doc.push_str(&format!("{}号室 {} 様\n\n", result.room, result.name));
    doc.push_str(&format!(
        "令和{}年{}月分\n",
        ctx.month.era_year(),
        ctx.month.month
    ));
    doc.push_str(&format!("発行日: {}\n", format_japanese_date(ctx.issue_date)));
    doc.push_str(&format!(
        "お支払期限: {}\n\n",
        format_japanese_date(ctx.primary_due_date())
    ));

    push_line(&mut doc, "家賃", next_month, result.rent);
    push_line(&mut doc, "管理費", next_month, result.management);
    push_line(&mut doc, "共益費", next_month, result.common_area);
    push_line(&mut doc, "水道代", next_month, result.water);
    push_line(&mut doc, "光熱費", next_month, result.utility);

    push_line(&mut doc, "食事代", current_month, result.meal);
    if result.adjustment != 0 {
        push_line(&mut doc, "調整金", current_month, Some(result.adjustment));
    }
    push_line(&mut doc, "紙おむつ代", current_month, result.durable_goods);
    push_line(&mut doc, "日用品費", current_month, result.consumables);
    push_line(&mut doc, "分割金", current_month, result.installment);

    push_line(&mut doc, "事務手数料", prev_month, result.office_fee);
    push_line(&mut doc, "デイサービス利用料", prev_month, result.day_service);
    push_line(&mut doc, "福祉用具貸与料", prev_month, result.equipment);
    push_line(&mut doc, "薬局代", prev_month, result.pharmacy);
    push_line(&mut doc, "医師訪問診療費", prev_month, result.doctor);
    push_line(&mut doc, "生活支援費", prev_month, result.support);
    push_line(&mut doc, "その他", prev_month, result.other);

    doc.push_str(&format!("小計: {}円\n", format_yen(result.subtotal)));
    push_line(&mut doc, "介護保険負担金", prev_month, result.care_copay);
    push_line(&mut doc, "訪問看護負担金", prev_month, result.nurse_copay);
    doc.push_str(&format!("合計金額: {}円\n", format_yen(result.total)));
    doc
}

fn push_line(doc: &mut String, label: &str, month: u32, amount: Option<i64>) {
    if let Some(amount) = amount {
        doc.push_str(&format!("{label}（{month}月分）: {}円\n", format_yen(amount)));
    }
}

/// Writes one invoice file per billed resident; vacant rows get none.
pub fn write_invoices(
    dir: &Path,
    results: &[BillingResult],
    ctx: &DocumentContext,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for result in results.iter().filter(|result| !result.is_vacant()) {
        let path = dir.join(format!("請求書_{}.txt", result.room));
        std::fs::write(&path, render_invoice(result, ctx))
            .with_context(|| format!("write invoice {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}
