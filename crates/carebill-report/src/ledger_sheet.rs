//! Updated ledger sheet output.
//!
//! The sheet is written in the same CSV shape the ingest side reads, so
//! this month's output is next month's input. One row per result, in
//! result order, plus a grand-total row over the non-vacant residents.

use std::path::Path;

use anyhow::{Context, Result};

use carebill_model::{BillingResult, LedgerRow, TOTAL_ROW_LABEL, charge};

/// Converts a result back into the ledger-row shape for the sheet.
/// Computed aggregates become present values; the absent-vs-zero state
/// of every pass-through field is preserved.
#[must_use]
pub fn result_to_ledger_row(result: &BillingResult) -> LedgerRow {
    LedgerRow {
        room: result.room.clone(),
        name: result.name.clone(),
        installment_balance: result.installment_balance,
        rent: result.rent,
        management: result.management,
        common_area: result.common_area,
        water: result.water,
        utility: result.utility,
        meal: result.meal,
        adjustment: Some(result.adjustment),
        durable_goods: result.durable_goods,
        consumables: result.consumables,
        installment: result.installment,
        office_fee: result.office_fee,
        day_service: result.day_service,
        equipment: result.equipment,
        pharmacy: result.pharmacy,
        doctor: result.doctor,
        support: result.support,
        other: result.other,
        subtotal: Some(result.subtotal),
        care_copay: result.care_copay,
        nurse_copay: result.nurse_copay,
        total: Some(result.total),
        notes: result.notes.clone(),
        remaining_balance: Some(result.remaining_balance),
    }
}

/// Renders the full sheet as CSV text.
pub fn render_ledger_sheet(results: &[BillingResult]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for result in results {
        writer
            .serialize(result_to_ledger_row(result))
            .context("serialize ledger row")?;
    }
    writer
        .serialize(totals_row(results))
        .context("serialize totals row")?;
    let bytes = writer.into_inner().context("flush ledger sheet")?;
    String::from_utf8(bytes).context("ledger sheet utf-8")
}

pub fn write_ledger_sheet(path: &Path, results: &[BillingResult]) -> Result<()> {
    let sheet = render_ledger_sheet(results)?;
    std::fs::write(path, sheet).with_context(|| format!("write ledger sheet {}", path.display()))
}

fn totals_row(results: &[BillingResult]) -> LedgerRow {
    let mut totals = LedgerRow {
        room: TOTAL_ROW_LABEL.to_string(),
        ..LedgerRow::default()
    };
    let billed = results.iter().filter(|result| !result.is_vacant());
    for result in billed {
        let row = result_to_ledger_row(result);
        for (sum, value) in [
            (&mut totals.installment_balance, row.installment_balance),
            (&mut totals.rent, row.rent),
            (&mut totals.management, row.management),
            (&mut totals.common_area, row.common_area),
            (&mut totals.water, row.water),
            (&mut totals.utility, row.utility),
            (&mut totals.meal, row.meal),
            (&mut totals.adjustment, row.adjustment),
            (&mut totals.durable_goods, row.durable_goods),
            (&mut totals.consumables, row.consumables),
            (&mut totals.installment, row.installment),
            (&mut totals.office_fee, row.office_fee),
            (&mut totals.day_service, row.day_service),
            (&mut totals.equipment, row.equipment),
            (&mut totals.pharmacy, row.pharmacy),
            (&mut totals.doctor, row.doctor),
            (&mut totals.support, row.support),
            (&mut totals.other, row.other),
            (&mut totals.subtotal, row.subtotal),
            (&mut totals.care_copay, row.care_copay),
            (&mut totals.nurse_copay, row.nurse_copay),
            (&mut totals.total, row.total),
            (&mut totals.remaining_balance, row.remaining_balance),
        ] {
            if value.is_some() {
                *sum = Some(charge(*sum) + charge(value));
            }
        }
    }
    totals
}
