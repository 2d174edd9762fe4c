//! Shared document formatting helpers.

use chrono::{Datelike, NaiveDate};

use carebill_model::{BillingMonth, DueDateOffsets, due_date};

/// Everything the per-resident documents need besides the result
/// itself.
#[derive(Debug, Clone)]
pub struct DocumentContext {
    /// Facility name as printed on documents.
    pub facility_name: String,
    pub month: BillingMonth,
    pub issue_date: NaiveDate,
    pub offsets: DueDateOffsets,
}

impl DocumentContext {
    /// Deadline shared by the invoice and the care copay line.
    #[must_use]
    pub fn primary_due_date(&self) -> NaiveDate {
        due_date(self.issue_date, self.offsets.primary_days)
    }

    /// Later deadline for the nurse copay line.
    #[must_use]
    pub fn nurse_due_date(&self) -> NaiveDate {
        due_date(self.issue_date, self.offsets.nurse_days)
    }
}

/// Groups a yen amount with comma separators; negatives keep the sign
/// in front.
#[must_use]
pub fn format_yen(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// `2026年2月3日`.
#[must_use]
pub fn format_japanese_date(date: NaiveDate) -> String {
    format!("{}年{}月{}日", date.year(), date.month(), date.day())
}
