//! Final per-resident billing results.

use serde::{Deserialize, Serialize};

use crate::ledger::charge;

/// The engine's final output for one resident in one month.
///
/// Superset of the ledger row's charge fields plus the derived
/// aggregates and the resolved welfare cap. Constructed once per
/// resident per run and never mutated afterwards; downstream document
/// renderers consume it as-is. Optional fields keep the ledger's
/// absent-vs-zero distinction; the computed aggregates are always
/// present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingResult {
    pub room: String,
    pub name: String,
    // Fixed charges (next month, prepaid).
    pub rent: Option<i64>,
    pub management: Option<i64>,
    pub common_area: Option<i64>,
    pub water: Option<i64>,
    pub utility: Option<i64>,
    // Variable charges (current month).
    pub meal: Option<i64>,
    pub adjustment: i64,
    pub durable_goods: Option<i64>,
    pub consumables: Option<i64>,
    // Installment plan.
    pub installment_balance: Option<i64>,
    pub installment: Option<i64>,
    // Hand-entered charges (prior month), carried from the ledger.
    pub office_fee: Option<i64>,
    pub day_service: Option<i64>,
    pub equipment: Option<i64>,
    pub pharmacy: Option<i64>,
    pub doctor: Option<i64>,
    pub support: Option<i64>,
    pub other: Option<i64>,
    // Aggregates.
    pub subtotal: i64,
    pub care_copay: Option<i64>,
    pub nurse_copay: Option<i64>,
    pub total: i64,
    pub notes: String,
    pub welfare_limit: Option<i64>,
    pub remaining_balance: i64,
}

impl BillingResult {
    #[must_use]
    pub fn is_vacant(&self) -> bool {
        self.name.is_empty()
    }

    /// Sum of the five fixed-charge fields.
    #[must_use]
    pub fn fixed_total(&self) -> i64 {
        charge(self.rent)
            + charge(self.management)
            + charge(self.common_area)
            + charge(self.water)
            + charge(self.utility)
    }

    /// Sum of the seven hand-entered charge fields.
    #[must_use]
    pub fn hand_entered_total(&self) -> i64 {
        charge(self.office_fee)
            + charge(self.day_service)
            + charge(self.equipment)
            + charge(self.pharmacy)
            + charge(self.doctor)
            + charge(self.support)
            + charge(self.other)
    }

    /// True when either copay line is billed, which gates the combined
    /// statement document.
    #[must_use]
    pub fn has_copay(&self) -> bool {
        charge(self.care_copay) != 0 || charge(self.nurse_copay) != 0
    }
}
