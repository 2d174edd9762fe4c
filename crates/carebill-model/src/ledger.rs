//! Monthly ledger rows.
//!
//! A ledger row is one resident's charge state within one facility for
//! one month. Every charge field is optional: an absent field has never
//! been billed and renders blank, while `Some(0)` was billed at zero.
//! Both read as zero in arithmetic, but absence must survive
//! pass-through, so the distinction is kept in the type.

use serde::{Deserialize, Serialize};

use crate::welfare::parse_welfare_cap;

/// One resident's per-month charge record on the facility ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerRow {
    pub room: String,
    pub name: String,
    /// Outstanding installment balance carried in from prior months.
    pub installment_balance: Option<i64>,
    // Fixed charges, billed one month ahead.
    pub rent: Option<i64>,
    pub management: Option<i64>,
    pub common_area: Option<i64>,
    pub water: Option<i64>,
    pub utility: Option<i64>,
    // Variable charges computed by the engine.
    pub meal: Option<i64>,
    pub adjustment: Option<i64>,
    pub durable_goods: Option<i64>,
    pub consumables: Option<i64>,
    /// This month's installment payment against the balance.
    pub installment: Option<i64>,
    // Hand-entered charges, never derived by the engine.
    pub office_fee: Option<i64>,
    pub day_service: Option<i64>,
    pub equipment: Option<i64>,
    pub pharmacy: Option<i64>,
    pub doctor: Option<i64>,
    pub support: Option<i64>,
    pub other: Option<i64>,
    // Aggregates.
    pub subtotal: Option<i64>,
    pub care_copay: Option<i64>,
    pub nurse_copay: Option<i64>,
    pub total: Option<i64>,
    pub notes: String,
    pub remaining_balance: Option<i64>,
}

/// Reads an optional charge as zero for arithmetic.
#[must_use]
pub fn charge(value: Option<i64>) -> i64 {
    value.unwrap_or(0)
}

impl LedgerRow {
    /// A row is vacant when no one is named on it or nothing was billed.
    #[must_use]
    pub fn is_vacant(&self) -> bool {
        self.name.is_empty() || charge(self.total) == 0
    }

    #[must_use]
    pub fn has_installment(&self) -> bool {
        charge(self.installment_balance) > 0
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

    /// True when none of the five fixed-charge fields is configured.
    #[must_use]
    pub fn fixed_charges_absent(&self) -> bool {
        self.rent.is_none()
            && self.management.is_none()
            && self.common_area.is_none()
            && self.water.is_none()
            && self.utility.is_none()
    }

    /// Welfare cap recorded in the notes column, if any.
    #[must_use]
    pub fn welfare_limit(&self) -> Option<i64> {
        parse_welfare_cap(&self.notes)
    }
}
