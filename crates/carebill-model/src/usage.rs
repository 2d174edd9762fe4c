//! Supply-usage records from the shared monthly usage log.
//!
//! Usage records identify the resident by free-text name only — there
//! is no room column — so they have to be reconciled against each
//! facility's roster by name. One person contributes one or two set
//! records (e.g. a diaper set plus a daily-supplies set).

use serde::{Deserialize, Serialize};

/// Set-type codes billed into the durable-goods bucket.
///
/// The codes come straight from the upstream log and mix full-width and
/// ASCII letters; they are matched verbatim, without normalization.
pub const DURABLE_GOODS_SET_TYPES: &[&str] = &[
    "Ａ", "Ｂ", "Ｃ", "Ｄ", "Ｅ", "Ｆ", "Ｇ", "a", "b", "c", "d",
];

/// Set-type codes billed into the consumables bucket.
pub const CONSUMABLE_SET_TYPES: &[&str] = &["用", "福", "ふ", "に"];

/// The two billing buckets a usage set can land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageBucket {
    DurableGoods,
    Consumables,
}

/// One billable set within a usage record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageSetRecord {
    pub set_type: String,
    pub use_days: Vec<u32>,
}

impl UsageSetRecord {
    #[must_use]
    pub fn day_count(&self) -> i64 {
        self.use_days.len() as i64
    }

    /// Classifies the set by the static category table; a code absent
    /// from both tables is unclassified and bills into neither bucket.
    #[must_use]
    pub fn bucket(&self) -> Option<UsageBucket> {
        let code = self.set_type.as_str();
        if DURABLE_GOODS_SET_TYPES.contains(&code) {
            Some(UsageBucket::DurableGoods)
        } else if CONSUMABLE_SET_TYPES.contains(&code) {
            Some(UsageBucket::Consumables)
        } else {
            None
        }
    }
}

/// One person's entry in the usage log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub station_id: String,
    pub user_id: String,
    pub name: String,
    pub sets: Vec<UsageSetRecord>,
}
