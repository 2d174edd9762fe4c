//! Usage-record pricing and name-based reconciliation.

use std::collections::BTreeMap;

use tracing::warn;

use carebill_match::RoomIndex;
use carebill_model::{BillingConfig, UsageBucket, UsageRecord};

/// Per-room totals for the two usage billing buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageTotals {
    pub durable_goods: i64,
    pub consumables: i64,
}

impl UsageTotals {
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.durable_goods == 0 && self.consumables == 0
    }

    fn add(&mut self, other: UsageTotals) {
        self.durable_goods += other.durable_goods;
        self.consumables += other.consumables;
    }
}

/// A usage record no roster name resolved, kept for manual follow-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmatchedUsage {
    pub station_id: String,
    pub user_id: String,
    pub name: String,
    pub totals: UsageTotals,
}

/// Outcome of reconciling the shared usage log against one facility's
/// roster.
#[derive(Debug, Clone, Default)]
pub struct UsageReconciliation {
    pub by_room: BTreeMap<String, UsageTotals>,
    pub unmatched: Vec<UnmatchedUsage>,
    /// Set-type codes that had no price or bucket; their sets billed
    /// nothing.
    pub unknown_set_types: Vec<String>,
}

/// Prices one usage record into the two buckets.
///
/// A set whose code has no bucket or no configured per-day rate
/// contributes zero and lands in `unknown`; the record's other sets
/// still compute.
#[must_use]
pub fn calc_usage_amount(
    record: &UsageRecord,
    config: &BillingConfig,
    unknown: &mut Vec<String>,
) -> UsageTotals {
    let mut totals = UsageTotals::default();
    for set in &record.sets {
        let bucket = set.bucket();
        let unit_price = config.usage_unit_price(&set.set_type);
        let (Some(bucket), Some(unit_price)) = (bucket, unit_price) else {
            warn!(
                name = %record.name,
                set_type = %set.set_type,
                "usage set type has no price or bucket, billing zero"
            );
            if !unknown.contains(&set.set_type) {
                unknown.push(set.set_type.clone());
            }
            continue;
        };
        let amount = unit_price * set.day_count();
        match bucket {
            UsageBucket::DurableGoods => totals.durable_goods += amount,
            UsageBucket::Consumables => totals.consumables += amount,
        }
    }
    totals
}

/// Resolves each usage record to a room on one facility's roster and
/// sums the totals per room. Records pricing to zero are ignored;
/// records whose name matches no roster entry go to `unmatched` and
/// contribute to no room.
///
/// The index covers exactly one facility. Callers run this once per
/// facility so identical room numbers in different buildings never
/// collide.
#[must_use]
pub fn reconcile_and_aggregate(
    records: &[UsageRecord],
    index: &RoomIndex,
    config: &BillingConfig,
) -> UsageReconciliation {
    let mut result = UsageReconciliation::default();
    for record in records {
        let totals = calc_usage_amount(record, config, &mut result.unknown_set_types);
        if totals.is_zero() {
            continue;
        }
        match index.find_room(&record.name) {
            Some(room) => {
                result
                    .by_room
                    .entry(room.to_string())
                    .or_default()
                    .add(totals);
            }
            None => {
                result.unmatched.push(UnmatchedUsage {
                    station_id: record.station_id.clone(),
                    user_id: record.user_id.clone(),
                    name: record.name.clone(),
                    totals,
                });
            }
        }
    }
    result
}
