//! Reconciliation and billing computation.
//!
//! Everything in this crate is a pure transform over the model
//! entities: meal attendance to amounts, usage records to per-room
//! bucket totals, roster-against-ledger merge, and the per-resident
//! billing aggregation with the welfare-cap reverse calculation.
//! Configuration is passed into every function explicitly, so
//! facilities can be processed independently.

mod billing;
mod meal;
mod merge;
mod usage;

pub use billing::{build_all_results, build_result};
pub use meal::{calc_all_meals, calc_meal_amount};
pub use merge::merge_roster_into_ledger;
pub use usage::{
    UnmatchedUsage, UsageReconciliation, UsageTotals, calc_usage_amount, reconcile_and_aggregate,
};
