pub mod billing;
pub mod config;
pub mod error;
pub mod ledger;
pub mod meal;
pub mod month;
pub mod room;
pub mod roster;
pub mod usage;
pub mod welfare;

pub use billing::BillingResult;
pub use config::{
    BillingConfig, DueDateOffsets, FacilityConfig, FixedCharges, InputConfig, MealPrices,
};
pub use error::{BillingError, Result};
pub use ledger::{LedgerRow, charge};
pub use meal::MealAttendanceRecord;
pub use month::{BillingMonth, due_date};
pub use room::{
    TOTAL_ROW_LABEL, compare_rooms, is_retired_room, normalize_room, room_sort_key,
};
pub use roster::RosterEntry;
pub use usage::{
    CONSUMABLE_SET_TYPES, DURABLE_GOODS_SET_TYPES, UsageBucket, UsageRecord, UsageSetRecord,
};
pub use welfare::parse_welfare_cap;
