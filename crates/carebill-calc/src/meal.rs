use std::collections::BTreeMap;

use tracing::warn;

use carebill_model::{MealAttendanceRecord, MealPrices};

/// Monthly meal charge for one record.
#[must_use]
pub fn calc_meal_amount(record: &MealAttendanceRecord, prices: &MealPrices) -> i64 {
    record.breakfast_count() * prices.breakfast
        + record.lunch_count() * prices.lunch
        + record.dinner_count() * prices.dinner
}

/// Meal charges per room. Records with no meals or no room are skipped;
/// room is authoritative on this record type, so no collision handling
/// is needed. A recorded reference amount that disagrees with the
/// computed one is logged, never used.
#[must_use]
pub fn calc_all_meals(
    records: &[MealAttendanceRecord],
    prices: &MealPrices,
) -> BTreeMap<String, i64> {
    let mut amounts = BTreeMap::new();
    for record in records {
        if record.room.is_empty() || record.is_empty() {
            continue;
        }
        let amount = calc_meal_amount(record, prices);
        if let Some(reference) = record.reference_amount
            && reference != amount
        {
            warn!(
                room = %record.room,
                name = %record.name,
                computed = amount,
                reference,
                "meal amount disagrees with the recorded reference amount"
            );
        }
        amounts.insert(record.room.clone(), amount);
    }
    amounts
}
