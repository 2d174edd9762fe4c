//! Per-resident billing aggregation.

use std::collections::BTreeMap;

use carebill_model::{BillingConfig, BillingResult, LedgerRow, charge};

use crate::usage::UsageTotals;

/// Builds one resident's billing result from their ledger row plus the
/// freshly computed amounts.
///
/// With `is_rollover` set, the prior month's row seeds this month:
/// the installment balance is decremented by last month's payment
/// (floored at zero), a new payment is scheduled while a balance
/// remains, and the hand-entered charge fields are cleared. Otherwise
/// those fields pass through unchanged.
///
/// Overlays replace the ledger value only when supplied; an absent
/// override keeps whatever the row already carries. Fixed charges and
/// the two copays always pass through.
#[must_use]
pub fn build_result(
    row: &LedgerRow,
    meal_override: Option<i64>,
    usage_override: Option<UsageTotals>,
    config: &BillingConfig,
    is_rollover: bool,
) -> BillingResult {
    let (installment_balance, installment, hand_entered) = if is_rollover {
        let balance = (charge(row.installment_balance) - charge(row.installment)).max(0);
        let installment = if balance > 0 {
            Some(config.installment_monthly)
        } else {
            None
        };
        // Absence is preserved: a resident who never had a plan keeps
        // blank installment cells instead of gaining a zero.
        let balance = if row.installment_balance.is_none() && row.installment.is_none() {
            None
        } else {
            Some(balance)
        };
        (balance, installment, HandEntered::default())
    } else {
        (
            row.installment_balance,
            row.installment,
            HandEntered::from_row(row),
        )
    };

    let mut result = BillingResult {
        room: row.room.clone(),
        name: row.name.clone(),
        rent: row.rent,
        management: row.management,
        common_area: row.common_area,
        water: row.water,
        utility: row.utility,
        meal: meal_override.map(Some).unwrap_or(row.meal),
        durable_goods: usage_override
            .map(|totals| Some(totals.durable_goods))
            .unwrap_or(row.durable_goods),
        consumables: usage_override
            .map(|totals| Some(totals.consumables))
            .unwrap_or(row.consumables),
        installment_balance,
        installment,
        office_fee: hand_entered.office_fee,
        day_service: hand_entered.day_service,
        equipment: hand_entered.equipment,
        pharmacy: hand_entered.pharmacy,
        doctor: hand_entered.doctor,
        support: hand_entered.support,
        other: hand_entered.other,
        care_copay: row.care_copay,
        nurse_copay: row.nurse_copay,
        notes: row.notes.clone(),
        welfare_limit: row.welfare_limit(),
        ..BillingResult::default()
    };

    let pre_adjustment = result.fixed_total()
        + charge(result.meal)
        + charge(result.durable_goods)
        + charge(result.consumables)
        + charge(result.installment)
        + result.hand_entered_total();
    let copays = charge(result.care_copay) + charge(result.nurse_copay);

    match result.welfare_limit.filter(|cap| *cap > 0) {
        Some(cap) => {
            // Reverse calculation: solve for the adjustment that lands
            // the total on the cap exactly. A negative adjustment is
            // the normal case.
            let needed_subtotal = cap - copays;
            result.adjustment = needed_subtotal - pre_adjustment;
            result.subtotal = needed_subtotal;
            result.total = cap;
        }
        None => {
            result.adjustment = 0;
            result.subtotal = pre_adjustment;
            result.total = result.subtotal + copays;
        }
    }
    result.remaining_balance = charge(result.installment_balance) - charge(result.installment);
    result
}

/// Builds results for every ledger row, in row order. Rooms absent from
/// an amount map simply get no override.
#[must_use]
pub fn build_all_results(
    rows: &[LedgerRow],
    meal_amounts: &BTreeMap<String, i64>,
    usage_amounts: &BTreeMap<String, UsageTotals>,
    config: &BillingConfig,
    is_rollover: bool,
) -> Vec<BillingResult> {
    rows.iter()
        .map(|row| {
            build_result(
                row,
                meal_amounts.get(&row.room).copied(),
                usage_amounts.get(&row.room).copied(),
                config,
                is_rollover,
            )
        })
        .collect()
}

#[derive(Debug, Default)]
struct HandEntered {
    office_fee: Option<i64>,
    day_service: Option<i64>,
    equipment: Option<i64>,
    pharmacy: Option<i64>,
    doctor: Option<i64>,
    support: Option<i64>,
    other: Option<i64>,
}

impl HandEntered {
    fn from_row(row: &LedgerRow) -> Self {
        Self {
            office_fee: row.office_fee,
            day_service: row.day_service,
            equipment: row.equipment,
            pharmacy: row.pharmacy,
            doctor: row.doctor,
            support: row.support,
            other: row.other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fixed_row() -> LedgerRow {
        LedgerRow {
            room: "608".to_string(),
            name: "岡村三男".to_string(),
            rent: Some(40_000),
            management: Some(10_000),
            common_area: Some(5_000),
            water: Some(2_000),
            utility: Some(5_000),
            ..LedgerRow::default()
        }
    }

    #[test]
    fn fixed_charges_only_total_their_sum() {
        let result = build_result(&fixed_row(), None, None, &BillingConfig::default(), false);
        assert_eq!(result.adjustment, 0);
        assert_eq!(result.subtotal, 62_000);
        assert_eq!(result.total, 62_000);
        assert_eq!(result.total, result.fixed_total());
    }

    #[test]
    fn cap_back_solves_the_adjustment() {
        let mut row = fixed_row();
        row.notes = "9〇".to_string();
        let result = build_result(&row, Some(16_500), None, &BillingConfig::default(), false);
        // needed subtotal 90,000; pre-adjustment 62,000 + 16,500.
        assert_eq!(result.adjustment, 90_000 - 62_000 - 16_500);
        assert_eq!(result.subtotal, 90_000);
        assert_eq!(result.total, 90_000);
    }

    #[test]
    fn cap_holds_with_copays_billed() {
        let mut row = fixed_row();
        row.notes = "9〇".to_string();
        row.care_copay = Some(4_500);
        row.nurse_copay = Some(1_200);
        let result = build_result(&row, Some(16_500), None, &BillingConfig::default(), false);
        assert_eq!(result.subtotal, 90_000 - 4_500 - 1_200);
        assert_eq!(result.total, 90_000);
    }

    #[test]
    fn overlay_falls_back_to_the_ledger_value() {
        let mut row = fixed_row();
        row.meal = Some(12_000);
        row.durable_goods = Some(3_000);
        let kept = build_result(&row, None, None, &BillingConfig::default(), false);
        assert_eq!(kept.meal, Some(12_000));
        assert_eq!(kept.durable_goods, Some(3_000));

        let overlay = UsageTotals {
            durable_goods: 3_630,
            consumables: 365,
        };
        let fresh = build_result(
            &row,
            Some(16_500),
            Some(overlay),
            &BillingConfig::default(),
            false,
        );
        assert_eq!(fresh.meal, Some(16_500));
        assert_eq!(fresh.durable_goods, Some(3_630));
        assert_eq!(fresh.consumables, Some(365));
    }

    #[test]
    fn rollover_decrements_balance_and_clears_hand_entered() {
        let mut row = fixed_row();
        row.installment_balance = Some(30_000);
        row.installment = Some(10_000);
        row.pharmacy = Some(8_000);
        row.doctor = Some(2_500);
        let result = build_result(&row, None, None, &BillingConfig::default(), true);
        assert_eq!(result.installment_balance, Some(20_000));
        assert_eq!(result.installment, Some(10_000));
        assert_eq!(result.remaining_balance, 10_000);
        assert_eq!(result.pharmacy, None);
        assert_eq!(result.doctor, None);
    }

    #[test]
    fn rollover_ends_a_paid_off_plan() {
        let mut row = fixed_row();
        row.installment_balance = Some(10_000);
        row.installment = Some(10_000);
        let result = build_result(&row, None, None, &BillingConfig::default(), true);
        assert_eq!(result.installment_balance, Some(0));
        assert_eq!(result.installment, None);
        assert_eq!(result.remaining_balance, 0);
    }

    #[test]
    fn rollover_keeps_absent_installment_cells_absent() {
        let result = build_result(&fixed_row(), None, None, &BillingConfig::default(), true);
        assert_eq!(result.installment_balance, None);
        assert_eq!(result.installment, None);
    }

    #[test]
    fn batch_output_preserves_row_order() {
        let rows = vec![
            fixed_row(),
            LedgerRow {
                room: "703".to_string(),
                name: "安藤静子".to_string(),
                ..LedgerRow::default()
            },
        ];
        let mut meals = BTreeMap::new();
        meals.insert("703".to_string(), 9_900);
        let results =
            build_all_results(&rows, &meals, &BTreeMap::new(), &BillingConfig::default(), false);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].room, "608");
        assert_eq!(results[1].meal, Some(9_900));
    }

    proptest! {
        #[test]
        fn capped_total_always_equals_the_cap(
            rent in 0_i64..100_000,
            meal in 0_i64..50_000,
            pharmacy in proptest::option::of(0_i64..30_000),
            care in proptest::option::of(0_i64..20_000),
            cap_man in 1_i64..20,
        ) {
            let row = LedgerRow {
                room: "608".to_string(),
                name: "岡村三男".to_string(),
                rent: Some(rent),
                pharmacy,
                care_copay: care,
                notes: format!("{cap_man}〇"),
                ..LedgerRow::default()
            };
            let result = build_result(&row, Some(meal), None, &BillingConfig::default(), false);
            prop_assert_eq!(result.total, cap_man * 10_000);
            prop_assert_eq!(result.subtotal + charge(result.care_copay) + charge(result.nurse_copay), result.total);
        }

        #[test]
        fn uncapped_rows_never_get_an_adjustment(
            rent in proptest::option::of(0_i64..100_000),
            meal in proptest::option::of(0_i64..50_000),
            care in proptest::option::of(0_i64..20_000),
            nurse in proptest::option::of(0_i64..20_000),
        ) {
            let row = LedgerRow {
                room: "608".to_string(),
                name: "岡村三男".to_string(),
                rent,
                care_copay: care,
                nurse_copay: nurse,
                ..LedgerRow::default()
            };
            let result = build_result(&row, meal, None, &BillingConfig::default(), false);
            prop_assert_eq!(result.adjustment, 0);
            prop_assert_eq!(
                result.total,
                result.subtotal + charge(result.care_copay) + charge(result.nurse_copay)
            );
        }

        #[test]
        fn rollover_never_carries_a_negative_balance(
            balance in proptest::option::of(0_i64..60_000),
            payment in proptest::option::of(0_i64..30_000),
        ) {
            let row = LedgerRow {
                room: "608".to_string(),
                name: "岡村三男".to_string(),
                installment_balance: balance,
                installment: payment,
                ..LedgerRow::default()
            };
            let result = build_result(&row, None, None, &BillingConfig::default(), true);
            prop_assert!(charge(result.installment_balance) >= 0);
        }
    }
}
