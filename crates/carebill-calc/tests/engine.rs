//! End-to-end exercise of the calculation chain: roster merge, usage
//! reconciliation, then billing aggregation.

use std::collections::BTreeMap;

use carebill_calc::{
    build_all_results, calc_all_meals, merge_roster_into_ledger, reconcile_and_aggregate,
};
use carebill_match::RoomIndex;
use carebill_model::{
    BillingConfig, FixedCharges, LedgerRow, MealAttendanceRecord, RosterEntry, UsageRecord,
    UsageSetRecord,
};

fn config() -> BillingConfig {
    let mut config = BillingConfig::default();
    config.fixed_charges = FixedCharges {
        rent: Some(40_000),
        management: Some(10_000),
        common_area: Some(5_000),
        water: Some(2_000),
        utility: Some(5_000),
    };
    config.usage_base_prices.insert("福".to_string(), 60);
    config.usage_base_prices.insert("Ｄ".to_string(), 300);
    config
}

fn roster() -> Vec<RosterEntry> {
    ["608", "703", "913"]
        .iter()
        .zip(["岡村三男", "安藤静子", "加藤敬子"])
        .map(|(room, name)| RosterEntry {
            room: (*room).to_string(),
            name: name.to_string(),
        })
        .collect()
}

#[test]
fn new_month_from_scratch_bills_every_resident() {
    let config = config();
    let ledger = merge_roster_into_ledger(&roster(), &[], &config.fixed_charges);
    assert_eq!(ledger.len(), 3);

    let meals = calc_all_meals(
        &[MealAttendanceRecord {
            room: "608".to_string(),
            name: "岡村三男".to_string(),
            breakfast_days: (1..=30).collect(),
            lunch_days: (1..=30).collect(),
            dinner_days: (1..=30).collect(),
            ..MealAttendanceRecord::default()
        }],
        &config.meal_prices,
    );

    let index = RoomIndex::new(roster().into_iter().map(|e| (e.room, e.name)));
    let usage = vec![
        UsageRecord {
            name: "安藤　静子".to_string(),
            sets: vec![UsageSetRecord {
                set_type: "福".to_string(),
                use_days: (1..=31).collect(),
            }],
            ..UsageRecord::default()
        },
        UsageRecord {
            name: "どこにもいない人".to_string(),
            sets: vec![UsageSetRecord {
                set_type: "Ｄ".to_string(),
                use_days: vec![1],
            }],
            ..UsageRecord::default()
        },
    ];
    let reconciled = reconcile_and_aggregate(&usage, &index, &config);
    assert_eq!(reconciled.unmatched.len(), 1);

    let results = build_all_results(&ledger, &meals, &reconciled.by_room, &config, false);
    assert_eq!(results.len(), 3);

    // 62,000 fixed + 30 days of three meals.
    assert_eq!(results[0].room, "608");
    assert_eq!(results[0].total, 62_000 + 42_900);

    // 62,000 fixed + 31 days of 福 at 73/day.
    assert_eq!(results[1].room, "703");
    assert_eq!(results[1].consumables, Some(2_263));
    assert_eq!(results[1].total, 62_000 + 2_263);

    // No variable charges at all.
    assert_eq!(results[2].room, "913");
    assert_eq!(results[2].total, 62_000);
}

#[test]
fn capped_resident_lands_on_the_cap_through_the_whole_chain() {
    let config = config();
    let existing = vec![LedgerRow {
        room: "703".to_string(),
        name: "安藤静子".to_string(),
        rent: Some(40_000),
        management: Some(10_000),
        common_area: Some(5_000),
        water: Some(2_000),
        utility: Some(5_000),
        care_copay: Some(4_500),
        notes: "9〇+初期費用".to_string(),
        ..LedgerRow::default()
    }];
    let ledger = merge_roster_into_ledger(&roster(), &existing, &config.fixed_charges);

    let mut meals = BTreeMap::new();
    meals.insert("703".to_string(), 16_500);
    let results = build_all_results(&ledger, &meals, &BTreeMap::new(), &config, false);

    let capped = results.iter().find(|r| r.room == "703").expect("row 703");
    assert_eq!(capped.welfare_limit, Some(90_000));
    assert_eq!(capped.total, 90_000);
    assert_eq!(capped.subtotal, 90_000 - 4_500);
    assert_eq!(capped.adjustment, (90_000 - 4_500) - (62_000 + 16_500));
    assert!(capped.has_copay());
}
