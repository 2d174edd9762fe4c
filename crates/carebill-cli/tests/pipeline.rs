//! Integration tests for the monthly pipeline against a real directory
//! tree.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;

use carebill_cli::pipeline::{RunOptions, run_billing};
use carebill_model::{BillingConfig, BillingMonth};

fn temp_base() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("carebill_pipeline_{stamp}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write(path: &PathBuf, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, contents).expect("write file");
}

fn study_config(base: &PathBuf) -> BillingConfig {
    let raw = format!(
        r#"{{
            "facilities": {{
                "selene": {{ "display_name": "マンションセレーネ", "dir": "selene" }},
                "broken": {{ "display_name": "欠損ハイム", "dir": "missing" }}
            }},
            "input": {{ "base_dir": {base:?}, "usage_file": "usage.csv" }},
            "fixed_charges": {{
                "rent": 40000, "management": 10000, "common_area": 5000,
                "water": 2000, "utility": 5000
            }},
            "usage_base_prices": {{ "福": 60, "Ｄ": 300 }},
            "usage_price_overrides": {{ "Ａ": 908 }}
        }}"#,
        base = base.to_str().expect("utf-8 temp path")
    );
    serde_json::from_str(&raw).expect("config")
}

fn seed_facility(base: &PathBuf) {
    write(
        &base.join("selene/roster.csv"),
        "room,name\n608,岡村三男\n703,安藤静子\n✕201,退居者\n",
    );
    write(
        &base.join("selene/ledger/R8.1.csv"),
        "room,name,rent,management,common_area,water,utility,care_copay,notes\n\
         608,岡村三男,40000,10000,5000,2000,5000,,\n\
         703,安藤静子,40000,10000,5000,2000,5000,4500,9〇\n",
    );
    write(
        &base.join("selene/meal/R8.1.csv"),
        "room,name,meal_form,breakfast,lunch,dinner,reference_amount\n\
         703,安藤静子,常食,1 2 3 4 5,1 2 3 4 5,1 2 3 4 5,\n",
    );
    write(
        &base.join("usage.csv"),
        "station,user_id,name,set_type,days\n\
         01,1001,岡村　三男,Ｄ,1 2 3 4 5 6 7 8 9 10\n\
         ,,,福,1 2 3 4 5\n\
         01,1002,行方不明者,福,1\n",
    );
}

#[test]
fn run_bills_facilities_and_isolates_failures() {
    let base = temp_base();
    seed_facility(&base);
    let config = study_config(&base);
    let output_dir = base.join("output");

    let result = run_billing(
        &config,
        BillingMonth::new(2026, 1).unwrap(),
        NaiveDate::from_ymd_opt(2026, 2, 3).unwrap(),
        &output_dir,
        RunOptions::default(),
    )
    .expect("run");

    // The facility with no data directory fails alone.
    assert!(result.has_errors);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].starts_with("broken:"));
    assert_eq!(result.facilities.len(), 1);

    let selene = &result.facilities[0];
    assert_eq!(selene.billed, 2);
    assert!(!selene.rollover);
    assert_eq!(result.unmatched.len(), 1);
    assert_eq!(result.unmatched[0].name, "行方不明者");

    // 608: fixed 62,000 + durables 363×10 + consumables 73×5.
    // 703: capped at 90,000.
    assert_eq!(selene.billed_total, 62_000 + 3_630 + 365 + 90_000);
    assert_eq!(selene.capped, 1);

    // Sheet plus invoice/receipt per resident plus one combined
    // statement for the copay resident.
    assert_eq!(selene.documents, 5);
    let sheet = selene.ledger_sheet.as_ref().expect("sheet path");
    assert!(sheet.ends_with("selene/R8.1.csv"));
    let sheet_text = fs::read_to_string(sheet).expect("sheet contents");
    assert!(sheet_text.lines().last().expect("totals row").starts_with("合計"));

    let _ = fs::remove_dir_all(&base);
}

#[test]
fn record_matched_by_one_facility_is_not_unmatched() {
    let base = temp_base();
    write(&base.join("a/roster.csv"), "room,name\n608,岡村三男\n");
    write(
        &base.join("a/ledger/R8.1.csv"),
        "room,name,rent\n608,岡村三男,40000\n",
    );
    write(&base.join("b/roster.csv"), "room,name\n913,加藤敬子\n");
    write(
        &base.join("b/ledger/R8.1.csv"),
        "room,name,rent\n913,加藤敬子,40000\n",
    );
    write(
        &base.join("usage.csv"),
        "station,user_id,name,set_type,days\n\
         01,1001,岡村三男,Ｄ,1 2 3\n\
         01,1002,行方不明者,Ｄ,1\n",
    );
    let raw = format!(
        r#"{{
            "facilities": {{
                "a": {{ "display_name": "A棟", "dir": "a" }},
                "b": {{ "display_name": "B棟", "dir": "b" }}
            }},
            "input": {{ "base_dir": {base:?}, "usage_file": "usage.csv" }},
            "usage_base_prices": {{ "Ｄ": 300 }}
        }}"#,
        base = base.to_str().expect("utf-8 temp path")
    );
    let config: BillingConfig = serde_json::from_str(&raw).expect("config");

    let month = BillingMonth::new(2026, 1).unwrap();
    let result = run_billing(
        &config,
        month,
        month.default_issue_date(),
        &base.join("output"),
        RunOptions {
            dry_run: true,
            ..RunOptions::default()
        },
    )
    .expect("run");

    // 岡村三男 lives in facility a; only the record nobody claimed is
    // reported for the run, even though facility b resolved neither.
    assert_eq!(result.facilities.len(), 2);
    assert_eq!(result.facilities[1].unmatched.len(), 2);
    assert_eq!(result.unmatched.len(), 1);
    assert_eq!(result.unmatched[0].name, "行方不明者");

    let _ = fs::remove_dir_all(&base);
}

#[test]
fn fallback_rolls_the_prior_month_forward() {
    let base = temp_base();
    write(&base.join("selene/roster.csv"), "room,name\n608,岡村三男\n");
    write(
        &base.join("selene/ledger/R7.12.csv"),
        "room,name,rent,management,common_area,water,utility,installment_balance,installment,pharmacy\n\
         608,岡村三男,40000,10000,5000,2000,5000,30000,10000,8000\n",
    );
    let mut config = study_config(&base);
    config.facilities.remove("broken");

    let month = BillingMonth::new(2026, 1).unwrap();
    let options = RunOptions {
        allow_fallback: true,
        skip_documents: true,
        dry_run: false,
    };
    let result = run_billing(
        &config,
        month,
        month.default_issue_date(),
        &base.join("output"),
        options,
    )
    .expect("run");

    assert!(!result.has_errors);
    let selene = &result.facilities[0];
    assert!(selene.rollover);
    assert_eq!(selene.documents, 0);

    let sheet = fs::read_to_string(selene.ledger_sheet.as_ref().expect("sheet")).expect("read");
    let row = sheet.lines().nth(1).expect("resident row");
    // Balance rolled 30,000 → 20,000; pharmacy cleared; a fresh
    // 10,000 installment is billed.
    assert!(row.contains("20000"));
    assert!(!row.contains("8000"));

    let _ = fs::remove_dir_all(&base);
}

#[test]
fn missing_sheet_without_fallback_excludes_the_facility() {
    let base = temp_base();
    write(&base.join("selene/roster.csv"), "room,name\n608,岡村三男\n");
    write(&base.join("selene/ledger/R7.12.csv"), "room,name\n608,岡村三男\n");
    let mut config = study_config(&base);
    config.facilities.remove("broken");

    let month = BillingMonth::new(2026, 1).unwrap();
    let result = run_billing(
        &config,
        month,
        month.default_issue_date(),
        &base.join("output"),
        RunOptions::default(),
    )
    .expect("run");

    assert!(result.has_errors);
    assert!(result.errors[0].contains("R8.1"));
    assert!(result.facilities.is_empty());

    let _ = fs::remove_dir_all(&base);
}
