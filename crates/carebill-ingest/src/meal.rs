use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use carebill_model::{MealAttendanceRecord, normalize_room};

use crate::roster::column_index;
use crate::{parse_day_list, parse_opt_amount};

/// Parses the meal-attendance CSV. Expected headers: `room`, `name`,
/// `meal_form`, `breakfast`, `lunch`, `dinner`, `reference_amount`; the
/// three meal columns hold space-separated day-of-month lists.
pub fn parse_meal_attendance<R: Read>(
    reader: R,
    days_in_month: u32,
) -> Result<Vec<MealAttendanceRecord>> {
    let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = csv_reader.headers().context("meal attendance headers")?.clone();
    let room_idx =
        column_index(&headers, "room").context("meal attendance is missing a room column")?;
    let name_idx = column_index(&headers, "name");
    let form_idx = column_index(&headers, "meal_form");
    let breakfast_idx = column_index(&headers, "breakfast");
    let lunch_idx = column_index(&headers, "lunch");
    let dinner_idx = column_index(&headers, "dinner");
    let reference_idx = column_index(&headers, "reference_amount");

    let cell = |record: &csv::StringRecord, idx: Option<usize>| -> String {
        idx.and_then(|idx| record.get(idx))
            .unwrap_or("")
            .trim()
            .to_string()
    };

    let mut records = Vec::new();
    for record in csv_reader.records() {
        let record = record.context("meal attendance row")?;
        let room = normalize_room(record.get(room_idx).unwrap_or(""));
        if room.is_empty() {
            continue;
        }
        let name = cell(&record, name_idx);
        records.push(MealAttendanceRecord {
            breakfast_days: parse_day_list(
                &cell(&record, breakfast_idx),
                days_in_month,
                "breakfast",
            ),
            lunch_days: parse_day_list(&cell(&record, lunch_idx), days_in_month, "lunch"),
            dinner_days: parse_day_list(&cell(&record, dinner_idx), days_in_month, "dinner"),
            reference_amount: parse_opt_amount(&cell(&record, reference_idx)),
            meal_form: cell(&record, form_idx),
            room,
            name,
        });
    }
    Ok(records)
}

pub fn read_meal_attendance(path: &Path, days_in_month: u32) -> Result<Vec<MealAttendanceRecord>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("open meal attendance {}", path.display()))?;
    parse_meal_attendance(file, days_in_month)
        .with_context(|| format!("parse meal attendance {}", path.display()))
}
