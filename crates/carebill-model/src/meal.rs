use serde::{Deserialize, Serialize};

/// One resident's monthly meal-attendance record.
///
/// Day lists hold day-of-month numbers in `[1, daysInMonth]`; the
/// per-meal counts are derived from the list lengths, so the
/// count-equals-cardinality invariant holds by construction.
/// `reference_amount` is an externally recorded total used only for
/// validation, never for computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealAttendanceRecord {
    pub room: String,
    pub name: String,
    pub meal_form: String,
    pub breakfast_days: Vec<u32>,
    pub lunch_days: Vec<u32>,
    pub dinner_days: Vec<u32>,
    pub reference_amount: Option<i64>,
}

impl MealAttendanceRecord {
    #[must_use]
    pub fn breakfast_count(&self) -> i64 {
        self.breakfast_days.len() as i64
    }

    #[must_use]
    pub fn lunch_count(&self) -> i64 {
        self.lunch_days.len() as i64
    }

    #[must_use]
    pub fn dinner_count(&self) -> i64 {
        self.dinner_days.len() as i64
    }

    #[must_use]
    pub fn total_count(&self) -> i64 {
        self.breakfast_count() + self.lunch_count() + self.dinner_count()
    }

    /// No meals at all this month (vacant unit or external catering).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_count() == 0
    }
}
