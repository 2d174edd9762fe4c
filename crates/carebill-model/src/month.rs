//! Billing month with Japanese-era sheet labels.
//!
//! Monthly sheets are named by a Reiwa-era label such as `R8.1`
//! (Reiwa year 8, January = 2026-01). The CLI accepts either the
//! `YYYY-MM` form or the era label directly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{BillingError, Result};

/// First Gregorian year of the Reiwa era minus one (Reiwa 1 = 2019).
const REIWA_EPOCH: i32 = 2018;

/// A target billing month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BillingMonth {
    pub year: i32,
    pub month: u32,
}

impl BillingMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) || year <= REIWA_EPOCH {
            return Err(BillingError::InvalidMonth(format!("{year}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    /// Parses `2026-01` or an era label such as `R8.1`.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if let Some(label) = trimmed.strip_prefix('R') {
            if let Some((y, m)) = label.split_once('.')
                && let (Ok(era_year), Ok(month)) = (y.parse::<i32>(), m.parse::<u32>())
            {
                return Self::new(REIWA_EPOCH + era_year, month);
            }
            return Err(BillingError::InvalidMonth(trimmed.to_string()));
        }
        let Some((y, m)) = trimmed.split_once('-') else {
            return Err(BillingError::InvalidMonth(trimmed.to_string()));
        };
        match (y.parse::<i32>(), m.parse::<u32>()) {
            (Ok(year), Ok(month)) => Self::new(year, month),
            _ => Err(BillingError::InvalidMonth(trimmed.to_string())),
        }
    }

    /// Reiwa era year, e.g. 8 for 2026.
    #[must_use]
    pub fn era_year(&self) -> i32 {
        self.year - REIWA_EPOCH
    }

    /// Era label used for sheet file names, e.g. `R8.1` for 2026-01.
    #[must_use]
    pub fn era_label(&self) -> String {
        format!("R{}.{}", self.era_year(), self.month)
    }

    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        let next = self.next();
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("valid month");
        let next_first = NaiveDate::from_ymd_opt(next.year, next.month, 1).expect("valid month");
        next_first.signed_duration_since(first).num_days() as u32
    }

    #[must_use]
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    #[must_use]
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Default invoice issue date: the 3rd of the following month.
    #[must_use]
    pub fn default_issue_date(&self) -> NaiveDate {
        let next = self.next();
        NaiveDate::from_ymd_opt(next.year, next.month, 3).expect("valid date")
    }

    /// Month numbers used on invoice line remarks: fixed charges are
    /// billed one month ahead, hand-entered charges one month behind.
    #[must_use]
    pub fn surrounding_month_numbers(&self) -> (u32, u32, u32) {
        (self.next().month, self.month, self.prev().month)
    }
}

impl std::fmt::Display for BillingMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Builds a date `days` after the issue date, for payment deadlines.
#[must_use]
pub fn due_date(issue_date: NaiveDate, days: i64) -> NaiveDate {
    issue_date + chrono::Duration::days(days)
}
