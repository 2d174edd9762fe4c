//! Typed run configuration.
//!
//! All prices, defaults and facility wiring come from a JSON config
//! file and are passed explicitly into the calculators — nothing reads
//! global state, so per-facility processing can fan out freely.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BillingError, Result};

/// Per-meal unit prices in yen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPrices {
    pub breakfast: i64,
    pub lunch: i64,
    pub dinner: i64,
}

impl Default for MealPrices {
    fn default() -> Self {
        Self {
            breakfast: 330,
            lunch: 550,
            dinner: 550,
        }
    }
}

/// Default fixed charges seeded onto new residents during merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedCharges {
    pub rent: Option<i64>,
    pub management: Option<i64>,
    pub common_area: Option<i64>,
    pub water: Option<i64>,
    pub utility: Option<i64>,
}

/// Days between the issue date and each payment deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueDateOffsets {
    /// Primary invoice and care copay share this offset.
    pub primary_days: i64,
    /// Nurse copay allows a longer window.
    pub nurse_days: i64,
}

impl Default for DueDateOffsets {
    fn default() -> Self {
        Self {
            primary_days: 20,
            nurse_days: 25,
        }
    }
}

/// One facility's identity and input location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityConfig {
    /// Name printed on documents, e.g. "マンションセレーネ（ええすまい）".
    pub display_name: String,
    /// Directory under `input.base_dir` holding this facility's files.
    pub dir: String,
}

/// Input file layout shared by all facilities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    pub base_dir: PathBuf,
    /// The usage log is a single file shared across facilities.
    pub usage_file: PathBuf,
}

/// Full run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingConfig {
    #[serde(default)]
    pub facilities: BTreeMap<String, FacilityConfig>,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub meal_prices: MealPrices,
    #[serde(default)]
    pub fixed_charges: FixedCharges,
    /// Base per-day rates by usage set-type code, before markup.
    #[serde(default)]
    pub usage_base_prices: BTreeMap<String, i64>,
    /// Explicit per-day rates that bypass the markup entirely.
    #[serde(default)]
    pub usage_price_overrides: BTreeMap<String, i64>,
    #[serde(default = "default_markup_rate")]
    pub usage_markup_rate: f64,
    #[serde(default = "default_installment_monthly")]
    pub installment_monthly: i64,
    #[serde(default)]
    pub due_date_offsets: DueDateOffsets,
}

fn default_markup_rate() -> f64 {
    1.21
}

fn default_installment_monthly() -> i64 {
    10_000
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            facilities: BTreeMap::new(),
            input: InputConfig::default(),
            meal_prices: MealPrices::default(),
            fixed_charges: FixedCharges::default(),
            usage_base_prices: BTreeMap::new(),
            usage_price_overrides: BTreeMap::new(),
            usage_markup_rate: default_markup_rate(),
            installment_monthly: default_installment_monthly(),
            due_date_offsets: DueDateOffsets::default(),
        }
    }
}

impl BillingConfig {
    /// Loads and deserializes a JSON config file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|error| {
            BillingError::Message(format!("config {}: {error}", path.display()))
        })
    }

    /// Per-day billing rate for a usage set type.
    ///
    /// Overrides win outright; otherwise the base rate is scaled by the
    /// markup and rounded half-up to the nearest yen. Returns `None`
    /// for a set type with no configured price.
    #[must_use]
    pub fn usage_unit_price(&self, set_type: &str) -> Option<i64> {
        if let Some(price) = self.usage_price_overrides.get(set_type) {
            return Some(*price);
        }
        let base = self.usage_base_prices.get(set_type)?;
        // Round half-up; f64::round is half-away-from-zero, which is
        // the same thing for non-negative rates.
        Some((*base as f64 * self.usage_markup_rate).round() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_prices() -> BillingConfig {
        let mut config = BillingConfig::default();
        config.usage_base_prices.insert("福".to_string(), 60);
        config.usage_base_prices.insert("Ｄ".to_string(), 300);
        config.usage_price_overrides.insert("Ａ".to_string(), 908);
        config
    }

    #[test]
    fn override_bypasses_markup() {
        assert_eq!(config_with_prices().usage_unit_price("Ａ"), Some(908));
    }

    #[test]
    fn base_rate_is_marked_up_and_rounded_half_up() {
        // 60 × 1.21 = 72.6 → 73
        assert_eq!(config_with_prices().usage_unit_price("福"), Some(73));
        // 300 × 1.21 = 363
        assert_eq!(config_with_prices().usage_unit_price("Ｄ"), Some(363));
    }

    #[test]
    fn unknown_set_type_has_no_price() {
        assert_eq!(config_with_prices().usage_unit_price("謎"), None);
    }

    #[test]
    fn defaults_survive_an_empty_config_document() {
        let config: BillingConfig = serde_json::from_str("{}").expect("empty config");
        assert_eq!(config.meal_prices, MealPrices::default());
        assert_eq!(config.installment_monthly, 10_000);
        assert_eq!(config.due_date_offsets.primary_days, 20);
    }
}
