//! Proportion calculation for one record.
//!
//! Bar widths use one-decimal percentages; the row labels use integer
//! percentages rounded half-up on the same ratios. The two are rounded
//! independently and may differ by rounding. This mirrors the observed
//! behavior of the widget this replaces.

use crate::data::ChartRecord;
use serde::{Deserialize, Serialize};

/// Percentages derived from one [`ChartRecord`]. Computed, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedRow {
    /// current + non_current
    pub total: f64,
    /// Current share of total, one decimal place. 0 when total <= 0.
    pub current_pct: f64,
    /// Non-current share of total, one decimal place. 0 when total <= 0.
    pub non_current_pct: f64,
    /// Integer current share for the row label, rounded half-up.
    pub current_display_pct: i64,
    /// Integer non-current share for the row label, rounded half-up.
    pub non_current_display_pct: i64,
}

impl DerivedRow {
    /// Derive percentages from a record. Pure: identical input gives
    /// identical output.
    #[must_use]
    pub fn from_record(record: &ChartRecord) -> Self {
        let total = record.current + record.non_current;
        if total <= 0.0 {
            return Self {
                total,
                current_pct: 0.0,
                non_current_pct: 0.0,
                current_display_pct: 0,
                non_current_display_pct: 0,
            };
        }

        let current_ratio = record.current / total * 100.0;
        let non_current_ratio = record.non_current / total * 100.0;
        Self {
            total,
            current_pct: round1(current_ratio),
            non_current_pct: round1(non_current_ratio),
            current_display_pct: current_ratio.round() as i64,
            non_current_display_pct: non_current_ratio.round() as i64,
        }
    }
}

impl ChartRecord {
    /// Derived percentages for this record.
    #[must_use]
    pub fn derived(&self) -> DerivedRow {
        DerivedRow::from_record(self)
    }
}

/// Round to one decimal place.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
