//! Value classification against a resolved range
//!
//! Order of checks:
//!
//! 1. non-numeric value → `Unknown`
//! 2. no normal band at all → `Unknown` (critical thresholds are not
//!    consulted in this case)
//! 3. critical thresholds, low side first
//! 4. normal band, low side first
//!
//! All comparisons are strict: a value equal to a bound is inside it.

use crate::range::ResolvedRange;
use crate::value::MeasuredValue;
use serde::{Deserialize, Serialize};

/// Outcome of comparing a value to its reference band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    Normal,
    Low,
    High,
    CriticalLow,
    CriticalHigh,
    Unknown,
}

impl Classification {
    pub const ALL: [Classification; 6] = [
        Classification::Normal,
        Classification::Low,
        Classification::High,
        Classification::CriticalLow,
        Classification::CriticalHigh,
        Classification::Unknown,
    ];

    /// Outside the normal band (critical included)
    pub fn is_abnormal(self) -> bool {
        !matches!(self, Classification::Normal | Classification::Unknown)
    }

    pub fn is_critical(self) -> bool {
        matches!(self, Classification::CriticalLow | Classification::CriticalHigh)
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Normal => write!(f, "NORMAL"),
            Classification::Low => write!(f, "LOW"),
            Classification::High => write!(f, "HIGH"),
            Classification::CriticalLow => write!(f, "CRITICAL_LOW"),
            Classification::CriticalHigh => write!(f, "CRITICAL_HIGH"),
            Classification::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Classify a raw result string
pub fn classify(measured: &str, range: &ResolvedRange) -> Classification {
    classify_value(&MeasuredValue::parse(measured), range)
}

/// Classify an already-parsed value
pub fn classify_value(value: &MeasuredValue, range: &ResolvedRange) -> Classification {
    let Some(v) = value.as_decimal() else {
        return Classification::Unknown;
    };

    if range.is_unbounded() {
        return Classification::Unknown;
    }

    let classification = if range.critical_min.is_some_and(|c| v < c) {
        Classification::CriticalLow
    } else if range.critical_max.is_some_and(|c| v > c) {
        Classification::CriticalHigh
    } else if range.min.is_some_and(|m| v < m) {
        Classification::Low
    } else if range.max.is_some_and(|m| v > m) {
        Classification::High
    } else {
        Classification::Normal
    };

    log::debug!("classified {} against {:?} as {}", v, range, classification);
    classification
}
