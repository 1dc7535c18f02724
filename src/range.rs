//! Reference-range resolution
//!
//! Picks the band that applies to a patient. Each side falls back on its
//! own: a female patient whose template only defines a female minimum gets
//! the female minimum and the male maximum.

use crate::sex::PatientSex;
use crate::template::ParameterTemplate;
use crate::value::{parse_bound, ParseOptions};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Numeric band and critical thresholds for one evaluation
///
/// `None` on a side means nothing is enforced on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRange {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
    pub critical_min: Option<Decimal>,
    pub critical_max: Option<Decimal>,
}

impl ResolvedRange {
    pub fn new(min: Option<Decimal>, max: Option<Decimal>) -> Self {
        Self {
            min,
            max,
            ..Default::default()
        }
    }

    pub fn with_critical(mut self, critical_min: Option<Decimal>, critical_max: Option<Decimal>) -> Self {
        self.critical_min = critical_min;
        self.critical_max = critical_max;
        self
    }

    /// True when neither side of the normal band is defined
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// The band as printed next to a result
    ///
    /// ```
    /// use labeval::ResolvedRange;
    /// use rust_decimal::Decimal;
    ///
    /// let range = ResolvedRange::new(Some(Decimal::new(70, 0)), Some(Decimal::new(100, 0)));
    /// assert_eq!(range.reference_text(), "70 - 100");
    /// assert_eq!(ResolvedRange::new(None, Some(Decimal::new(5, 1))).reference_text(), "<= 0.5");
    /// ```
    pub fn reference_text(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("{} - {}", min, max),
            (Some(min), None) => format!(">= {}", min),
            (None, Some(max)) => format!("<= {}", max),
            (None, None) => String::new(),
        }
    }
}

/// Resolve the applicable band with default parse options
pub fn resolve_range(template: &ParameterTemplate, sex: PatientSex) -> ResolvedRange {
    resolve_range_with(template, sex, ParseOptions::default())
}

/// Resolve the applicable band for `sex`
pub fn resolve_range_with(
    template: &ParameterTemplate,
    sex: PatientSex,
    options: ParseOptions,
) -> ResolvedRange {
    let min = pick_bound(
        sex,
        template.reference_min_female.as_deref(),
        template.reference_min_male.as_deref(),
    );
    let max = pick_bound(
        sex,
        template.reference_max_female.as_deref(),
        template.reference_max_male.as_deref(),
    );

    ResolvedRange {
        min: parse_bound(min, options),
        max: parse_bound(max, options),
        critical_min: parse_bound(template.critical_min.as_deref(), options),
        critical_max: parse_bound(template.critical_max.as_deref(), options),
    }
}

// A present-but-blank female bound counts as absent.
fn pick_bound<'a>(sex: PatientSex, female: Option<&'a str>, male: Option<&'a str>) -> Option<&'a str> {
    match female {
        Some(f) if sex.is_female() && !f.trim().is_empty() => Some(f),
        _ => male,
    }
}
