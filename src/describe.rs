//! Display descriptors for classifications
//!
//! One fixed table per locale, one entry per [`Classification`]. Severity
//! and icon never depend on the locale, only the label does.

use crate::classify::Classification;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color family a renderer should use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityColor {
    Neutral,
    Caution,
    Danger,
}

impl std::fmt::Display for SeverityColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeverityColor::Neutral => write!(f, "neutral"),
            SeverityColor::Caution => write!(f, "caution"),
            SeverityColor::Danger => write!(f, "danger"),
        }
    }
}

/// Label language for descriptors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

/// How a classified result is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayDescriptor {
    pub label: &'static str,
    pub severity: SeverityColor,
    pub icon: &'static str,
}

impl DisplayDescriptor {
    /// `Unknown` renders as an empty cell
    pub fn is_blank(&self) -> bool {
        self.label.is_empty()
    }
}

/// Descriptor with English labels
pub fn describe(classification: Classification) -> DisplayDescriptor {
    describe_localized(classification, Locale::En)
}

pub fn describe_localized(classification: Classification, locale: Locale) -> DisplayDescriptor {
    let (severity, icon) = match classification {
        Classification::Normal => (SeverityColor::Neutral, "✓"),
        Classification::Low => (SeverityColor::Caution, "↓"),
        Classification::High => (SeverityColor::Caution, "↑"),
        Classification::CriticalLow => (SeverityColor::Danger, "⇊"),
        Classification::CriticalHigh => (SeverityColor::Danger, "⇈"),
        Classification::Unknown => (SeverityColor::Neutral, ""),
    };
    DisplayDescriptor {
        label: label(classification, locale),
        severity,
        icon,
    }
}

fn label(classification: Classification, locale: Locale) -> &'static str {
    match (locale, classification) {
        (Locale::En, Classification::Normal) => "Normal",
        (Locale::En, Classification::Low) => "Low",
        (Locale::En, Classification::High) => "High",
        (Locale::En, Classification::CriticalLow) => "Critical low",
        (Locale::En, Classification::CriticalHigh) => "Critical high",
        (Locale::Es, Classification::Normal) => "Normal",
        (Locale::Es, Classification::Low) => "Bajo",
        (Locale::Es, Classification::High) => "Alto",
        (Locale::Es, Classification::CriticalLow) => "Crítico bajo",
        (Locale::Es, Classification::CriticalHigh) => "Crítico alto",
        (_, Classification::Unknown) => "",
    }
}
