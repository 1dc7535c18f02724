//! Panel validation
//!
//! Checks a `ParameterPanel` for ranges that cannot classify sensibly.
//! Validation is advisory: evaluation never refuses a panel, it only
//! produces whatever the ranges imply.

use crate::range::resolve_range_with;
use crate::sex::PatientSex;
use crate::template::{ParameterPanel, ParameterTemplate};
use crate::value::{MeasuredValue, ParseOptions};
use serde::Serialize;
use std::collections::HashSet;

/// Severity level for validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A problem found in one parameter
#[derive(Debug, Clone, Serialize)]
pub struct PanelIssue {
    pub severity: Severity,
    pub code: String,
    pub parameter: String,
    pub message: String,
}

impl PanelIssue {
    pub fn error(code: &str, parameter: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code: code.to_string(),
            parameter: parameter.to_string(),
            message: message.into(),
        }
    }

    pub fn warning(code: &str, parameter: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.to_string(),
            parameter: parameter.to_string(),
            message: message.into(),
        }
    }
}

/// Result of panel validation
#[derive(Debug, Default, Serialize)]
pub struct PanelValidation {
    pub panel_id: String,
    pub issues: Vec<PanelIssue>,
}

impl PanelValidation {
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Human-readable report
    pub fn to_report(&self) -> String {
        let mut out = String::new();
        if self.issues.is_empty() {
            out.push_str(&format!("✓ Panel '{}' is valid\n", self.panel_id));
            return out;
        }
        for issue in &self.issues {
            let (prefix, level) = match issue.severity {
                Severity::Error => ("✗", "ERROR"),
                Severity::Warning => ("⚠", "WARN"),
            };
            out.push_str(&format!(
                "{} [{}] {} {}: {}\n",
                prefix, issue.code, level, issue.parameter, issue.message
            ));
        }
        out.push_str(&format!(
            "\n{} error(s), {} warning(s)\n",
            self.error_count(),
            self.warning_count()
        ));
        out
    }
}

/// Validate every parameter of a panel
pub fn validate_panel(panel: &ParameterPanel, options: ParseOptions) -> PanelValidation {
    let mut result = PanelValidation {
        panel_id: panel.id.clone(),
        issues: Vec::new(),
    };

    if panel.parameters.is_empty() {
        result
            .issues
            .push(PanelIssue::warning("W001", &panel.id, "Panel has no parameters"));
    }

    let mut seen = HashSet::new();
    for template in &panel.parameters {
        if template.name.trim().is_empty() {
            result
                .issues
                .push(PanelIssue::error("E001", "<unnamed>", "Parameter name is empty"));
        } else if !seen.insert(template.name.to_lowercase()) {
            result.issues.push(PanelIssue::error(
                "E002",
                &template.name,
                "Duplicate parameter name",
            ));
        }
        validate_template(template, options, &mut result.issues);
    }

    result
}

fn validate_template(template: &ParameterTemplate, options: ParseOptions, issues: &mut Vec<PanelIssue>) {
    let name = template.name.as_str();

    let bounds = [
        ("reference_min_male", &template.reference_min_male),
        ("reference_max_male", &template.reference_max_male),
        ("reference_min_female", &template.reference_min_female),
        ("reference_max_female", &template.reference_max_female),
        ("critical_min", &template.critical_min),
        ("critical_max", &template.critical_max),
    ];
    for (field, raw) in bounds {
        if let Some(raw) = raw.as_deref().filter(|r| !r.trim().is_empty()) {
            if !MeasuredValue::parse_with(raw, options).is_numeric() {
                issues.push(PanelIssue::warning(
                    "W002",
                    name,
                    format!("{} is not numeric ({:?}) and will be ignored", field, raw),
                ));
            }
        }
    }

    for sex in [PatientSex::Male, PatientSex::Female] {
        let range = resolve_range_with(template, sex, options);

        if let (Some(min), Some(max)) = (range.min, range.max) {
            if min > max {
                issues.push(PanelIssue::error(
                    "E003",
                    name,
                    format!("{} band minimum {} is above maximum {}", sex, min, max),
                ));
            }
        }
        if let (Some(critical), Some(min)) = (range.critical_min, range.min) {
            if critical > min {
                issues.push(PanelIssue::warning(
                    "W003",
                    name,
                    format!("critical_min {} is inside the {} band (min {})", critical, sex, min),
                ));
            }
        }
        if let (Some(critical), Some(max)) = (range.critical_max, range.max) {
            if critical < max {
                issues.push(PanelIssue::warning(
                    "W003",
                    name,
                    format!("critical_max {} is inside the {} band (max {})", critical, sex, max),
                ));
            }
        }
        if range.is_unbounded() && (range.critical_min.is_some() || range.critical_max.is_some()) {
            issues.push(PanelIssue::warning(
                "W004",
                name,
                format!(
                    "{} band is undefined; critical thresholds will never be reported",
                    sex
                ),
            ));
        }
    }

    let range = resolve_range_with(template, PatientSex::Male, options);
    if let (Some(lo), Some(hi)) = (range.critical_min, range.critical_max) {
        if lo > hi {
            issues.push(PanelIssue::error(
                "E004",
                name,
                format!("critical_min {} is above critical_max {}", lo, hi),
            ));
        }
    }
}
