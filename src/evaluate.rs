//! Evaluation pipeline - resolve, classify, describe
//!
//! [`evaluate`] runs the three steps for a single parameter. [`Evaluator`]
//! carries configuration and evaluates a whole study against a panel,
//! producing a [`StudyReport`] for printing and a sanitized
//! [`PublicResult`] view for the public verification page.

use crate::classify::{classify_value, Classification};
use crate::config::EvalConfig;
use crate::describe::{describe_localized, DisplayDescriptor, Locale, SeverityColor};
use crate::range::{resolve_range_with, ResolvedRange};
use crate::sex::PatientSex;
use crate::template::{ParameterPanel, ParameterTemplate, StudyResults};
use crate::value::{MeasuredValue, ParseOptions};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One evaluated result row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub parameter: String,
    pub unit: String,
    pub value: MeasuredValue,
    pub range: ResolvedRange,
    pub reference_text: String,
    pub classification: Classification,
    pub descriptor: DisplayDescriptor,
}

/// Evaluate one raw value with default options and English labels
pub fn evaluate(template: &ParameterTemplate, raw_value: &str, sex: PatientSex) -> Evaluation {
    Evaluator::default().evaluate_parameter(template, raw_value, sex)
}

/// Evaluates values against templates using a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvalConfig,
}

impl Evaluator {
    pub fn new(config: EvalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    fn options(&self) -> ParseOptions {
        self.config.parse_options()
    }

    fn locale(&self) -> Locale {
        self.config.locale
    }

    pub fn evaluate_parameter(
        &self,
        template: &ParameterTemplate,
        raw_value: &str,
        sex: PatientSex,
    ) -> Evaluation {
        let range = resolve_range_with(template, sex, self.options());
        let value = MeasuredValue::parse_with(raw_value, self.options());
        let classification = classify_value(&value, &range);

        Evaluation {
            parameter: template.name.clone(),
            unit: template.unit.clone(),
            reference_text: range.reference_text(),
            descriptor: describe_localized(classification, self.locale()),
            value,
            range,
            classification,
        }
    }

    /// Evaluate every panel parameter that has a recorded value
    ///
    /// Rows follow panel order. Parameters without a value are listed in
    /// `summary.missing`; values for names not in the panel are ignored.
    pub fn evaluate_study(&self, panel: &ParameterPanel, results: &StudyResults) -> StudyReport {
        let sex = self.config.sex_for(results.patient_sex.as_deref());
        let mut rows = Vec::with_capacity(panel.parameters.len());
        let mut missing = Vec::new();

        for template in &panel.parameters {
            match results.get(&template.name) {
                Some(raw) => rows.push(self.evaluate_parameter(template, raw, sex)),
                None => missing.push(template.name.clone()),
            }
        }

        for name in results.values.keys() {
            if panel.get_parameter(name).is_none() {
                log::warn!("value for '{}' has no template in panel '{}'", name, panel.id);
            }
        }

        let summary = StudySummary::from_rows(&rows, missing);
        log::info!(
            "evaluated panel '{}': {} rows, {} abnormal, {} critical",
            panel.id,
            summary.total,
            summary.abnormal,
            summary.critical
        );

        StudyReport {
            panel_id: panel.id.clone(),
            panel_name: panel.name.clone(),
            panel_fingerprint: panel.fingerprint(),
            patient_sex: sex,
            evaluated_at: Utc::now(),
            rows,
            summary,
        }
    }
}

/// Counts over a study's rows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StudySummary {
    pub total: usize,
    pub normal: usize,
    /// Outside the normal band, critical included
    pub abnormal: usize,
    pub critical: usize,
    pub unknown: usize,
    /// Panel parameters with no recorded value
    pub missing: Vec<String>,
}

impl StudySummary {
    fn from_rows(rows: &[Evaluation], missing: Vec<String>) -> Self {
        let count = |pred: fn(Classification) -> bool| {
            rows.iter().filter(|r| pred(r.classification)).count()
        };
        Self {
            total: rows.len(),
            normal: count(|c| c == Classification::Normal),
            abnormal: count(Classification::is_abnormal),
            critical: count(Classification::is_critical),
            unknown: count(|c| c == Classification::Unknown),
            missing,
        }
    }

    pub fn has_critical(&self) -> bool {
        self.critical > 0
    }
}

/// Evaluated study
#[derive(Debug, Clone, Serialize)]
pub struct StudyReport {
    pub panel_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel_name: Option<String>,
    pub panel_fingerprint: String,
    pub patient_sex: PatientSex,
    pub evaluated_at: DateTime<Utc>,
    pub rows: Vec<Evaluation>,
    pub summary: StudySummary,
}

/// A result row as shown to an unauthenticated verifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicResult {
    pub parameter: String,
    pub value: String,
    pub unit: String,
    pub reference_text: String,
    pub label: String,
    pub severity: SeverityColor,
}

impl StudyReport {
    /// Rows stripped down to what a printed report shows
    pub fn public_view(&self) -> Vec<PublicResult> {
        self.rows
            .iter()
            .map(|row| PublicResult {
                parameter: row.parameter.clone(),
                value: row.value.to_string(),
                unit: row.unit.clone(),
                reference_text: row.reference_text.clone(),
                label: row.descriptor.label.to_string(),
                severity: row.descriptor.severity,
            })
            .collect()
    }

    pub fn rows_with(&self, classification: Classification) -> impl Iterator<Item = &Evaluation> {
        self.rows
            .iter()
            .filter(move |r| r.classification == classification)
    }

    /// Fixed-width text table
    pub fn to_report(&self) -> String {
        let mut out = String::new();
        let title = self.panel_name.as_deref().unwrap_or(&self.panel_id);
        out.push_str(&format!("{} ({})\n", title, self.panel_fingerprint));
        out.push_str(&format!("Patient sex: {}\n\n", self.patient_sex));

        let name_width = self
            .rows
            .iter()
            .map(|r| r.parameter.chars().count())
            .max()
            .unwrap_or(0)
            .max("Parameter".len());

        out.push_str(&format!(
            "{:<name_width$}  {:>10}  {:<10}  {:<16}  {}\n",
            "Parameter", "Value", "Unit", "Reference", "Flag"
        ));
        for row in &self.rows {
            let flag = if row.descriptor.is_blank() {
                String::new()
            } else {
                format!("{} {}", row.descriptor.icon, row.descriptor.label)
            };
            out.push_str(&format!(
                "{:<name_width$}  {:>10}  {:<10}  {:<16}  {}\n",
                row.parameter,
                row.value.to_string(),
                row.unit,
                row.reference_text,
                flag
            ));
        }

        let s = &self.summary;
        out.push_str(&format!(
            "\n{} result(s): {} normal, {} abnormal ({} critical), {} unclassified\n",
            s.total, s.normal, s.abnormal, s.critical, s.unknown
        ));
        if !s.missing.is_empty() {
            out.push_str(&format!("Not recorded: {}\n", s.missing.join(", ")));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glucose() -> ParameterTemplate {
        ParameterTemplate::new("Glucose", "mg/dL")
            .with_range(Some("70"), Some("100"))
            .with_critical(Some("40"), Some("400"))
    }

    fn panel() -> ParameterPanel {
        ParameterPanel {
            id: "chem".into(),
            name: Some("Chemistry".into()),
            description: None,
            parameters: vec![
                ParameterTemplate::new("Hemoglobin", "g/dL")
                    .with_range(Some("13.5"), Some("17.5"))
                    .with_female_range(Some("12.0"), Some("15.5"))
                    .with_critical(Some("7.0"), None),
                glucose(),
                ParameterTemplate::new("Urine protein", ""),
                ParameterTemplate::new("Creatinine", "mg/dL").with_range(Some("0.6"), Some("1.2")),
            ],
        }
    }

    fn results(sex: Option<&str>, values: &[(&str, &str)]) -> StudyResults {
        StudyResults {
            patient_sex: sex.map(str::to_string),
            values: values
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_single_evaluation() {
        let e = evaluate(&glucose(), "95", PatientSex::Unspecified);
        assert_eq!(e.classification, Classification::Normal);
        assert_eq!(e.descriptor.label, "Normal");
        assert_eq!(e.reference_text, "70 - 100");
        assert_eq!(e.unit, "mg/dL");
    }

    #[test]
    fn test_study_report() {
        let study = results(
            Some("F"),
            &[
                ("Hemoglobin", "6.1"),
                ("Glucose", "120"),
                ("Urine protein", "Negative"),
                ("Potassium", "4.0"),
            ],
        );
        let report = Evaluator::default().evaluate_study(&panel(), &study);

        assert_eq!(report.patient_sex, PatientSex::Female);
        let names: Vec<_> = report.rows.iter().map(|r| r.parameter.as_str()).collect();
        assert_eq!(names, vec!["Hemoglobin", "Glucose", "Urine protein"]);

        assert_eq!(report.rows[0].classification, Classification::CriticalLow);
        assert_eq!(report.rows[0].reference_text, "12.0 - 15.5");
        assert_eq!(report.rows[1].classification, Classification::High);
        assert_eq!(report.rows[2].classification, Classification::Unknown);

        let s = &report.summary;
        assert_eq!((s.total, s.normal, s.abnormal, s.critical, s.unknown), (3, 0, 2, 1, 1));
        assert_eq!(s.missing, vec!["Creatinine".to_string()]);
        assert!(s.has_critical());
        assert_eq!(report.rows_with(Classification::High).count(), 1);
    }

    #[test]
    fn test_localized_labels_and_decimal_comma() {
        let evaluator = Evaluator::new(EvalConfig {
            locale: Locale::Es,
            decimal_comma: true,
            default_sex: None,
        });
        let e = evaluator.evaluate_parameter(&glucose(), "65,5", PatientSex::Male);
        assert_eq!(e.classification, Classification::Low);
        assert_eq!(e.descriptor.label, "Bajo");
    }

    #[test]
    fn test_public_view_is_sanitized() {
        let study = results(None, &[("Glucose", "95"), ("Urine protein", "Negative")]);
        let report = Evaluator::default().evaluate_study(&panel(), &study);
        let public = report.public_view();

        assert_eq!(public.len(), 2);
        assert_eq!(public[0].value, "95");
        assert_eq!(public[0].label, "Normal");
        assert_eq!(public[1].value, "Negative");
        assert_eq!(public[1].label, "");
        assert_eq!(public[1].severity, SeverityColor::Neutral);

        let json = serde_json::to_string(&public).unwrap();
        assert!(!json.contains("fingerprint"));
        assert!(!json.contains("critical_min"));
    }

    #[test]
    fn test_text_report() {
        let study = results(Some("M"), &[("Hemoglobin", "14.0"), ("Glucose", "401")]);
        let text = Evaluator::default().evaluate_study(&panel(), &study).to_report();
        assert!(text.starts_with("Chemistry (sha256:"));
        assert!(text.contains("Patient sex: male"));
        assert!(text.contains("⇈ Critical high"));
        assert!(text.contains("Not recorded: Urine protein, Creatinine"));
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let study = StudyResults::from_yaml("values:\n  Hemoglobin: 14.0\n  Glucose:\n").unwrap();
        let report = Evaluator::default().evaluate_study(&panel(), &study);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].value.to_string(), "14.0");
        assert!(report.summary.missing.contains(&"Glucose".to_string()));
    }

    #[test]
    fn test_repeated_evaluation_is_identical() {
        let a = evaluate(&glucose(), "151", PatientSex::Female);
        let b = evaluate(&glucose(), "151", PatientSex::Female);
        assert_eq!(a, b);
    }
}
