//! Parameter templates and panels - the input data model
//!
//! A `ParameterTemplate` describes one measurable parameter of a study
//! (e.g. hemoglobin) with separate male and female reference bands and
//! optional critical thresholds. Templates are grouped into a
//! `ParameterPanel`, which is what a laboratory attaches to a study type.
//!
//! ## Example Panel
//!
//! ```yaml
//! id: hemograma
//! name: "Complete blood count"
//! parameters:
//!   - name: Hemoglobin
//!     unit: g/dL
//!     reference_min_male: "13.5"
//!     reference_max_male: "17.5"
//!     reference_min_female: "12.0"
//!     reference_max_female: "15.5"
//!     critical_min: "7.0"
//!     critical_max: "20.0"
//!   - name: Glucose
//!     unit: mg/dL
//!     reference_min_male: "70"
//!     reference_max_male: "100"
//! ```
//!
//! Bounds are kept as text, exactly as the laboratory typed them. They are
//! only read as numbers when a range is resolved.

use crate::error::{Error, Result};
use crate::validate::{validate_panel, PanelValidation};
use crate::value::ParseOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;

/// A single parameter definition with sex-specific bands
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ParameterTemplate {
    /// Parameter name as printed on reports
    pub name: String,

    /// Measurement unit
    #[serde(default)]
    pub unit: String,

    #[serde(default, alias = "referenceMinMale", skip_serializing_if = "Option::is_none")]
    pub reference_min_male: Option<String>,

    #[serde(default, alias = "referenceMaxMale", skip_serializing_if = "Option::is_none")]
    pub reference_max_male: Option<String>,

    #[serde(default, alias = "referenceMinFemale", skip_serializing_if = "Option::is_none")]
    pub reference_min_female: Option<String>,

    #[serde(default, alias = "referenceMaxFemale", skip_serializing_if = "Option::is_none")]
    pub reference_max_female: Option<String>,

    /// Critical thresholds apply to both sexes
    #[serde(default, alias = "criticalMin", skip_serializing_if = "Option::is_none")]
    pub critical_min: Option<String>,

    #[serde(default, alias = "criticalMax", skip_serializing_if = "Option::is_none")]
    pub critical_max: Option<String>,
}

impl ParameterTemplate {
    pub fn new(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            ..Default::default()
        }
    }

    /// Set the same band for both sexes
    pub fn with_range(mut self, min: Option<&str>, max: Option<&str>) -> Self {
        self.reference_min_male = min.map(str::to_string);
        self.reference_max_male = max.map(str::to_string);
        self
    }

    /// Override the band for female patients
    pub fn with_female_range(mut self, min: Option<&str>, max: Option<&str>) -> Self {
        self.reference_min_female = min.map(str::to_string);
        self.reference_max_female = max.map(str::to_string);
        self
    }

    pub fn with_critical(mut self, min: Option<&str>, max: Option<&str>) -> Self {
        self.critical_min = min.map(str::to_string);
        self.critical_max = max.map(str::to_string);
        self
    }
}

/// A named group of parameter templates
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[schemars(title = "Parameter Panel", description = "Reference ranges for a study type")]
pub struct ParameterPanel {
    /// Unique identifier
    pub id: String,

    /// Human-readable name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parameters in report order
    #[serde(default)]
    pub parameters: Vec<ParameterTemplate>,
}

impl ParameterPanel {
    /// Parse panel from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_norway::from_str(yaml).map_err(|e| Error::TemplateParse(e.to_string()))
    }

    /// Serialize panel to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_norway::to_string(self).map_err(|e| Error::TemplateParse(e.to_string()))
    }

    /// Parse panel from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let value = json_as_text(json).map_err(|e| Error::TemplateParse(e.to_string()))?;
        serde_json::from_value(value).map_err(|e| Error::TemplateParse(e.to_string()))
    }

    /// Serialize panel to JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::TemplateParse(e.to_string()))
    }

    /// Load a panel file; `.json` is read as JSON, anything else as YAML
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(Error::Io)?;
        let panel = if is_json(path) {
            Self::from_json(&content)?
        } else {
            Self::from_yaml(&content)?
        };
        log::debug!(
            "loaded panel '{}' ({} parameters) from {}",
            panel.id,
            panel.parameters.len(),
            path.display()
        );
        Ok(panel)
    }

    /// Get a parameter by name (case-insensitive)
    pub fn get_parameter(&self, name: &str) -> Option<&ParameterTemplate> {
        self.parameters
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Short content hash identifying the exact ranges in this panel
    ///
    /// Computed over the canonical JSON form, so formatting and key order
    /// in the source file do not matter.
    pub fn fingerprint(&self) -> String {
        let canonical = serde_json::to_vec(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        let hash = hex::encode(hasher.finalize());
        format!("sha256:{}", &hash[..16])
    }

    /// Advisory range checks with default parse options
    pub fn validate(&self) -> PanelValidation {
        validate_panel(self, ParseOptions::default())
    }
}

/// Recorded values for one study
///
/// ```yaml
/// patient_sex: F
/// values:
///   Hemoglobin: "11.2"
///   Glucose: "95"
///   Urine protein: Negative
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[schemars(title = "Study Results", description = "Measured values keyed by parameter name")]
pub struct StudyResults {
    /// Free-text sex as stored on the patient record
    #[serde(default, alias = "patientSex", skip_serializing_if = "Option::is_none")]
    pub patient_sex: Option<String>,

    /// Raw values by parameter name
    #[serde(default, deserialize_with = "value_map")]
    #[schemars(with = "BTreeMap<String, String>")]
    pub values: BTreeMap<String, String>,
}

// Empty entries (`Hb:` or `"Hb": null`) are treated as not recorded.
fn value_map<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Option<String>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(name, value)| match value {
            Some(v) if !v.trim().is_empty() => Some((name, v)),
            _ => {
                log::debug!("no value recorded for '{}'", name);
                None
            }
        })
        .collect())
}

impl StudyResults {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_norway::from_str(yaml).map_err(|e| Error::ResultsParse(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let value = json_as_text(json).map_err(|e| Error::ResultsParse(e.to_string()))?;
        serde_json::from_value(value).map_err(|e| Error::ResultsParse(e.to_string()))
    }

    /// Load a results file; `.json` is read as JSON, anything else as YAML
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(Error::Io)?;
        if is_json(path) {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    /// Look up a raw value by parameter name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .or_else(|| {
                self.values
                    .iter()
                    .find(|(k, _)| k.eq_ignore_ascii_case(name))
                    .map(|(_, v)| v)
            })
            .map(String::as_str)
    }
}

/// Parse JSON with every number and boolean replaced by its source text
///
/// Bounds and values are stored as written, so `12.0` must stay `12.0`
/// rather than round-tripping through `f64`.
fn json_as_text(json: &str) -> serde_json::Result<serde_json::Value> {
    let mut value: serde_json::Value = serde_json::from_str(json)?;
    scalars_to_text(&mut value);
    Ok(value)
}

fn scalars_to_text(value: &mut serde_json::Value) {
    use serde_json::Value;

    match value {
        Value::Number(n) => {
            let text = n.to_string();
            *value = Value::String(text);
        }
        Value::Bool(b) => {
            let text = b.to_string();
            *value = Value::String(text);
        }
        Value::Array(items) => items.iter_mut().for_each(scalars_to_text),
        Value::Object(map) => map.values_mut().for_each(scalars_to_text),
        Value::Null | Value::String(_) => {}
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}
