//! labeval configuration
//!
//! Handles loading of `labeval.yaml`, either from an explicit path or from
//! the working directory. Every field has a default, so an empty file (or
//! no file at all) is a valid configuration.
//!
//! ```yaml
//! locale: es
//! decimal_comma: true
//! default_sex: F
//! ```

use crate::describe::Locale;
use crate::error::{Error, Result};
use crate::sex::PatientSex;
use crate::value::ParseOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name looked up by [`EvalConfig::load_from_dir`]
pub const CONFIG_FILE: &str = "labeval.yaml";

/// Evaluation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(title = "labeval config")]
pub struct EvalConfig {
    /// Language of descriptor labels
    #[serde(default = "default_locale")]
    pub locale: Locale,

    /// Read `12,5` as `12.5` in values and bounds
    #[serde(default)]
    pub decimal_comma: bool,

    /// Sex assumed when a study does not record one (free text, normalized)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sex: Option<String>,
}

fn default_locale() -> Locale {
    Locale::En
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            decimal_comma: false,
            default_sex: None,
        }
    }
}

impl EvalConfig {
    /// Parse config from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_norway::from_str(yaml).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load config from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(Error::Io)?;
        let config = Self::from_yaml(&content)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `labeval.yaml` from a directory, if present
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let file = dir.join(CONFIG_FILE);
        if !file.exists() {
            return Ok(None);
        }
        Self::load(&file).map(Some)
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            decimal_comma: self.decimal_comma,
        }
    }

    /// Sex to use for a study, falling back to `default_sex`
    pub fn sex_for(&self, recorded: Option<&str>) -> PatientSex {
        match recorded.map(PatientSex::normalize) {
            Some(sex) if sex != PatientSex::Unspecified => sex,
            _ => PatientSex::from_optional(self.default_sex.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = EvalConfig::from_yaml("").unwrap();
        assert_eq!(config, EvalConfig::default());
        assert_eq!(config.locale, Locale::En);
        assert!(!config.parse_options().decimal_comma);
    }

    #[test]
    fn test_partial_file() {
        let config = EvalConfig::from_yaml("locale: es\n").unwrap();
        assert_eq!(config.locale, Locale::Es);
        assert!(!config.decimal_comma);

        let config = EvalConfig::from_yaml("decimal_comma: true\n").unwrap();
        assert_eq!(config.locale, default_locale());
        assert_eq!(config.default_sex, None);
    }

    #[test]
    fn test_unknown_locale_is_error() {
        let err = EvalConfig::from_yaml("locale: fr\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_sex_fallback() {
        let config = EvalConfig {
            default_sex: Some("mujer".into()),
            ..Default::default()
        };
        assert_eq!(config.sex_for(Some("M")), PatientSex::Male);
        assert_eq!(config.sex_for(Some("?")), PatientSex::Female);
        assert_eq!(config.sex_for(None), PatientSex::Female);
        assert_eq!(EvalConfig::default().sex_for(None), PatientSex::Unspecified);
    }

    #[test]
    fn test_load_from_dir() {
        let dir = TempDir::new().unwrap();
        assert!(EvalConfig::load_from_dir(dir.path()).unwrap().is_none());

        std::fs::write(dir.path().join(CONFIG_FILE), "decimal_comma: true\n").unwrap();
        let config = EvalConfig::load_from_dir(dir.path()).unwrap().unwrap();
        assert!(config.decimal_comma);
    }
}
