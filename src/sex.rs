//! Patient sex - the closed type the range resolver works with
//!
//! Patient records carry sex as free text ("F", "Female", "Mujer", ...).
//! Normalization happens once, here, so nothing downstream ever compares
//! strings.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

const FEMALE_SPELLINGS: &[&str] = &["female", "f", "mujer"];
const MALE_SPELLINGS: &[&str] = &["male", "m", "hombre"];

/// Sex used to pick a reference band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum PatientSex {
    Male,
    Female,
    #[default]
    Unspecified,
}

impl PatientSex {
    /// Normalize a free-text sex field
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Anything that is not a known spelling is `Unspecified`.
    ///
    /// ```
    /// use labeval::PatientSex;
    /// assert_eq!(PatientSex::normalize(" Mujer "), PatientSex::Female);
    /// assert_eq!(PatientSex::normalize("M"), PatientSex::Male);
    /// assert_eq!(PatientSex::normalize("x"), PatientSex::Unspecified);
    /// ```
    pub fn normalize(raw: &str) -> Self {
        let lowered = raw.trim().to_lowercase();
        if FEMALE_SPELLINGS.contains(&lowered.as_str()) {
            PatientSex::Female
        } else if MALE_SPELLINGS.contains(&lowered.as_str()) {
            PatientSex::Male
        } else {
            PatientSex::Unspecified
        }
    }

    /// Normalize an optional field, treating a missing value as unspecified
    pub fn from_optional(raw: Option<&str>) -> Self {
        raw.map(Self::normalize).unwrap_or_default()
    }

    /// Whether the female band applies
    pub fn is_female(self) -> bool {
        self == PatientSex::Female
    }
}

impl FromStr for PatientSex {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::normalize(s))
    }
}

impl From<String> for PatientSex {
    fn from(s: String) -> Self {
        Self::normalize(&s)
    }
}

impl From<&str> for PatientSex {
    fn from(s: &str) -> Self {
        Self::normalize(s)
    }
}

impl std::fmt::Display for PatientSex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatientSex::Male => write!(f, "male"),
            PatientSex::Female => write!(f, "female"),
            PatientSex::Unspecified => write!(f, "unspecified"),
        }
    }
}
