//! Measured values and bounds
//!
//! Laboratory results are recorded as text because not every result is a
//! number ("Negative", "Trazas", "> 1000"). A raw string is split once into
//! [`MeasuredValue::Numeric`] or [`MeasuredValue::Text`]; only the numeric
//! variant can ever be classified.

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;

static PLAIN_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)$").expect("valid regex"));

static COMMA_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+,\d+$").expect("valid regex"));

/// Options controlling how raw strings are read as numbers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Accept `12,5` as `12.5`
    pub decimal_comma: bool,
}

/// A recorded result, numeric or free text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum MeasuredValue {
    Numeric(Decimal),
    Text(String),
}

impl MeasuredValue {
    /// Parse with default options
    pub fn parse(raw: &str) -> Self {
        Self::parse_with(raw, ParseOptions::default())
    }

    /// Parse a raw result string
    ///
    /// Surrounding whitespace is ignored. Anything other than a plain
    /// signed decimal such as `12`, `12.5` or `.5` is kept as text.
    pub fn parse_with(raw: &str, options: ParseOptions) -> Self {
        let trimmed = raw.trim();
        match parse_decimal(trimmed, options) {
            Some(value) => MeasuredValue::Numeric(value),
            None => MeasuredValue::Text(trimmed.to_string()),
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            MeasuredValue::Numeric(d) => Some(*d),
            MeasuredValue::Text(_) => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, MeasuredValue::Numeric(_))
    }
}

impl std::fmt::Display for MeasuredValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeasuredValue::Numeric(d) => write!(f, "{}", d),
            MeasuredValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Read an optional template bound
///
/// Absent, blank, and non-numeric bounds all mean "no limit on this side".
pub fn parse_bound(raw: Option<&str>, options: ParseOptions) -> Option<Decimal> {
    let raw = raw?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = parse_decimal(trimmed, options);
    if parsed.is_none() {
        log::warn!("ignoring non-numeric reference bound {:?}", raw);
    } else {
        log::trace!("parsed bound {:?} -> {:?}", raw, parsed);
    }
    parsed
}

fn parse_decimal(trimmed: &str, options: ParseOptions) -> Option<Decimal> {
    let normalized = if PLAIN_DECIMAL.is_match(trimmed) {
        trimmed.to_string()
    } else if options.decimal_comma && COMMA_DECIMAL.is_match(trimmed) {
        trimmed.replacen(',', ".", 1)
    } else {
        return None;
    };
    let unsigned = normalized.strip_prefix('+').unwrap_or(&normalized);
    Decimal::from_str(unsigned).ok()
}
