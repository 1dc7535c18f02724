//! Error types for labeval
//!
//! The evaluation core is total and never returns these. They only surface
//! when loading panels, results, or configuration from the outside world.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// labeval errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Template parse error: {0}")]
    TemplateParse(String),

    #[error("Results parse error: {0}")]
    ResultsParse(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_norway::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}
