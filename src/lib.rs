// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # labeval - clinical laboratory result evaluation
//!
//! Decides how a laboratory result is flagged on screen, on a printed
//! report, and on the public verification page.
//!
//! ## Core Concept
//!
//! A **parameter template** stores reference bands as the laboratory typed
//! them: one band for men, optionally one for women, and optional critical
//! thresholds. Evaluating a result is three pure steps:
//!
//! - **Resolve** the band that applies to the patient's sex
//! - **Classify** the measured value against it
//! - **Describe** the classification for a renderer
//!
//! ## Quick Start
//!
//! ```rust
//! use labeval::{classify, describe, resolve_range, Classification, ParameterTemplate, PatientSex};
//!
//! let hemoglobin = ParameterTemplate::new("Hemoglobin", "g/dL")
//!     .with_range(Some("13.5"), Some("17.5"))
//!     .with_female_range(Some("12.0"), Some("15.5"))
//!     .with_critical(Some("7.0"), None);
//!
//! let range = resolve_range(&hemoglobin, PatientSex::normalize("F"));
//! let status = classify("11.4", &range);
//!
//! assert_eq!(status, Classification::Low);
//! assert_eq!(describe(status).label, "Low");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                                                               │
//! │  ParameterTemplate + PatientSex                               │
//! │       │                                                       │
//! │       └──► resolve_range ──► ResolvedRange                    │
//! │                                   │                           │
//! │  raw value ──► MeasuredValue ─────┤                           │
//! │                                   │                           │
//! │                                   └──► classify               │
//! │                                           │                   │
//! │                                           ▼                   │
//! │                                     Classification            │
//! │                                           │                   │
//! │                                           └──► describe       │
//! │                                                   │           │
//! │                                                   ▼           │
//! │                                           DisplayDescriptor   │
//! │                                                               │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in the core fails. A value that cannot be compared is
//! `Classification::Unknown`, which renders as an empty cell.

// Core
pub mod classify;
pub mod describe;
pub mod range;
pub mod sex;
pub mod value;

// Boundary
pub mod config;
pub mod error;
pub mod evaluate;
pub mod template;
pub mod validate;

// Re-exports
pub use classify::{classify, classify_value, Classification};
pub use config::EvalConfig;
pub use describe::{describe, describe_localized, DisplayDescriptor, Locale, SeverityColor};
pub use error::{Error, Result};
pub use evaluate::{evaluate, Evaluation, Evaluator, PublicResult, StudyReport, StudySummary};
pub use range::{resolve_range, resolve_range_with, ResolvedRange};
pub use sex::PatientSex;
pub use template::{ParameterPanel, ParameterTemplate, StudyResults};
pub use validate::{validate_panel, PanelIssue, PanelValidation};
pub use value::{MeasuredValue, ParseOptions};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
