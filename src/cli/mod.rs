//! CLI command implementations
//!
//! - `evaluate`: Study evaluation against a panel
//! - `classify`: Single-value classification
//! - `validate`: Panel validation
//! - `schema`: JSON schema output
//! - `util`: Shared utility functions

pub mod classify;
pub mod evaluate;
pub mod schema;
pub mod util;
pub mod validate;
