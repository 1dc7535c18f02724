//! Validation CLI command

use super::util::load_config;
use labeval::*;
use std::path::Path;
use std::process::ExitCode;

pub fn cmd_validate(
    panel_path: &Path,
    strict: bool,
    json_output: bool,
    config_path: Option<&Path>,
) -> Result<ExitCode> {
    let config = load_config(config_path)?;
    let panel = ParameterPanel::load(panel_path)?;
    let report = validate_panel(&panel, config.parse_options());

    if json_output {
        let output = serde_json::json!({
            "valid": !report.has_errors(),
            "errors": report.error_count(),
            "warnings": report.warning_count(),
            "issues": &report.issues,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", report.to_report());
    }

    let failed = report.has_errors() || (strict && report.warning_count() > 0);
    if failed {
        return Err("Panel validation failed".into());
    }
    Ok(ExitCode::SUCCESS)
}
