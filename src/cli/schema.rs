//! Schema CLI command

use labeval::*;
use std::process::ExitCode;

pub fn cmd_schema(name: &str) -> Result<ExitCode> {
    let schema = match name {
        "panel" => schemars::schema_for!(ParameterPanel),
        "results" => schemars::schema_for!(StudyResults),
        "config" => schemars::schema_for!(EvalConfig),
        other => {
            return Err(format!(
                "Unknown schema '{}'. Available: panel, results, config",
                other
            )
            .into())
        }
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(ExitCode::SUCCESS)
}
