//! Study evaluation command

use super::util::{load_config, write_output};
use labeval::*;
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit code when any result is critical
pub const EXIT_CRITICAL: u8 = 2;

pub struct EvaluateArgs {
    pub panel: PathBuf,
    pub results: PathBuf,
    pub sex: Option<String>,
    pub json: bool,
    pub public: bool,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

pub fn cmd_evaluate(args: EvaluateArgs) -> Result<ExitCode> {
    let config = load_config(args.config.as_deref())?;
    let panel = ParameterPanel::load(&args.panel)?;
    let mut results = StudyResults::load(&args.results)?;
    if let Some(sex) = args.sex {
        results.patient_sex = Some(sex);
    }

    let report = Evaluator::new(config).evaluate_study(&panel, &results);

    let content = match (args.public, args.json) {
        (true, _) => serde_json::to_string_pretty(&report.public_view())?,
        (false, true) => serde_json::to_string_pretty(&report)?,
        (false, false) => report.to_report(),
    };
    write_output(&args.output, &content)?;

    if report.summary.has_critical() {
        Ok(ExitCode::from(EXIT_CRITICAL))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
