//! Ad-hoc classification command

use super::util::load_config;
use labeval::*;
use std::path::PathBuf;
use std::process::ExitCode;

pub struct ClassifyArgs {
    pub value: String,
    pub min: Option<String>,
    pub max: Option<String>,
    pub critical_min: Option<String>,
    pub critical_max: Option<String>,
    pub json: bool,
    pub config: Option<PathBuf>,
}

pub fn cmd_classify(args: ClassifyArgs) -> Result<ExitCode> {
    let config = load_config(args.config.as_deref())?;
    let template = ParameterTemplate::new("value", "")
        .with_range(args.min.as_deref(), args.max.as_deref())
        .with_critical(args.critical_min.as_deref(), args.critical_max.as_deref());

    let evaluation =
        Evaluator::new(config).evaluate_parameter(&template, &args.value, PatientSex::Unspecified);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
    } else {
        let d = evaluation.descriptor;
        println!(
            "{} {} ({}) [{}]",
            evaluation.classification,
            d.icon,
            if d.label.is_empty() { "-" } else { d.label },
            evaluation.reference_text
        );
    }
    Ok(ExitCode::SUCCESS)
}
