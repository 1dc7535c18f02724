//! labeval CLI - Command-line interface
//!
//! Commands:
//!   evaluate - Evaluate a study's results against a panel
//!   classify - Classify a single value against ad-hoc bounds
//!   validate - Check a panel for unusable ranges
//!   schema   - Print JSON schema for an input file

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "labeval")]
#[command(version = labeval::VERSION)]
#[command(about = "Evaluate laboratory results against sex-aware reference ranges", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: ./labeval.yaml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate recorded values against a parameter panel
    Evaluate {
        /// Panel file (YAML or JSON)
        panel: PathBuf,

        /// Results file (YAML or JSON)
        results: PathBuf,

        /// Override the patient sex recorded in the results file
        #[arg(long)]
        sex: Option<String>,

        /// JSON output
        #[arg(long)]
        json: bool,

        /// Only print the sanitized public view
        #[arg(long)]
        public: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Classify one value
    Classify {
        /// Measured value as recorded
        value: String,

        #[arg(long)]
        min: Option<String>,

        #[arg(long)]
        max: Option<String>,

        #[arg(long)]
        critical_min: Option<String>,

        #[arg(long)]
        critical_max: Option<String>,

        /// JSON output
        #[arg(long)]
        json: bool,
    },

    /// Validate a panel for impossible or masked ranges
    Validate {
        /// Panel file (YAML or JSON)
        panel: PathBuf,

        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,

        /// JSON output
        #[arg(long)]
        json: bool,
    },

    /// Print JSON schema for panel, results, or config files
    Schema {
        #[arg(default_value = "panel")]
        name: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli::util::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Evaluate {
            panel,
            results,
            sex,
            json,
            public,
            output,
        } => cli::evaluate::cmd_evaluate(cli::evaluate::EvaluateArgs {
            panel,
            results,
            sex,
            json,
            public,
            output,
            config: cli.config,
        }),
        Commands::Classify {
            value,
            min,
            max,
            critical_min,
            critical_max,
            json,
        } => cli::classify::cmd_classify(cli::classify::ClassifyArgs {
            value,
            min,
            max,
            critical_min,
            critical_max,
            json,
            config: cli.config,
        }),
        Commands::Validate {
            panel,
            strict,
            json,
        } => cli::validate::cmd_validate(&panel, strict, json, cli.config.as_deref()),
        Commands::Schema { name } => cli::schema::cmd_schema(&name),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
