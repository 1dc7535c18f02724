//! CLI utility helpers

use labeval::{config::CONFIG_FILE, EvalConfig, Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Initialize `env_logger`; `RUST_LOG` wins over `-v`
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Load the explicit config, or `labeval.yaml` from the working directory
pub fn load_config(explicit: Option<&Path>) -> Result<EvalConfig> {
    if let Some(path) = explicit {
        return EvalConfig::load(path);
    }
    let cwd = std::env::current_dir().map_err(Error::Io)?;
    match EvalConfig::load_from_dir(&cwd)? {
        Some(config) => {
            log::info!("using {}", cwd.join(CONFIG_FILE).display());
            Ok(config)
        }
        None => Ok(EvalConfig::default()),
    }
}

/// Write content to file or stdout
pub fn write_output(path: &Option<PathBuf>, content: &str) -> Result<()> {
    match path {
        Some(p) => {
            fs::write(p, content).map_err(Error::Io)?;
            eprintln!("Written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
