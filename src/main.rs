//! IBKR Settings - configuration inspector
//!
//! Loads the trading configuration the same way the trading processes do
//! (`.env` first, then the process environment) and reports it.
//!
//! # Usage
//! ```sh
//! ENVIRONMENT=production PAPER_TRADING=false cargo run -- --check
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use ibkr_settings::config::{self, Settings};
use ibkr_settings::logging;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about = "Inspect and validate trading configuration", long_about = None)]
struct Cli {
    /// Env file to load instead of searching for `.env`
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Print the loaded settings as JSON instead of the summary
    #[arg(long)]
    json: bool,

    /// Exit with status 1 if any validation check fails
    #[arg(long)]
    check: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging first so records emitted while loading are kept
    let log_handle = logging::init();

    // Load Env (before reading anything)
    match &cli.env_file {
        Some(path) => {
            config::load_dotenv_from(path)
                .with_context(|| format!("Failed to load env file {:?}", path))?;
        }
        None => {
            if config::load_dotenv()?.is_none() {
                info!("No env file loaded, using process environment only");
            }
        }
    }

    let settings = Settings::from_env().context("Failed to load configuration")?;

    logging::set_default_level(&log_handle, settings.monitoring.tracing_level())
        .context("Failed to apply LOG_LEVEL")?;

    if cli.json {
        let json =
            serde_json::to_string_pretty(&settings).context("Failed to serialize settings")?;
        println!("{}", json);
    } else {
        config::print_summary(&settings);
    }

    if cli.check {
        let report = settings.validate();
        if !report.is_valid() {
            let failed: Vec<&str> = report.failed().iter().map(|check| check.name()).collect();
            tracing::error!("Configuration invalid: {}", failed.join(", "));
            std::process::exit(1);
        }
    }

    Ok(())
}
