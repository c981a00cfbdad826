//! Configuration module for the IBKR options trader.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by section: Broker, Database, Trading, Monitoring, and Backtest.
//!
//! Settings are loaded once into an immutable [`Settings`] value which callers
//! pass around explicitly. To pick up changed variables, load a new value.

mod backtest_config;
mod broker_config;
mod database_config;
pub mod env_source;
mod environment;
mod errors;
mod monitoring_config;
mod trading_config;
mod validation;

pub use backtest_config::BacktestSettings;
pub use broker_config::ConnectionSettings;
pub use database_config::DatabaseSettings;
pub use env_source::{EnvSource, ProcessEnv, load_dotenv, load_dotenv_from};
pub use environment::Environment;
pub use errors::ConfigError;
pub use monitoring_config::MonitoringSettings;
pub use trading_config::{DEFAULT_TARGET_SYMBOLS, TradingLimits};
pub use validation::{ValidationCheck, ValidationReport, validate};

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Filesystem locations derived from the project root. Never created here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub data_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub config_dir: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            data_dir: root.join("data"),
            logs_dir: root.join("logs"),
            config_dir: root.join("config"),
            root,
        }
    }

    /// `PROJECT_ROOT` when set, otherwise the crate manifest directory.
    pub fn default_root(source: &impl EnvSource) -> PathBuf {
        source
            .get("PROJECT_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")))
    }
}

/// Main application configuration.
///
/// Owns one instance of each section. Nothing is mutated after loading, so a
/// `Settings` (or an `Arc<Settings>`) can be shared freely across threads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub environment: Environment,
    /// Raw `PAPER_TRADING` flag. Use [`Settings::is_paper_trading`] for the
    /// effective mode.
    pub paper_trading: bool,

    pub ibkr: ConnectionSettings,
    pub database: DatabaseSettings,
    pub trading: TradingLimits,
    pub monitoring: MonitoringSettings,
    pub backtest: BacktestSettings,

    pub paths: ProjectPaths,
}

impl Settings {
    /// Load configuration from the process environment.
    ///
    /// Does not read `.env` by itself; call [`load_dotenv`] first (or use
    /// [`get_config`]) to pre-populate the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let root = ProjectPaths::default_root(&ProcessEnv);
        Self::from_source(&ProcessEnv, root)
    }

    /// Load configuration from any environment source, resolving paths
    /// against `project_root`.
    pub fn from_source(
        source: &impl EnvSource,
        project_root: impl AsRef<Path>,
    ) -> Result<Self, ConfigError> {
        let environment_str = env_source::string(source, "ENVIRONMENT", "development");
        let environment = Environment::from(environment_str.as_str());

        let paper_trading = env_source::boolean(source, "PAPER_TRADING", "true");

        let settings = Self {
            environment,
            paper_trading,
            ibkr: ConnectionSettings::from_source(source)?,
            database: DatabaseSettings::from_source(source)?,
            trading: TradingLimits::from_source(source)?,
            monitoring: MonitoringSettings::from_source(source)?,
            backtest: BacktestSettings::from_source(source)?,
            paths: ProjectPaths::new(project_root.as_ref()),
        };

        info!(
            "Configuration loaded: Environment={}, PaperTrading={}, Port={}, Symbols={:?}",
            settings.environment,
            settings.is_paper_trading(),
            settings.effective_port(),
            settings.trading.target_symbols
        );

        Ok(settings)
    }

    /// Paper trading is forced on everywhere except production.
    pub fn is_paper_trading(&self) -> bool {
        self.paper_trading || !self.environment.is_production()
    }

    /// Paper port when paper trading, live port otherwise.
    pub fn effective_port(&self) -> u16 {
        self.ibkr.port_for(self.is_paper_trading())
    }

    pub fn validate(&self) -> ValidationReport {
        validate(self)
    }

    pub fn summarize(&self) -> String {
        summarize(self)
    }
}

/// Human-readable report of the key fields and the validation outcome.
pub fn summarize(settings: &Settings) -> String {
    let report = validate(settings);

    let mut out = format!(
        "=== CONFIGURATION SUMMARY ===\n\
         Environment: {}\n\
         Paper Trading: {}\n\
         IBKR Port: {}\n\
         Target Symbols: {:?}\n\
         Max Portfolio Delta: {}\n\
         Database: {}\n\
         \n\
         Validation: {}\n",
        settings.environment,
        settings.is_paper_trading(),
        settings.effective_port(),
        settings.trading.target_symbols,
        settings.trading.max_portfolio_delta,
        settings.database.url,
        report.is_valid(),
    );

    for (check, passed) in report.iter() {
        let marker = if passed { "✅" } else { "❌" };
        out.push_str(&format!("  {check}: {marker}\n"));
    }
    out
}

pub fn print_summary(settings: &Settings) {
    print!("{}", summarize(settings));
}

/// Loads `.env` if present, then the process environment.
pub fn get_config() -> Result<Settings, ConfigError> {
    load_dotenv()?;
    Settings::from_env()
}
