//! Monitoring configuration parsing from environment variables.
//!
//! This module handles loading logging, dashboard and alerting settings.

use super::env_source::{self, EnvSource};
use super::errors::ConfigError;
use serde::Serialize;
use tracing::Level;

/// Monitoring and alerting configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitoringSettings {
    pub log_level: String,
    pub max_log_files: u32,
    pub log_file_size_mb: u64,

    pub dashboard_host: String,
    pub dashboard_port: u16,
    pub dashboard_debug: bool,

    pub alert_portfolio_delta: f64,
    pub alert_daily_loss: f64,
    pub alert_system_error_count: u32,
}

impl Default for MonitoringSettings {
    fn default() -> Self {
        Self {
            log_level: "INFO".to_string(),
            max_log_files: 30,
            log_file_size_mb: 10,
            dashboard_host: "127.0.0.1".to_string(),
            dashboard_port: 8050,
            dashboard_debug: false,
            alert_portfolio_delta: 80.0,
            alert_daily_loss: 0.015,
            alert_system_error_count: 5,
        }
    }
}

impl MonitoringSettings {
    pub fn from_source(source: &impl EnvSource) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            log_level: env_source::string(source, "LOG_LEVEL", &defaults.log_level),
            max_log_files: env_source::integer(source, "MAX_LOG_FILES", defaults.max_log_files)?,
            log_file_size_mb: env_source::integer(
                source,
                "LOG_FILE_SIZE_MB",
                defaults.log_file_size_mb,
            )?,
            dashboard_host: env_source::string(source, "DASHBOARD_HOST", &defaults.dashboard_host),
            dashboard_port: env_source::integer(source, "DASHBOARD_PORT", defaults.dashboard_port)?,
            dashboard_debug: env_source::boolean(
                source,
                "DASHBOARD_DEBUG",
                &defaults.dashboard_debug.to_string(),
            ),
            alert_portfolio_delta: env_source::float(
                source,
                "ALERT_PORTFOLIO_DELTA",
                defaults.alert_portfolio_delta,
            )?,
            alert_daily_loss: env_source::float(
                source,
                "ALERT_DAILY_LOSS",
                defaults.alert_daily_loss,
            )?,
            alert_system_error_count: env_source::integer(
                source,
                "ALERT_SYSTEM_ERROR_COUNT",
                defaults.alert_system_error_count,
            )?,
        })
    }

    /// Maps the configured level name onto a tracing level.
    ///
    /// Accepts the usual names in any case, plus `WARNING` and `CRITICAL`.
    /// Anything unrecognised falls back to `INFO`.
    pub fn tracing_level(&self) -> Level {
        match self.log_level.to_uppercase().as_str() {
            "TRACE" => Level::TRACE,
            "DEBUG" => Level::DEBUG,
            "WARN" | "WARNING" => Level::WARN,
            "ERROR" | "CRITICAL" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}
