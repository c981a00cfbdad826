//! IBKR connection settings.
//!
//! Paper and live gateways listen on different ports; which one is used is
//! decided by the aggregate `Settings`, since it depends on the environment.

use super::env_source::{self, EnvSource};
use super::errors::ConfigError;
use serde::Serialize;

/// IBKR TWS / Gateway connection configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionSettings {
    pub host: String,
    pub paper_port: u16,
    pub live_port: u16,
    pub client_id: i32,
    pub timeout_secs: u64,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            paper_port: 7497,
            live_port: 7496,
            client_id: 1,
            timeout_secs: 10,
        }
    }
}

impl ConnectionSettings {
    pub fn from_source(source: &impl EnvSource) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: env_source::string(source, "IBKR_HOST", &defaults.host),
            // IBKR_PORT is the single-port name older deployments use
            paper_port: env_source::integer_aliased(
                source,
                &["IBKR_PAPER_PORT", "IBKR_PORT"],
                defaults.paper_port,
            )?,
            live_port: env_source::integer(source, "IBKR_LIVE_PORT", defaults.live_port)?,
            client_id: env_source::integer(source, "IBKR_CLIENT_ID", defaults.client_id)?,
            timeout_secs: env_source::integer(source, "IBKR_TIMEOUT", defaults.timeout_secs)?,
        })
    }

    /// Port for the requested trading mode.
    pub fn port_for(&self, paper_trading: bool) -> u16 {
        if paper_trading {
            self.paper_port
        } else {
            self.live_port
        }
    }
}
