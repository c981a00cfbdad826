//! Trading limits parsing from environment variables.
//!
//! This module handles loading position and Greek limits, loss limits,
//! market-making parameters and the options universe filters.

use super::env_source::{self, EnvSource};
use super::errors::ConfigError;
use serde::Serialize;

pub const DEFAULT_TARGET_SYMBOLS: &str = "AAPL,SPY,QQQ,TSLA";

/// Trading strategy and risk limit configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradingLimits {
    // Position Limits
    pub max_position_size: u32,
    pub max_portfolio_delta: f64,
    pub max_portfolio_gamma: f64,
    pub max_portfolio_vega: f64,

    // Risk Management
    pub max_daily_loss_pct: f64,
    pub max_single_symbol_pct: f64,
    pub stop_loss_pct: f64,

    // Market Making
    pub min_spread: f64,
    pub max_spread: f64,
    pub inventory_penalty: f64,
    pub volatility_adjustment: f64,

    // Trading Universe
    pub target_symbols: Vec<String>,
    pub min_volume: u64,
    pub min_open_interest: u64,
    pub min_days_to_expiration: u32,
    pub max_days_to_expiration: u32,

    // Market Data
    pub risk_free_rate: f64,
    pub volatility_window: u32,
}

impl TradingLimits {
    pub fn from_source(source: &impl EnvSource) -> Result<Self, ConfigError> {
        Ok(Self {
            max_position_size: env_source::integer_aliased(
                source,
                &["MAX_POSITION_SIZE", "MAX_POSITION_PER_OPTION"],
                10,
            )?,
            max_portfolio_delta: env_source::float(source, "MAX_PORTFOLIO_DELTA", 100.0)?,
            max_portfolio_gamma: env_source::float(source, "MAX_PORTFOLIO_GAMMA", 5.0)?,
            max_portfolio_vega: env_source::float(source, "MAX_PORTFOLIO_VEGA", 500.0)?,

            max_daily_loss_pct: env_source::float(source, "MAX_DAILY_LOSS_PCT", 0.02)?,
            max_single_symbol_pct: env_source::float(source, "MAX_SINGLE_SYMBOL_PCT", 0.30)?,
            stop_loss_pct: env_source::float(source, "STOP_LOSS_PCT", 0.05)?,

            min_spread: env_source::float(source, "MIN_SPREAD", 0.05)?,
            max_spread: env_source::float(source, "MAX_SPREAD", 0.50)?,
            inventory_penalty: env_source::float(source, "INVENTORY_PENALTY", 0.01)?,
            volatility_adjustment: env_source::float(source, "VOLATILITY_ADJUSTMENT", 0.02)?,

            target_symbols: env_source::list(source, "TARGET_SYMBOLS", DEFAULT_TARGET_SYMBOLS),
            min_volume: env_source::integer(source, "MIN_VOLUME", 100)?,
            min_open_interest: env_source::integer(source, "MIN_OPEN_INTEREST", 50)?,
            min_days_to_expiration: env_source::integer(source, "MIN_DTE", 7)?,
            max_days_to_expiration: env_source::integer(source, "MAX_DTE", 45)?,

            risk_free_rate: env_source::float(source, "RISK_FREE_RATE", 0.05)?,
            volatility_window: env_source::integer(source, "VOLATILITY_WINDOW", 30)?,
        })
    }

    /// Daily loss limit lies strictly between 0 and 10%.
    pub fn risk_limits_sane(&self) -> bool {
        self.max_daily_loss_pct > 0.0 && self.max_daily_loss_pct < 0.1
    }
}
