use super::env_source::{self, EnvSource};
use super::errors::ConfigError;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestSettings {
    pub commission_per_contract: Decimal,
    /// Basis points
    pub slippage_bps: f64,
    pub initial_capital: Decimal,
    pub benchmark_symbol: String,
    pub risk_free_rate_source: String,
}

impl BacktestSettings {
    pub fn from_source(source: &impl EnvSource) -> Result<Self, ConfigError> {
        let commission_per_contract = env_source::decimal(source, "COMMISSION_PER_CONTRACT", 0.65)?;

        let slippage_bps = env_source::float(source, "SLIPPAGE_BPS", 2.0)?;

        let initial_capital = env_source::decimal(source, "INITIAL_CAPITAL", 100000.0)?;

        let benchmark_symbol = env_source::string(source, "BENCHMARK_SYMBOL", "SPY");

        // Yahoo ticker for the 10y treasury yield
        let risk_free_rate_source = env_source::string(source, "RISK_FREE_RATE_SOURCE", "^TNX");

        Ok(Self {
            commission_per_contract,
            slippage_bps,
            initial_capital,
            benchmark_symbol,
            risk_free_rate_source,
        })
    }

    /// Slippage as a fraction of price.
    pub fn slippage_fraction(&self) -> f64 {
        self.slippage_bps / 10_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    #[test]
    fn test_backtest_defaults() {
        let config = BacktestSettings::from_source(&HashMap::<String, String>::new()).unwrap();
        assert_eq!(config.commission_per_contract, dec!(0.65));
        assert_eq!(config.initial_capital, dec!(100000));
        assert_eq!(config.slippage_bps, 2.0);
        assert_eq!(config.benchmark_symbol, "SPY");
        assert_eq!(config.risk_free_rate_source, "^TNX");
        assert!((config.slippage_fraction() - 0.0002).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_capital() {
        let env = HashMap::from([("INITIAL_CAPITAL".to_string(), "$1M".to_string())]);
        let err = BacktestSettings::from_source(&env).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFloat { .. }));
        assert_eq!(err.key(), "INITIAL_CAPITAL");
    }
}
