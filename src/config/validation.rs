//! Usability checks for loaded settings.
//!
//! Validation never fails: every check reports a boolean. Only the
//! directory checks touch the filesystem.

use super::Settings;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

/// Individual validation checks, ordered as they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationCheck {
    IbkrConnection,
    DatabaseUrl,
    TradingSymbols,
    RiskLimits,
    DirectoriesExist,
}

impl ValidationCheck {
    pub const ALL: [ValidationCheck; 5] = [
        ValidationCheck::IbkrConnection,
        ValidationCheck::DatabaseUrl,
        ValidationCheck::TradingSymbols,
        ValidationCheck::RiskLimits,
        ValidationCheck::DirectoriesExist,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ValidationCheck::IbkrConnection => "ibkr_connection",
            ValidationCheck::DatabaseUrl => "database_url",
            ValidationCheck::TradingSymbols => "trading_symbols",
            ValidationCheck::RiskLimits => "risk_limits",
            ValidationCheck::DirectoriesExist => "directories_exist",
        }
    }
}

impl fmt::Display for ValidationCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of [`validate`]: one boolean per check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationReport {
    checks: BTreeMap<ValidationCheck, bool>,
}

impl ValidationReport {
    pub fn get(&self, check: ValidationCheck) -> bool {
        self.checks.get(&check).copied().unwrap_or(false)
    }

    pub fn is_valid(&self) -> bool {
        self.checks.values().all(|passed| *passed)
    }

    pub fn failed(&self) -> Vec<ValidationCheck> {
        self.checks
            .iter()
            .filter(|(_, passed)| !**passed)
            .map(|(check, _)| *check)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ValidationCheck, bool)> + '_ {
        self.checks.iter().map(|(check, passed)| (*check, *passed))
    }
}

/// Runs every check against `settings`.
pub fn validate(settings: &Settings) -> ValidationReport {
    let checks: BTreeMap<ValidationCheck, bool> = ValidationCheck::ALL
        .into_iter()
        .map(|check| (check, run_check(settings, check)))
        .collect();

    let report = ValidationReport { checks };
    for check in report.failed() {
        warn!("Configuration check failed: {}", check);
    }
    report
}

fn run_check(settings: &Settings, check: ValidationCheck) -> bool {
    match check {
        ValidationCheck::IbkrConnection => {
            !settings.ibkr.host.is_empty() && settings.effective_port() > 0
        }
        ValidationCheck::DatabaseUrl => !settings.database.url.is_empty(),
        ValidationCheck::TradingSymbols => !settings.trading.target_symbols.is_empty(),
        ValidationCheck::RiskLimits => settings.trading.risk_limits_sane(),
        ValidationCheck::DirectoriesExist => {
            settings.paths.data_dir.exists() && settings.paths.logs_dir.exists()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::Path;

    fn settings_with(pairs: &[(&str, &str)]) -> Settings {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_source(&env, Path::new("/nonexistent/ibkr-settings-root")).unwrap()
    }

    #[test]
    fn test_defaults_pass_all_but_directories() {
        let report = validate(&settings_with(&[]));
        assert!(report.get(ValidationCheck::IbkrConnection));
        assert!(report.get(ValidationCheck::DatabaseUrl));
        assert!(report.get(ValidationCheck::TradingSymbols));
        assert!(report.get(ValidationCheck::RiskLimits));
        assert!(!report.get(ValidationCheck::DirectoriesExist));
        assert!(!report.is_valid());
        assert_eq!(report.failed(), vec![ValidationCheck::DirectoriesExist]);
    }

    #[test]
    fn test_report_order() {
        let report = validate(&settings_with(&[]));
        let names: Vec<&str> = report.iter().map(|(check, _)| check.name()).collect();
        assert_eq!(
            names,
            vec![
                "ibkr_connection",
                "database_url",
                "trading_symbols",
                "risk_limits",
                "directories_exist"
            ]
        );
    }

    #[test]
    fn test_empty_host_and_url_fail() {
        let report = validate(&settings_with(&[("IBKR_HOST", ""), ("DATABASE_URL", "")]));
        assert!(!report.get(ValidationCheck::IbkrConnection));
        assert!(!report.get(ValidationCheck::DatabaseUrl));
    }

    #[test]
    fn test_zero_port_fails_connection_check() {
        let report = validate(&settings_with(&[("IBKR_PAPER_PORT", "0")]));
        assert!(!report.get(ValidationCheck::IbkrConnection));
    }

    #[test]
    fn test_empty_symbols_string_still_counts_as_one_symbol() {
        let report = validate(&settings_with(&[("TARGET_SYMBOLS", "")]));
        assert!(report.get(ValidationCheck::TradingSymbols));
    }

    #[test]
    fn test_risk_limits_check() {
        let report = validate(&settings_with(&[("MAX_DAILY_LOSS_PCT", "0.15")]));
        assert!(!report.get(ValidationCheck::RiskLimits));

        let report = validate(&settings_with(&[("MAX_DAILY_LOSS_PCT", "0.0")]));
        assert!(!report.get(ValidationCheck::RiskLimits));

        let report = validate(&settings_with(&[("MAX_DAILY_LOSS_PCT", "0.099")]));
        assert!(report.get(ValidationCheck::RiskLimits));
    }

    #[test]
    fn test_report_serializes_as_map() {
        let report = validate(&settings_with(&[]));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["risk_limits"], serde_json::json!(true));
        assert_eq!(json["directories_exist"], serde_json::json!(false));
    }
}
