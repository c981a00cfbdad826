use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading settings.
///
/// Only malformed values abort loading. Suspicious but well-formed values
/// are reported by validation instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} is not a valid integer")]
    InvalidInteger { key: String, value: String },

    #[error("Invalid value for {key}: {value:?} is not a valid float")]
    InvalidFloat { key: String, value: String },

    #[error("Failed to load env file {path:?}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

impl ConfigError {
    /// The environment variable (or env file) responsible for the error.
    pub fn key(&self) -> &str {
        match self {
            ConfigError::InvalidInteger { key, .. } | ConfigError::InvalidFloat { key, .. } => key,
            ConfigError::EnvFile { path, .. } => path.to_str().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_formatting_names_key_and_type() {
        let error = ConfigError::InvalidFloat {
            key: "MAX_PORTFOLIO_DELTA".to_string(),
            value: "not-a-number".to_string(),
        };

        let msg = error.to_string();
        assert!(msg.contains("MAX_PORTFOLIO_DELTA"));
        assert!(msg.contains("not-a-number"));
        assert!(msg.contains("float"));
        assert_eq!(error.key(), "MAX_PORTFOLIO_DELTA");
    }

    #[test]
    fn test_env_file_error_key_is_file_path() {
        let source = dotenvy::from_path("/nonexistent/ibkr-settings/trader.env").unwrap_err();
        let error = ConfigError::EnvFile {
            path: PathBuf::from("/nonexistent/ibkr-settings/trader.env"),
            source,
        };
        assert_eq!(error.key(), "/nonexistent/ibkr-settings/trader.env");
        assert!(error.to_string().contains("trader.env"));
    }

    #[test]
    fn test_integer_error_formatting() {
        let error = ConfigError::InvalidInteger {
            key: "IBKR_CLIENT_ID".to_string(),
            value: "abc".to_string(),
        };
        assert!(error.to_string().contains("integer"));
        assert_eq!(error.key(), "IBKR_CLIENT_ID");
    }
}
