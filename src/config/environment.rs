use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Deployment environment tag.
///
/// Matching is exact: only the literal `"production"` selects production.
/// Unrecognised tags are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Testing,
    Production,
    Other(String),
}

impl Environment {
    pub fn as_str(&self) -> &str {
        match self {
            Environment::Development => "development",
            Environment::Testing => "testing",
            Environment::Production => "production",
            Environment::Other(tag) => tag,
        }
    }

    pub fn is_debug(&self) -> bool {
        matches!(self, Environment::Development)
    }

    pub fn is_testing(&self) -> bool {
        matches!(self, Environment::Testing)
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl From<&str> for Environment {
    fn from(s: &str) -> Self {
        match s {
            "development" => Environment::Development,
            "testing" => Environment::Testing,
            "production" => Environment::Production,
            other => Environment::Other(other.to_string()),
        }
    }
}

impl FromStr for Environment {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Environment::from(s))
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Environment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
