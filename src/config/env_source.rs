//! Environment lookup and typed coercion.
//!
//! Every settings section reads through an [`EnvSource`] so that the process
//! environment can be swapped for an in-memory map in tests. The helpers here
//! carry the coercion rules shared by all sections: defaults for unset keys,
//! strict numeric parsing, literal `"true"` booleans and verbatim list splits.

use super::errors::ConfigError;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// A read-only view of environment variables.
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        // Non-unicode values are treated as unset
        env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl<S: EnvSource + ?Sized> EnvSource for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// Returns the first key in `keys` that is set, together with its value.
pub fn first_set<'k>(source: &impl EnvSource, keys: &[&'k str]) -> Option<(&'k str, String)> {
    keys.iter()
        .find_map(|key| source.get(key).map(|value| (*key, value)))
}

fn raw_or_default(source: &impl EnvSource, key: &str, default: &str) -> String {
    match source.get(key) {
        Some(value) => value,
        None => {
            debug!(key, default, "Environment variable unset, using default");
            default.to_string()
        }
    }
}

pub fn string(source: &impl EnvSource, key: &str, default: &str) -> String {
    raw_or_default(source, key, default)
}

/// Parses a base-10 integer into `T`, failing with `InvalidInteger` on
/// malformed or out-of-range input.
pub fn integer<T: FromStr>(
    source: &impl EnvSource,
    key: &str,
    default: T,
) -> Result<T, ConfigError> {
    match source.get(key) {
        Some(value) => parse_integer(key, &value),
        None => {
            debug!(key, "Environment variable unset, using default");
            Ok(default)
        }
    }
}

/// Like [`integer`], but resolves the first set key of an alias chain.
/// Errors name the key that was actually read.
pub fn integer_aliased<T: FromStr>(
    source: &impl EnvSource,
    keys: &[&str],
    default: T,
) -> Result<T, ConfigError> {
    match first_set(source, keys) {
        Some((key, value)) => parse_integer(key, &value),
        None => {
            debug!(?keys, "Environment variables unset, using default");
            Ok(default)
        }
    }
}

// Surrounding whitespace is ignored; errors keep the raw value
fn parse_integer<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse::<T>().map_err(|_| ConfigError::InvalidInteger {
        key: key.to_string(),
        value: value.to_string(),
    })
}

pub fn float(source: &impl EnvSource, key: &str, default: f64) -> Result<f64, ConfigError> {
    match source.get(key) {
        Some(value) => parse_float(key, &value),
        None => {
            debug!(key, default, "Environment variable unset, using default");
            Ok(default)
        }
    }
}

fn parse_float(key: &str, value: &str) -> Result<f64, ConfigError> {
    value.trim().parse::<f64>().map_err(|_| invalid_float(key, value))
}

fn invalid_float(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidFloat {
        key: key.to_string(),
        value: value.to_string(),
    }
}

/// Parses a monetary field into a `Decimal`.
///
/// Plain decimal strings are taken exactly. Other float syntax (exponents)
/// goes through `f64`. Values a `Decimal` cannot hold (NaN, infinities) are
/// reported as `InvalidFloat`.
pub fn decimal(source: &impl EnvSource, key: &str, default: f64) -> Result<Decimal, ConfigError> {
    let Some(value) = source.get(key) else {
        debug!(key, default, "Environment variable unset, using default");
        return Decimal::from_f64(default).ok_or_else(|| invalid_float(key, &default.to_string()));
    };

    if let Ok(exact) = Decimal::from_str(value.trim()) {
        return Ok(exact);
    }
    let parsed = parse_float(key, &value)?;
    Decimal::from_f64(parsed).ok_or_else(|| invalid_float(key, &value))
}

/// True iff the lower-cased value equals `"true"`. Anything else is false.
pub fn boolean(source: &impl EnvSource, key: &str, default: &str) -> bool {
    raw_or_default(source, key, default).to_lowercase() == "true"
}

/// Splits on `,` keeping each segment verbatim. An empty value yields `[""]`.
pub fn list(source: &impl EnvSource, key: &str, default: &str) -> Vec<String> {
    raw_or_default(source, key, default)
        .split(',')
        .map(str::to_string)
        .collect()
}

/// Loads `.env` from the current directory or its ancestors.
///
/// A missing file is not an error. Variables already present in the process
/// environment are left untouched.
pub fn load_dotenv() -> Result<Option<PathBuf>, ConfigError> {
    match dotenvy::dotenv() {
        Ok(path) => {
            info!("Loaded environment from {:?}", path);
            Ok(Some(path))
        }
        Err(e) if e.not_found() => {
            debug!("No .env file found");
            Ok(None)
        }
        Err(source) => Err(ConfigError::EnvFile {
            path: PathBuf::from(".env"),
            source,
        }),
    }
}

/// Loads a specific env file.
///
/// Unlike [`load_dotenv`], the file must exist. Existing process variables
/// are left untouched.
pub fn load_dotenv_from(path: impl AsRef<Path>) -> Result<PathBuf, ConfigError> {
    let path = path.as_ref();
    dotenvy::from_path(path).map_err(|source| ConfigError::EnvFile {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Loaded environment from {:?}", path);
    Ok(path.to_path_buf())
}
