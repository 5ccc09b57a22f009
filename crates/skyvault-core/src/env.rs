//! Typed access to environment configuration
//!
//! Every getter has two forms: a strict one that fails with
//! [`Error::MissingConfig`] when the value is absent or unparsable, and an
//! `_or` form that swallows any failure and returns the given default.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

/// Name of the variable that identifies the deployment environment
pub const ENVIRONMENT_KEY: &str = "APP_ENVIRONMENT";

const DEFAULT_ENVIRONMENT: &str = "Development";

/// Reader over the process environment
///
/// `EnvConfig::process()` reads live process variables. `EnvConfig::from_map`
/// reads from a fixed map instead, which keeps tests independent of global
/// process state.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    fixed: Option<HashMap<String, String>>,
}

impl EnvConfig {
    /// Read from the live process environment
    pub fn process() -> Self {
        Self { fixed: None }
    }

    /// Read from a fixed set of variables
    pub fn from_map<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fixed: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Raw value, `None` when unset
    pub fn get_string(&self, key: &str) -> Option<String> {
        match &self.fixed {
            Some(vars) => vars.get(key).cloned(),
            None => std::env::var(key).ok(),
        }
    }

    /// Value or `default` when unset or empty
    pub fn get_string_or(&self, key: &str, default: &str) -> String {
        match self.get_string(key) {
            Some(value) if !value.is_empty() => value,
            _ => default.to_string(),
        }
    }

    pub fn get_int(&self, key: &str) -> Result<i32> {
        self.parse(key)
    }

    pub fn get_int_or(&self, key: &str, default: i32) -> i32 {
        self.get_int(key).unwrap_or(default)
    }

    pub fn get_long(&self, key: &str) -> Result<i64> {
        self.parse(key)
    }

    pub fn get_long_or(&self, key: &str, default: i64) -> i64 {
        self.get_long(key).unwrap_or(default)
    }

    pub fn get_double(&self, key: &str) -> Result<f64> {
        self.parse(key)
    }

    pub fn get_double_or(&self, key: &str, default: f64) -> f64 {
        self.get_double(key).unwrap_or(default)
    }

    /// Boolean value; accepts `true`/`false` in any letter case
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        let raw = self.require(key)?;
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(Error::missing_config(
                key,
                format!("'{}' is not a boolean", raw),
            ))
        }
    }

    pub fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.get_bool(key).unwrap_or(default)
    }

    /// Split on `separator` and trim each element
    ///
    /// Returns `None` (not an empty list) when the variable is unset or empty.
    pub fn get_string_list(&self, key: &str, separator: char) -> Option<Vec<String>> {
        let raw = self.get_string(key).filter(|v| !v.is_empty())?;
        Some(raw.split(separator).map(|p| p.trim().to_string()).collect())
    }

    /// [`get_string_list`](Self::get_string_list) with a comma separator
    pub fn get_string_list_default(&self, key: &str) -> Option<Vec<String>> {
        self.get_string_list(key, ',')
    }

    pub fn is_development_environment(&self) -> bool {
        self.get_string_or(ENVIRONMENT_KEY, DEFAULT_ENVIRONMENT)
            .eq_ignore_ascii_case("development")
    }

    pub fn is_production_environment(&self) -> bool {
        self.get_string_or(ENVIRONMENT_KEY, DEFAULT_ENVIRONMENT)
            .eq_ignore_ascii_case("production")
    }

    fn require(&self, key: &str) -> Result<String> {
        self.get_string(key)
            .ok_or_else(|| Error::missing_config(key, "not set"))
    }

    fn parse<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self.require(key)?;
        raw.trim()
            .parse::<T>()
            .map_err(|e| Error::missing_config(key, format!("'{}': {}", raw, e)))
    }
}
