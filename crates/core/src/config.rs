//! Environment lookup helpers shared by every config struct.
//!
//! Config types expose a `from_lookup` constructor taking any
//! `Fn(&str) -> Option<String>` so tests can resolve settings from a map
//! instead of mutating the process environment. `from_env` wraps it with
//! [`process_env`].

use std::str::FromStr;

/// Error raised when an environment value is present but unusable.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} has invalid value '{value}'")]
    Invalid { key: &'static str, value: String },

    #[error("{0}")]
    Missing(String),
}

/// Look up a variable in the real process environment.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Return the variable if it is set and not blank.
pub fn non_empty(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|v| !v.trim().is_empty())
}

/// Parse `key` if set, otherwise return `default`.
///
/// A set-but-unparseable value is an error rather than a silent fallback.
pub fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match non_empty(lookup, key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            value: raw,
        }),
    }
}

/// Split a comma-separated list, trimming entries and dropping blanks.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
