//! Environment variable helpers
//!
//! Typed reads with defaults, used to configure the logger at startup.

use std::str::FromStr;

/// Read `key` parsed as `T`, or return `default` when unset or unparsable.
#[inline]
pub fn env_get<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Read `key` as a boolean.
///
/// Accepts "1", "true", "yes", "on" (case-insensitive) as true.
/// Any other value is false; unset returns `default`.
#[inline]
pub fn env_get_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(val) => matches!(val.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}
