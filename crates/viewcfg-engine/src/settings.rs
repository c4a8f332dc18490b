//! Typed reads from a settings bag.
//!
//! A missing or `null` entry yields the caller's default; an entry of the
//! wrong kind is reported instead of being coerced.

use viewcfg_types::{SettingValue, TypeDisplayConfig};

use crate::error::SettingError;

fn mismatch(key: &str, expected: &'static str, found: &SettingValue) -> SettingError {
    SettingError {
        key: key.to_string(),
        expected,
        found: found.clone(),
    }
}

fn present<'a>(config: &'a TypeDisplayConfig, key: &str) -> Option<&'a SettingValue> {
    config.get(key).filter(|v| !v.is_null())
}

pub fn bool_or(config: &TypeDisplayConfig, key: &str, default: bool) -> Result<bool, SettingError> {
    match present(config, key) {
        None => Ok(default),
        Some(v) => v.as_bool().ok_or_else(|| mismatch(key, "boolean", v)),
    }
}

pub fn int_or(config: &TypeDisplayConfig, key: &str, default: i64) -> Result<i64, SettingError> {
    match present(config, key) {
        None => Ok(default),
        Some(v) => v.as_i64().ok_or_else(|| mismatch(key, "integer", v)),
    }
}

/// Non-negative integer where `null` means "no limit"
pub fn opt_usize(config: &TypeDisplayConfig, key: &str) -> Result<Option<usize>, SettingError> {
    match present(config, key) {
        None => Ok(None),
        Some(v) => v
            .as_i64()
            .and_then(|i| usize::try_from(i).ok())
            .map(Some)
            .ok_or_else(|| mismatch(key, "non-negative integer", v)),
    }
}

pub fn opt_f64(config: &TypeDisplayConfig, key: &str) -> Result<Option<f64>, SettingError> {
    match present(config, key) {
        None => Ok(None),
        Some(v) => v.as_f64().map(Some).ok_or_else(|| mismatch(key, "number", v)),
    }
}

pub fn str_or<'a>(
    config: &'a TypeDisplayConfig,
    key: &str,
    default: &'a str,
) -> Result<&'a str, SettingError> {
    match present(config, key) {
        None => Ok(default),
        Some(v) => v.as_str().ok_or_else(|| mismatch(key, "text", v)),
    }
}
