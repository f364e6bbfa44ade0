//! Lenient field access on loosely typed JSON responses.
//!
//! Upstream bodies disagree on field names and types, so lookups treat
//! empty strings, zero and wrong types as absent.

use serde_json::Value;

/// Non-empty string at `key`.
pub(crate) fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key)?.as_str().filter(|s| !s.is_empty())
}

/// Non-zero number at `key`.
pub(crate) fn number_field(value: &Value, key: &str) -> Option<f64> {
    value.get(key)?.as_f64().filter(|n| *n != 0.0 && n.is_finite())
}

/// Non-zero whole seconds at `key`.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn seconds_field(value: &Value, key: &str) -> Option<i64> {
    number_field(value, key).map(|n| n as i64).filter(|n| *n != 0)
}

/// First non-empty string among `keys`.
pub(crate) fn first_str_field<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| str_field(value, key))
}
