//! Usage-related types.
//!
//! - [`UsageSnapshot`] - Plan + trial quota summary
//! - [`UsageAmount`] - A numeric amount or the placeholder marker

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Marker written in place of numbers when usage could not be fetched.
pub const PLACEHOLDER_MARKER: &str = "-";

/// Note attached to placeholder snapshots.
pub const PLACEHOLDER_NOTE: &str = "Usage query failed; the token may be expired or lack permission";

// ============================================================================
// Usage Amount
// ============================================================================

/// A usage quantity, or the `"-"` placeholder when unknown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UsageAmount {
    /// Known amount.
    Value(f64),
    /// Usage lookup failed.
    Unavailable,
}

impl UsageAmount {
    /// Returns the numeric value, if known.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Unavailable => None,
        }
    }
}

impl fmt::Display for UsageAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) if v.fract() == 0.0 => write!(f, "{v:.0}"),
            Self::Value(v) => write!(f, "{v}"),
            Self::Unavailable => f.write_str(PLACEHOLDER_MARKER),
        }
    }
}

impl Serialize for UsageAmount {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match *self {
            // Whole numbers go out as integers so `15.0` reads as `15`.
            #[allow(clippy::cast_possible_truncation)]
            Self::Value(v) if v.fract() == 0.0 && v.abs() < 9.0e15 => s.serialize_i64(v as i64),
            Self::Value(v) => s.serialize_f64(v),
            Self::Unavailable => s.serialize_str(PLACEHOLDER_MARKER),
        }
    }
}

impl<'de> Deserialize<'de> for UsageAmount {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(d)? {
            Raw::Number(v) => Ok(Self::Value(v)),
            Raw::Text(s) if s == PLACEHOLDER_MARKER => Ok(Self::Unavailable),
            Raw::Text(s) => Err(serde::de::Error::custom(format!(
                "expected a number or \"{PLACEHOLDER_MARKER}\", got {s:?}"
            ))),
        }
    }
}

// ============================================================================
// Usage Snapshot
// ============================================================================

/// Normalized quota summary for an account.
///
/// `remaining` is `limit - used` and is not clamped, so it goes negative
/// when an account is over quota.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageSnapshot {
    /// Total quota (plan plus active trial).
    pub limit: UsageAmount,
    /// Total consumption (plan plus active trial).
    pub used: UsageAmount,
    /// `limit - used`.
    pub remaining: UsageAmount,
    /// Account email, if any source reported one.
    #[serde(default)]
    pub email: Option<String>,
    /// Explanation, only set on placeholder snapshots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl UsageSnapshot {
    /// Creates a snapshot from totals, computing `remaining`.
    pub fn from_totals(limit: f64, used: f64, email: Option<String>) -> Self {
        Self {
            limit: UsageAmount::Value(limit),
            used: UsageAmount::Value(used),
            remaining: UsageAmount::Value(limit - used),
            email,
            note: None,
        }
    }

    /// Creates the placeholder used when the usage lookup failed.
    pub fn placeholder(email: Option<String>) -> Self {
        Self {
            limit: UsageAmount::Unavailable,
            used: UsageAmount::Unavailable,
            remaining: UsageAmount::Unavailable,
            email,
            note: Some(PLACEHOLDER_NOTE.to_string()),
        }
    }

    /// Returns true if this is a placeholder snapshot.
    pub fn is_placeholder(&self) -> bool {
        self.limit == UsageAmount::Unavailable
    }

    /// Returns the used share of the limit in percent, when computable.
    pub fn used_percent(&self) -> Option<f64> {
        let limit = self.limit.value()?;
        let used = self.used.value()?;
        if limit > 0.0 {
            Some((used / limit) * 100.0)
        } else {
            None
        }
    }
}
