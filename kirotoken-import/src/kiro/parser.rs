//! Kiro usage response parser.
//!
//! `getUsageLimits` answers with a list of per-resource breakdowns. Only the
//! first entry is read. Its base quota is combined with an active free trial,
//! and the account email is looked up wherever the response happens to put it.

use kirotoken_core::UsageSnapshot;
use serde_json::Value;
use tracing::debug;

use super::json::{number_field, str_field};

// ============================================================================
// Field Names
// ============================================================================

const BREAKDOWN_LIST: &str = "usageBreakdownList";
const FREE_TRIAL_INFO: &str = "freeTrialInfo";
const FREE_TRIAL_STATUS: &str = "freeTrialStatus";
const TRIAL_ACTIVE: &str = "ACTIVE";
const USER_INFO: &str = "userInfo";
const EMAIL: &str = "email";

const LIMIT_FIELDS: [&str; 2] = ["usageLimit", "usageLimitWithPrecision"];
const USED_FIELDS: [&str; 2] = ["currentUsage", "currentUsageWithPrecision"];

// ============================================================================
// Normalizer
// ============================================================================

/// Reduces a raw `getUsageLimits` body to a [`UsageSnapshot`].
///
/// Returns `None` when the breakdown list is missing or empty.
pub fn normalize_usage(raw: &Value) -> Option<UsageSnapshot> {
    let Some(entry) = raw
        .get(BREAKDOWN_LIST)
        .and_then(Value::as_array)
        .and_then(|list| list.first())
        .filter(|entry| entry.is_object())
    else {
        debug!("Usage response has no breakdown entries");
        return None;
    };

    let mut limit = quota(entry, &LIMIT_FIELDS);
    let mut used = quota(entry, &USED_FIELDS);

    if let Some(trial) = active_trial(entry) {
        let trial_limit = quota(trial, &LIMIT_FIELDS);
        let trial_used = quota(trial, &USED_FIELDS);
        debug!(trial_limit, trial_used, "Merging active free trial");
        limit += trial_limit;
        used += trial_used;
    }

    Some(UsageSnapshot::from_totals(limit, used, find_email(raw, entry)))
}

/// First non-zero number among `fields`, else 0.
fn quota(value: &Value, fields: &[&str]) -> f64 {
    fields
        .iter()
        .find_map(|field| number_field(value, field))
        .unwrap_or(0.0)
}

fn active_trial(entry: &Value) -> Option<&Value> {
    entry
        .get(FREE_TRIAL_INFO)
        .filter(|trial| trial.get(FREE_TRIAL_STATUS).and_then(Value::as_str) == Some(TRIAL_ACTIVE))
}

/// Probes top-level `userInfo.email`, top-level `email`, then the same two
/// locations on the breakdown entry.
fn find_email(raw: &Value, entry: &Value) -> Option<String> {
    [raw, entry]
        .into_iter()
        .find_map(|scope| {
            scope
                .get(USER_INFO)
                .and_then(|info| str_field(info, EMAIL))
                .or_else(|| str_field(scope, EMAIL))
        })
        .map(str::to_string)
}

// ============================================================================
// Tests
// ============================================================================
