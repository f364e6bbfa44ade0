//! Kiro usage fetcher.

use kirotoken_core::UsageSnapshot;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::api::UsageLimitsApi;
use super::parser::normalize_usage;

// ============================================================================
// Fetcher
// ============================================================================

/// Queries the usage limits endpoint and normalizes the answer.
///
/// Every failure is absorbed: the caller gets `None` and decides what to
/// show instead.
#[derive(Clone)]
pub struct UsageFetcher {
    api: Arc<dyn UsageLimitsApi>,
}

impl UsageFetcher {
    /// Create a new fetcher.
    pub fn new(api: Arc<dyn UsageLimitsApi>) -> Self {
        Self { api }
    }

    /// Fetch usage data.
    #[instrument(skip(self, access_token))]
    pub async fn fetch_usage(&self, access_token: &str, region: &str) -> Option<UsageSnapshot> {
        let response = match self.api.get_usage_limits(access_token, region).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Usage request failed");
                return None;
            }
        };

        if !response.is_success() {
            warn!(status = response.status, "Usage request rejected");
            return None;
        }

        let raw: Value = match response.json() {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Usage response is not JSON");
                return None;
            }
        };

        let snapshot = normalize_usage(&raw);
        match &snapshot {
            Some(snapshot) => info!(used_percent = ?snapshot.used_percent(), "Fetched Kiro usage"),
            None => warn!("Usage response had no usage breakdown"),
        }
        snapshot
    }
}
