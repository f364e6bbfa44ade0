//! Social (Google / GitHub linked) token exchange.
//!
//! Resolution never fails:
//!
//! 1. a pasted access token that is not itself a refresh token is reused,
//! 2. otherwise the Kiro refresh endpoint is asked once,
//! 3. otherwise the refresh token stands in as the access token.

use chrono::{DateTime, Utc};
use kirotoken_core::{ParsedCredential, TokenExchangeResult, REFRESH_TOKEN_PREFIX};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::api::{SocialAuthApi, SocialRefreshRequest};
use super::json::{first_str_field, seconds_field, str_field};

/// Produces an access token for non-`BuilderId` accounts.
#[derive(Clone)]
pub struct SocialTokenExchanger {
    api: Arc<dyn SocialAuthApi>,
}

impl SocialTokenExchanger {
    /// Creates an exchanger over the given refresh endpoint.
    pub fn new(api: Arc<dyn SocialAuthApi>) -> Self {
        Self { api }
    }

    /// Resolves an access token for `creds`.
    #[instrument(skip_all)]
    pub async fn exchange(&self, creds: &ParsedCredential) -> TokenExchangeResult {
        if let Some(access_token) = reusable_access_token(creds) {
            debug!("Reusing pasted access token");
            return TokenExchangeResult::with_access_token(access_token);
        }

        if let Some(result) = self.refresh(creds).await {
            info!(expires_in = ?result.expires_in, "Social refresh complete");
            return result;
        }

        info!("Falling back to refresh token as access token");
        TokenExchangeResult::with_access_token(creds.refresh_token.clone())
    }

    async fn refresh(&self, creds: &ParsedCredential) -> Option<TokenExchangeResult> {
        let request = SocialRefreshRequest {
            refresh_token: &creds.refresh_token,
            profile_arn: creds.profile_arn.as_deref(),
        };

        let response = match self.api.refresh_token(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Social refresh request failed");
                return None;
            }
        };

        if !response.is_success() {
            warn!(status = response.status, "Social refresh rejected");
            return None;
        }

        let data: Value = match response.json() {
            Ok(data) => data,
            Err(e) => {
                warn!(error = %e, "Social refresh returned a non-JSON body");
                return None;
            }
        };

        let Some(access_token) = first_str_field(&data, &["accessToken", "access_token"]) else {
            warn!("Social refresh response carried no access token");
            return None;
        };

        Some(TokenExchangeResult {
            access_token: Some(access_token.to_string()),
            expires_at: str_field(&data, "expiresAt").and_then(parse_timestamp),
            expires_in: seconds_field(&data, "expiresIn")
                .or_else(|| seconds_field(&data, "expires_in")),
            client_id: None,
            client_secret: None,
        })
    }
}

fn reusable_access_token(creds: &ParsedCredential) -> Option<&str> {
    creds
        .access_token
        .as_deref()
        .filter(|token| !token.is_empty() && !token.starts_with(REFRESH_TOKEN_PREFIX))
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(parsed) => Some(parsed.with_timezone(&Utc)),
        Err(e) => {
            debug!(error = %e, "Ignoring unparsable expiresAt");
            None
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
