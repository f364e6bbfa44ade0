//! AWS `BuilderId` token exchange.
//!
//! `BuilderId` accounts hold an OIDC client registration. A fresh access
//! token comes from the standard OAuth2 `refresh_token` grant against the
//! regional `oidc.<region>.amazonaws.com/token` endpoint.
//!
//! Unlike the social flow there is no fallback: a non-success answer is a
//! terminal error carrying the upstream status and message.

use chrono::{Duration, Utc};
use kirotoken_core::{ImportError, ParsedCredential, TokenExchangeResult};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::api::{OidcTokenApi, RawResponse, RefreshGrant};
use super::json::{seconds_field, str_field};

/// Exchanges a `BuilderId` refresh token for an access token.
#[derive(Clone)]
pub struct BuilderIdTokenExchanger {
    api: Arc<dyn OidcTokenApi>,
}

impl BuilderIdTokenExchanger {
    /// Creates an exchanger over the given endpoint.
    pub fn new(api: Arc<dyn OidcTokenApi>) -> Self {
        Self { api }
    }

    /// Runs the exchange.
    ///
    /// The client id and secret are echoed into the result so the caller
    /// can build the client-secret artifact from it.
    #[instrument(skip(self, creds))]
    pub async fn exchange(
        &self,
        creds: &ParsedCredential,
        region: &str,
    ) -> Result<TokenExchangeResult, ImportError> {
        let (Some(client_id), Some(client_secret)) =
            (creds.client_id.as_deref(), creds.client_secret.as_deref())
        else {
            return Err(ImportError::MissingCredential);
        };

        debug!("Refreshing BuilderId token");
        let grant = RefreshGrant::new(&creds.refresh_token, client_id, client_secret);
        let response = self
            .api
            .create_token(region, &grant)
            .await
            .map_err(|e| ImportError::Http(e.to_string()))?;

        // Bodies that are not JSON still count, the status decides.
        let data: Value = response.json().unwrap_or(Value::Null);

        if !response.is_success() {
            let message = error_message(&data, &response);
            warn!(status = response.status, message = %message, "BuilderId refresh rejected");
            return Err(ImportError::UpstreamExchange {
                status: response.status,
                message,
            });
        }

        let expires_in = seconds_field(&data, "expires_in");
        let result = TokenExchangeResult {
            access_token: str_field(&data, "access_token").map(str::to_string),
            expires_at: expires_in.map(|secs| Utc::now() + Duration::seconds(secs)),
            expires_in,
            client_id: Some(client_id.to_string()),
            client_secret: Some(client_secret.to_string()),
        };

        info!(
            has_access_token = result.access_token.is_some(),
            expires_in = ?expires_in,
            "BuilderId refresh complete"
        );
        Ok(result)
    }
}

/// `error_description`, else `error`, else the raw body.
fn error_message(data: &Value, response: &RawResponse) -> String {
    str_field(data, "error_description")
        .or_else(|| str_field(data, "error"))
        .unwrap_or(&response.body)
        .to_string()
}

// ============================================================================
// Tests
// ============================================================================
