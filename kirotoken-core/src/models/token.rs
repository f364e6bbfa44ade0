//! Token-related types.
//!
//! - [`TokenExchangeResult`] - Output of either token exchanger
//! - [`CanonicalTokenRecord`] - Portable `kiro-auth-token.json` record
//! - [`ClientSecretArtifact`] - Content-addressed client id/secret file

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

use super::credential::AuthFlow;

/// Provider written into the token record when the input names none.
pub const DEFAULT_PROVIDER: &str = "Google";

// ============================================================================
// Exchange Result
// ============================================================================

/// What a token exchange produced.
///
/// `access_token` is `None` only when an endpoint answered successfully but
/// without a usable token; the pipeline treats that as an exchange failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenExchangeResult {
    /// Fresh access credential.
    pub access_token: Option<String>,
    /// Absolute expiry reported or computed by the exchanger.
    pub expires_at: Option<DateTime<Utc>>,
    /// Lifetime in seconds reported by the endpoint.
    pub expires_in: Option<i64>,
    /// Client id echoed by the `BuilderId` exchange.
    pub client_id: Option<String>,
    /// Client secret echoed by the `BuilderId` exchange.
    pub client_secret: Option<String>,
}

impl TokenExchangeResult {
    /// Creates a result that carries only an access token.
    pub fn with_access_token(access_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            ..Self::default()
        }
    }

    /// Returns the access token if it is present and non-empty.
    pub fn usable_access_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }
}

// ============================================================================
// Canonical Token Record
// ============================================================================

/// Normalized, portable token record.
///
/// Optional fields are left out of the JSON entirely when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalTokenRecord {
    /// Access credential.
    pub access_token: String,
    /// Refresh credential, copied from the input.
    pub refresh_token: String,
    /// Flow the record was produced by.
    pub auth_method: AuthFlow,
    /// Identity provider name.
    pub provider: String,
    /// When the access credential expires.
    #[serde(serialize_with = "serialize_iso_millis")]
    pub expires_at: DateTime<Utc>,
    /// OAuth client id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// OAuth client secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    /// Profile ARN.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_arn: Option<String>,
}

// ============================================================================
// Client Secret Artifact
// ============================================================================

/// Auxiliary file pairing a `BuilderId` client id with its secret.
///
/// The filename is the SHA-1 hex digest of the client id plus `.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSecretArtifact {
    /// `<sha1(clientId)>.json`.
    pub filename: String,
    /// File content.
    pub content: ClientSecretContent,
}

/// Body of the client-secret artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSecretContent {
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    /// AWS region the client was registered in.
    pub region: String,
}

// ============================================================================
// Serialization helpers
// ============================================================================

/// Serializes as `2025-01-01T00:00:00.000Z`.
fn serialize_iso_millis<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}
