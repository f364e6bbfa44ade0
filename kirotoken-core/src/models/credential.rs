//! Credential-related types.
//!
//! This module contains what the input parser produces and what the flow
//! selector decides:
//! - [`ParsedCredential`] - Normalized view of the pasted text
//! - [`AuthFlow`] - Which exchange protocol applies
//! - [`FlowSelection`] - Flow plus resolved region

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Region used when the credential does not name one.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Prefix every Kiro refresh token starts with.
pub const REFRESH_TOKEN_PREFIX: &str = "aor";

// ============================================================================
// Parsed Credential
// ============================================================================

/// Credential fields recognized in the pasted text.
///
/// Produced once by the input parser and never mutated afterwards.
/// `refresh_token` is always non-empty; every other field is present only
/// when the input carried it as a non-empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCredential {
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Access token, if the paste already contained one.
    pub access_token: Option<String>,
    /// OAuth client id (`BuilderId` accounts).
    pub client_id: Option<String>,
    /// OAuth client secret (`BuilderId` accounts).
    pub client_secret: Option<String>,
    /// Profile ARN (social accounts).
    pub profile_arn: Option<String>,
    /// Identity provider name (e.g. "Google", "Github", "BuilderId").
    pub provider: Option<String>,
    /// AWS region of the identity endpoint.
    pub region: Option<String>,
    /// Account email.
    pub email: Option<String>,
}

impl ParsedCredential {
    /// Creates a credential carrying only a refresh token.
    pub fn from_refresh_token(refresh_token: impl Into<String>) -> Self {
        Self {
            refresh_token: refresh_token.into(),
            access_token: None,
            client_id: None,
            client_secret: None,
            profile_arn: None,
            provider: None,
            region: None,
            email: None,
        }
    }

    /// Builds a credential from a decoded JSON object.
    ///
    /// Returns `None` when the object has no non-empty `refreshToken`.
    /// Non-string values and empty strings count as absent.
    pub fn from_json_object(object: &Map<String, Value>) -> Option<Self> {
        let field = |name: &str| {
            object
                .get(name)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Some(Self {
            refresh_token: field("refreshToken")?,
            access_token: field("accessToken"),
            client_id: field("clientId"),
            client_secret: field("clientSecret"),
            profile_arn: field("profileArn"),
            provider: field("provider"),
            region: field("region"),
            email: field("email"),
        })
    }

    /// Returns the region, falling back to [`DEFAULT_REGION`].
    pub fn region_or_default(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_REGION)
    }

    /// Returns true if the provider field names `BuilderId` (any case).
    pub fn names_builder_id(&self) -> bool {
        self.provider
            .as_deref()
            .is_some_and(|p| p.eq_ignore_ascii_case("builderid"))
    }

    /// Returns true if both client id and client secret are present.
    pub fn has_client_credentials(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some()
    }
}

// ============================================================================
// Auth Flow
// ============================================================================

/// Authentication variant selected for a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthFlow {
    /// AWS `BuilderId` (OAuth2 client id/secret against the OIDC endpoint).
    BuilderId,
    /// Third-party identity linked account (Google, GitHub, ...).
    Social,
}

impl AuthFlow {
    /// Returns the wire name used in `authMethod`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BuilderId => "builderid",
            Self::Social => "social",
        }
    }

    /// Returns true for the `BuilderId` variant.
    pub fn is_builder_id(&self) -> bool {
        matches!(self, Self::BuilderId)
    }
}

impl fmt::Display for AuthFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of flow selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSelection {
    /// Selected flow.
    pub flow: AuthFlow,
    /// Region after defaulting.
    pub region: String,
}
