//! Fetch context and settings.
//!
//! The fetch context is handed to the live endpoint adapters and bundles the
//! shared HTTP client with the settings that shaped it.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::error::HttpError;
use crate::http::{HttpClient, DEFAULT_TIMEOUT_SECS, USER_AGENT};

/// Placeholder substituted with the region in endpoint templates.
pub const REGION_PLACEHOLDER: &str = "{region}";

// ============================================================================
// Endpoints
// ============================================================================

/// Endpoint URLs, `{region}` is replaced per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Endpoints {
    /// `BuilderId` OIDC token endpoint.
    pub builder_id_token: String,
    /// Kiro social refresh endpoint.
    pub social_refresh: String,
    /// `CodeWhisperer` usage limits endpoint.
    pub usage_limits: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            builder_id_token: "https://oidc.{region}.amazonaws.com/token".to_string(),
            social_refresh: "https://prod.us-east-1.auth.desktop.kiro.dev/refreshToken"
                .to_string(),
            usage_limits: "https://q.{region}.amazonaws.com/getUsageLimits".to_string(),
        }
    }
}

impl Endpoints {
    /// Points every endpoint at one base URL (tests, local proxies).
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            builder_id_token: format!("{base}/token"),
            social_refresh: format!("{base}/refreshToken"),
            usage_limits: format!("{base}/getUsageLimits"),
        }
    }

    /// Resolves the `BuilderId` token URL for a region.
    pub fn builder_id_token_url(&self, region: &str) -> Result<String, HttpError> {
        render(&self.builder_id_token, region)
    }

    /// Resolves the usage limits URL for a region.
    pub fn usage_limits_url(&self, region: &str) -> Result<String, HttpError> {
        render(&self.usage_limits, region)
    }

    /// Returns the social refresh URL.
    pub fn social_refresh_url(&self) -> &str {
        &self.social_refresh
    }
}

/// Substitutes the region into a template.
///
/// The region ends up in a hostname, so only `[a-z0-9-]` is accepted.
fn render(template: &str, region: &str) -> Result<String, HttpError> {
    let valid = !region.is_empty()
        && region
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid {
        return Err(HttpError::InvalidRegion(region.to_string()));
    }
    Ok(template.replace(REGION_PLACEHOLDER, region))
}

// ============================================================================
// Fetch Settings
// ============================================================================

/// Settings for outbound calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FetchSettings {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` header.
    pub user_agent: String,
    /// `x-amz-user-agent` header sent to the usage endpoint.
    pub amz_user_agent: String,
    /// Endpoint URLs.
    pub endpoints: Endpoints,
    /// Restrict outbound hosts to these domains (and their subdomains).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_domains: Option<Vec<String>>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: USER_AGENT.to_string(),
            amz_user_agent: format!("aws-sdk-js/1.0.0 {USER_AGENT}"),
            endpoints: Endpoints::default(),
            allowed_domains: None,
        }
    }
}

impl FetchSettings {
    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ============================================================================
// Fetch Context
// ============================================================================

/// Shared HTTP client plus the settings it was built from.
#[derive(Debug, Clone)]
pub struct FetchContext {
    /// HTTP client with tracing.
    pub http: Arc<HttpClient>,
    /// Fetch settings.
    pub settings: FetchSettings,
}

impl FetchContext {
    /// Creates a new fetch context with default settings.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_settings(FetchSettings::default())
    }

    /// Creates a context with custom settings.
    pub fn with_settings(settings: FetchSettings) -> Result<Self, HttpError> {
        Ok(Self {
            http: Arc::new(HttpClient::from_settings(&settings)?),
            settings,
        })
    }

    /// Creates a builder for customizing the context.
    pub fn builder() -> FetchContextBuilder {
        FetchContextBuilder::new()
    }

    /// Returns the effective timeout for requests.
    pub fn timeout(&self) -> Duration {
        self.settings.timeout()
    }

    /// Returns the configured endpoints.
    pub fn endpoints(&self) -> &Endpoints {
        &self.settings.endpoints
    }
}

// ============================================================================
// Fetch Context Builder
// ============================================================================

/// Builder for constructing a `FetchContext`.
#[derive(Debug, Default)]
pub struct FetchContextBuilder {
    http: Option<Arc<HttpClient>>,
    settings: FetchSettings,
}

impl FetchContextBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP client.
    pub fn http(mut self, http: Arc<HttpClient>) -> Self {
        self.http = Some(http);
        self
    }

    /// Sets the fetch settings.
    pub fn settings(mut self, settings: FetchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout_secs = timeout.as_secs();
        self
    }

    /// Sets the endpoints.
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.settings.endpoints = endpoints;
        self
    }

    /// Builds the fetch context.
    ///
    /// A client is built from the settings unless one was supplied.
    pub fn build(self) -> Result<FetchContext, HttpError> {
        let http = match self.http {
            Some(http) => http,
            None => Arc::new(HttpClient::from_settings(&self.settings)?),
        };
        Ok(FetchContext {
            http,
            settings: self.settings,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints_render_region() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.builder_id_token_url("eu-west-1").unwrap(),
            "https://oidc.eu-west-1.amazonaws.com/token"
        );
        assert_eq!(
            endpoints.usage_limits_url("us-east-1").unwrap(),
            "https://q.us-east-1.amazonaws.com/getUsageLimits"
        );
        assert_eq!(
            endpoints.social_refresh_url(),
            "https://prod.us-east-1.auth.desktop.kiro.dev/refreshToken"
        );
    }

    #[test]
    fn test_region_must_be_plain() {
        let endpoints = Endpoints::default();
        for region in ["", "evil.com/x#", "US-EAST-1", "us east"] {
            assert!(
                matches!(endpoints.usage_limits_url(region), Err(HttpError::InvalidRegion(_))),
                "accepted {region:?}"
            );
        }
    }

    #[test]
    fn test_with_base_ignores_region() {
        let endpoints = Endpoints::with_base("http://127.0.0.1:9000/");
        assert_eq!(
            endpoints.builder_id_token_url("ap-southeast-2").unwrap(),
            "http://127.0.0.1:9000/token"
        );
        assert_eq!(endpoints.social_refresh_url(), "http://127.0.0.1:9000/refreshToken");
    }

    #[test]
    fn test_settings_from_partial_json() {
        let settings: FetchSettings =
            serde_json::from_str(r#"{"timeoutSecs": 5, "allowedDomains": ["kiro.dev"]}"#).unwrap();
        assert_eq!(settings.timeout(), Duration::from_secs(5));
        assert_eq!(settings.endpoints, Endpoints::default());
        assert_eq!(settings.allowed_domains, Some(vec!["kiro.dev".to_string()]));
    }

    #[test]
    fn test_context_builder() {
        let ctx = FetchContext::builder()
            .timeout(Duration::from_secs(60))
            .endpoints(Endpoints::with_base("http://localhost:1"))
            .build()
            .unwrap();

        assert_eq!(ctx.timeout(), Duration::from_secs(60));
        assert_eq!(ctx.endpoints().social_refresh_url(), "http://localhost:1/refreshToken");
    }

    #[test]
    fn test_default_context() {
        let ctx = FetchContext::new().unwrap();
        assert_eq!(ctx.timeout(), Duration::from_secs(30));
        assert!(ctx.settings.user_agent.starts_with("KiroTokenTools/"));
    }
}
