//! Kiro and AWS endpoint adapters.
//!
//! The three upstream calls sit behind small traits so the exchangers and
//! the usage fetcher can run against fakes. The traits stop at transport:
//! they return the raw status and body and leave interpretation to the
//! callers, which own the protocol-specific error semantics.
//!
//! [`KiroHttpApi`] is the live implementation on top of [`HttpClient`].
//!
//! [`HttpClient`]: kirotoken_fetch::HttpClient

use async_trait::async_trait;
use kirotoken_fetch::{FetchContext, FetchError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

// ============================================================================
// Constants
// ============================================================================

/// OAuth2 grant type used by the `BuilderId` exchange.
pub const REFRESH_GRANT_TYPE: &str = "refresh_token";

/// Header carrying the AWS SDK user agent.
const AMZ_USER_AGENT: &str = "x-amz-user-agent";

// ============================================================================
// Request / Response Types
// ============================================================================

/// Form body of the OIDC `refresh_token` grant.
#[derive(Debug, Serialize)]
pub struct RefreshGrant<'a> {
    /// Always `refresh_token`.
    pub grant_type: &'static str,
    /// Refresh token being exchanged.
    pub refresh_token: &'a str,
    /// OAuth client id.
    pub client_id: &'a str,
    /// OAuth client secret.
    pub client_secret: &'a str,
}

impl<'a> RefreshGrant<'a> {
    /// Creates a grant for the given credentials.
    pub fn new(refresh_token: &'a str, client_id: &'a str, client_secret: &'a str) -> Self {
        Self {
            grant_type: REFRESH_GRANT_TYPE,
            refresh_token,
            client_id,
            client_secret,
        }
    }
}

/// JSON body of the social refresh call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialRefreshRequest<'a> {
    /// Refresh token being exchanged.
    pub refresh_token: &'a str,
    /// Profile ARN, left out when unknown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_arn: Option<&'a str>,
}

/// Status and body of an upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body text.
    pub body: String,
}

impl RawResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        Ok(serde_json::from_str(&self.body)?)
    }

    async fn read(response: Response) -> Result<Self, FetchError> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, len = body.len(), "Read response body");
        Ok(Self { status, body })
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Regional AWS OIDC token endpoint.
#[async_trait]
pub trait OidcTokenApi: Send + Sync {
    /// Posts a `refresh_token` grant.
    async fn create_token(
        &self,
        region: &str,
        grant: &RefreshGrant<'_>,
    ) -> Result<RawResponse, FetchError>;
}

/// Kiro social refresh endpoint.
#[async_trait]
pub trait SocialAuthApi: Send + Sync {
    /// Posts a social refresh request.
    async fn refresh_token(
        &self,
        request: &SocialRefreshRequest<'_>,
    ) -> Result<RawResponse, FetchError>;
}

/// Regional usage limits endpoint.
#[async_trait]
pub trait UsageLimitsApi: Send + Sync {
    /// Fetches usage limits for the account behind `access_token`.
    async fn get_usage_limits(
        &self,
        access_token: &str,
        region: &str,
    ) -> Result<RawResponse, FetchError>;
}

// ============================================================================
// Live Implementation
// ============================================================================

/// Live HTTP implementation of all three endpoint traits.
#[derive(Debug, Clone)]
pub struct KiroHttpApi {
    ctx: FetchContext,
}

impl KiroHttpApi {
    /// Creates an adapter over the given context.
    pub fn new(ctx: FetchContext) -> Self {
        Self { ctx }
    }

    /// Returns the underlying context.
    pub fn context(&self) -> &FetchContext {
        &self.ctx
    }

    fn usage_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&self.ctx.settings.amz_user_agent) {
            headers.insert(HeaderName::from_static(AMZ_USER_AGENT), value);
        }
        headers
    }
}

#[async_trait]
impl OidcTokenApi for KiroHttpApi {
    #[instrument(skip(self, grant))]
    async fn create_token(
        &self,
        region: &str,
        grant: &RefreshGrant<'_>,
    ) -> Result<RawResponse, FetchError> {
        let url = self.ctx.endpoints().builder_id_token_url(region)?;
        let response = self.ctx.http.post_form(&url, grant).await?;
        RawResponse::read(response).await
    }
}

#[async_trait]
impl SocialAuthApi for KiroHttpApi {
    #[instrument(skip(self, request))]
    async fn refresh_token(
        &self,
        request: &SocialRefreshRequest<'_>,
    ) -> Result<RawResponse, FetchError> {
        let url = self.ctx.endpoints().social_refresh_url();
        let response = self.ctx.http.post_json(url, request).await?;
        RawResponse::read(response).await
    }
}

#[async_trait]
impl UsageLimitsApi for KiroHttpApi {
    #[instrument(skip(self, access_token))]
    async fn get_usage_limits(
        &self,
        access_token: &str,
        region: &str,
    ) -> Result<RawResponse, FetchError> {
        let url = self.ctx.endpoints().usage_limits_url(region)?;
        let response = self
            .ctx
            .http
            .get_with_bearer(&url, access_token, self.usage_headers())
            .await?;
        RawResponse::read(response).await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kirotoken_fetch::Endpoints;
    use serde_json::json;
    use wiremock::matchers::{body_json, body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api(server: &MockServer) -> KiroHttpApi {
        let ctx = FetchContext::builder()
            .endpoints(Endpoints::with_base(&server.uri()))
            .build()
            .unwrap();
        KiroHttpApi::new(ctx)
    }

    #[test]
    fn test_social_request_omits_missing_profile_arn() {
        let request = SocialRefreshRequest {
            refresh_token: "aorRT",
            profile_arn: None,
        };
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({"refreshToken": "aorRT"}));
    }

    #[test]
    fn test_raw_response_success_range() {
        assert!(RawResponse::new(200, "").is_success());
        assert!(RawResponse::new(204, "").is_success());
        assert!(!RawResponse::new(302, "").is_success());
        assert!(!RawResponse::new(401, "").is_success());
    }

    #[tokio::test]
    async fn test_create_token_posts_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=aorRT"))
            .and(body_string_contains("client_id=cid"))
            .and(body_string_contains("client_secret=secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "AT1"})))
            .expect(1)
            .mount(&server)
            .await;

        let grant = RefreshGrant::new("aorRT", "cid", "secret");
        let response = api(&server).create_token("us-east-1", &grant).await.unwrap();
        assert!(response.is_success());
        assert_eq!(response.json::<serde_json::Value>().unwrap()["access_token"], "AT1");
    }

    #[tokio::test]
    async fn test_refresh_token_posts_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/refreshToken"))
            .and(body_json(json!({"refreshToken": "aorRT", "profileArn": "arn:x"})))
            .respond_with(ResponseTemplate::new(403).set_body_string("denied"))
            .expect(1)
            .mount(&server)
            .await;

        let request = SocialRefreshRequest {
            refresh_token: "aorRT",
            profile_arn: Some("arn:x"),
        };
        let response = api(&server).refresh_token(&request).await.unwrap();
        assert_eq!(response, RawResponse::new(403, "denied"));
    }

    #[tokio::test]
    async fn test_get_usage_limits_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/getUsageLimits"))
            .and(header("authorization", "Bearer AT1"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let api = api(&server);
        let response = api.get_usage_limits("AT1", "us-east-1").await.unwrap();
        assert_eq!(response.body, "{}");
        assert!(api.usage_headers().contains_key("x-amz-user-agent"));
    }

    #[tokio::test]
    async fn test_invalid_region_never_reaches_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let ctx = FetchContext::builder()
            .endpoints(Endpoints {
                usage_limits: format!("{}/{{region}}/getUsageLimits", server.uri()),
                ..Endpoints::with_base(&server.uri())
            })
            .build()
            .unwrap();
        let result = KiroHttpApi::new(ctx).get_usage_limits("AT1", "../x").await;
        assert!(matches!(result, Err(FetchError::Http(_))));
    }
}
