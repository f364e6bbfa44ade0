//! HTTP client with tracing and domain allowlist.
//!
//! This module provides a wrapped HTTP client that adds:
//! - Request/response tracing
//! - Domain allowlist for security
//! - Convenience methods for the three request shapes the endpoints use
//!   (bearer GET, form POST, JSON POST)

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{header, Client, Response};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::context::FetchSettings;
use crate::error::HttpError;

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for `KiroToken`.
pub const USER_AGENT: &str = concat!("KiroTokenTools/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper with tracing and domain allowlist.
///
/// Every request is sent exactly once; there is no retry layer.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    allowed_domains: Option<Vec<String>>,
}

impl HttpClient {
    /// Creates a new HTTP client with default settings.
    pub fn new() -> Result<Self, HttpError> {
        Self::from_settings(&FetchSettings::default())
    }

    /// Creates a client from fetch settings (timeout, user agent, allowlist).
    pub fn from_settings(settings: &FetchSettings) -> Result<Self, HttpError> {
        let mut client = Self::build(settings.timeout(), &settings.user_agent)?;
        client.allowed_domains.clone_from(&settings.allowed_domains);
        Ok(client)
    }

    /// Creates a new HTTP client with domain allowlist.
    ///
    /// Only requests to domains in the allowlist will be permitted.
    pub fn with_allowed_domains(domains: Vec<String>) -> Result<Self, HttpError> {
        let mut client = Self::new()?;
        client.allowed_domains = Some(domains);
        Ok(client)
    }

    fn build(timeout: Duration, user_agent: &str) -> Result<Self, HttpError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let inner = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .default_headers(headers)
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;

        Ok(Self {
            inner,
            allowed_domains: None,
        })
    }

    /// Checks if a URL's domain is allowed.
    fn is_domain_allowed(&self, url: &str) -> Result<(), HttpError> {
        let Some(ref allowed) = self.allowed_domains else {
            return Ok(()); // No restrictions
        };

        let parsed = Url::parse(url).map_err(|e| HttpError::InvalidUrl(e.to_string()))?;

        let host = parsed
            .host_str()
            .ok_or_else(|| HttpError::InvalidUrl("No host in URL".to_string()))?;

        // Check if host matches any allowed domain
        let allowed = allowed
            .iter()
            .any(|domain| host == domain || host.ends_with(&format!(".{domain}")));

        if allowed {
            Ok(())
        } else {
            Err(HttpError::DomainNotAllowed(host.to_string()))
        }
    }

    /// Performs a GET request with a bearer token and extra headers.
    #[instrument(skip(self, token, headers), fields(url = %url))]
    pub async fn get_with_bearer(
        &self,
        url: &str,
        token: &str,
        headers: HeaderMap,
    ) -> Result<Response, HttpError> {
        self.is_domain_allowed(url)?;
        debug!("GET request with bearer auth");

        let response = self
            .inner
            .get(url)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .headers(headers)
            .send()
            .await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Performs a POST request with JSON body.
    #[instrument(skip(self, body), fields(url = %url))]
    pub async fn post_json<T: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<Response, HttpError> {
        self.is_domain_allowed(url)?;
        debug!("POST request with JSON");

        let response = self.inner.post(url).json(body).send().await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Performs a POST request with form data.
    #[instrument(skip(self, form), fields(url = %url))]
    pub async fn post_form<T: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        form: &T,
    ) -> Result<Response, HttpError> {
        self.is_domain_allowed(url)?;
        debug!("POST request with form data");

        let response = self.inner.post(url).form(form).send().await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }
}

// ============================================================================
// Tests
// ============================================================================
