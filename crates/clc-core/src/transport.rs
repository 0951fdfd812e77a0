//! Pluggable HTTP transport.
//!
//! Services never talk to `reqwest` directly: they hand an [`ApiRequest`] to a
//! [`Transport`] and receive the raw status and body back. [`ReqwestTransport`]
//! is the production implementation; tests substitute their own.

use crate::client::ClientConfig;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const USER_AGENT: &str = concat!("clc-sdk/", env!("CARGO_PKG_VERSION"));

/// A single outbound API call.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP verb
    pub method: Method,
    /// Fully resolved request URL
    pub url: Url,
    /// JSON body, if any
    pub body: Option<serde_json::Value>,
    /// Bearer token for the `Authorization` header
    pub bearer_token: Option<SecretString>,
}

impl ApiRequest {
    /// Create a request without a body or token.
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            body: None,
            bearer_token: None,
        }
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach a bearer token.
    #[must_use]
    pub fn with_bearer_token(mut self, token: Option<SecretString>) -> Self {
        self.bearer_token = token;
        self
    }
}

/// Raw response returned by a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Response body text
    pub body: String,
}

impl ApiResponse {
    /// Create a response from status and body.
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// HTTP transport used by [`crate::ApiClient`].
///
/// Implementations return non-success statuses as a normal [`ApiResponse`];
/// only connection level failures are reported as errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and return its status and body.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// [`Transport`] backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Build a transport from HTTP settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the underlying client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = ClientBuilder::new()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .connect_timeout(Duration::from_secs(10))
            .gzip(config.enable_compression);

        if !config.tls_verify {
            warn!("TLS verification disabled for CLC API client");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder
            .build()
            .map_err(|err| Error::ConfigError(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self { http })
    }

    /// Wrap an existing `reqwest` client.
    #[must_use]
    pub fn from_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let ApiRequest {
            method,
            url,
            body,
            bearer_token,
        } = request;

        debug!(%method, %url, has_body = body.is_some(), "Sending CLC API request");

        let mut builder = self
            .http
            .request(method.clone(), url.clone())
            .header(ACCEPT, "application/json");

        if let Some(token) = &bearer_token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token.expose_secret()));
        }
        if let Some(payload) = &body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .json(payload);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            debug!(%method, %url, %status, "CLC API request completed");
        } else {
            warn!(%method, %url, %status, "CLC API request returned error status");
        }

        Ok(ApiResponse { status, body })
    }
}
