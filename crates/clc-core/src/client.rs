//! HTTP client settings and the shared API client.
//!
//! [`ApiClient`] resolves resource URLs under the configured base URL, attaches
//! the bearer token, and turns raw [`ApiResponse`]s into typed values. Each call
//! is a single round trip: failures are returned to the caller, never retried.

use crate::config::ApiConfig;
use crate::query::QueryParams;
use crate::transport::{ApiRequest, ApiResponse, ReqwestTransport, Transport};
use crate::types::{LoginRequest, LoginResponse};
use crate::{Error, Result};
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Timeout applied when none is configured, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Seconds an idle pooled connection to the API is kept open.
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Idle connections kept per API host.
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

const LOGIN_PATH: [&str; 2] = ["authentication", "login"];

/// Settings for the default [`ReqwestTransport`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Per-call timeout.
    pub timeout: Duration,
    /// How long idle pooled connections survive.
    pub pool_idle_timeout: Duration,
    /// Idle connections kept per host.
    pub pool_max_idle_per_host: usize,
    /// Ask the API for gzip-encoded bodies.
    pub enable_compression: bool,
    /// Reject invalid TLS certificates.
    pub tls_verify: bool,
}

impl ClientConfig {
    /// Settings derived from an [`ApiConfig`]; pooling and compression use defaults.
    #[must_use]
    pub const fn from_api_config(config: &ApiConfig) -> Self {
        Self {
            timeout: config.timeout(),
            tls_verify: config.tls_verify,
            ..Self::DEFAULT
        }
    }

    const DEFAULT: Self = Self {
        timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT),
        pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
        enable_compression: true,
        tls_verify: true,
    };
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Client shared by all resource services.
///
/// Cloning is cheap; clones share the transport and the bearer token.
#[derive(Clone)]
pub struct ApiClient {
    config: Arc<ApiConfig>,
    base_url: Url,
    transport: Arc<dyn Transport>,
    token: Arc<RwLock<Option<SecretString>>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("alias", &self.config.alias)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client using the default `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&ClientConfig::from_api_config(&config))?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client that sends every request through `transport`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn with_transport(config: ApiConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        let base_url = config.parse_base_url()?;
        let token = config.token.clone();

        Ok(Self {
            config: Arc::new(config),
            base_url,
            transport,
            token: Arc::new(RwLock::new(token)),
        })
    }

    /// Account alias used in resource paths.
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.config.alias
    }

    /// Normalised base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Configuration this client was built from.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Replace the bearer token used for subsequent requests.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InternalError`] if the token lock is poisoned.
    pub fn set_token(&self, token: impl Into<String>) -> Result<()> {
        let mut guard = self
            .token
            .write()
            .map_err(|_| Error::InternalError("token lock poisoned".to_string()))?;
        *guard = Some(SecretString::from(token.into()));
        Ok(())
    }

    /// Returns true if a bearer token is available.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token
            .read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    /// Build the URL for a sequence of path segments under the base URL.
    ///
    /// Segments are percent-encoded individually, so identifiers cannot escape
    /// their position in the path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] if the base URL cannot carry a path.
    pub fn endpoint(&self, segments: &[&str], query: &QueryParams) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                Error::InvalidEndpoint(format!("base URL `{}` cannot be a base", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        query.apply_to(&mut url);
        Ok(url)
    }

    /// Exchange the configured username and password for a bearer token.
    ///
    /// The token is stored on the client (and its clones) and returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if credentials are missing, or the error of the login call.
    pub async fn authenticate(&self) -> Result<LoginResponse> {
        let (Some(username), Some(password)) = (&self.config.username, &self.config.password)
        else {
            return Err(Error::ConfigError(
                "username and password are required to authenticate".to_string(),
            ));
        };

        let url = self.endpoint(&LOGIN_PATH, &QueryParams::new())?;
        let body = LoginRequest {
            username,
            password: password.expose_secret(),
        };
        let request = ApiRequest::new(Method::POST, url).with_body(encode_body(&body)?);
        let login: LoginResponse = self.dispatch(request).await?;

        {
            let mut guard = self
                .token
                .write()
                .map_err(|_| Error::InternalError("token lock poisoned".to_string()))?;
            *guard = Some(login.bearer_token.clone());
        }

        info!(
            user = %login.user_name,
            alias = %login.account_alias,
            "Authenticated against CLC API"
        );
        Ok(login)
    }

    /// `GET` `url` and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns the transport, HTTP status, or decode error of the call.
    pub async fn get<T>(&self, url: Url) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.execute::<(), T>(Method::GET, url, None).await
    }

    /// `POST` `body` to `url` and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns the transport, HTTP status, or decode error of the call.
    pub async fn post<B, T>(&self, url: Url, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::POST, url, Some(body)).await
    }

    /// `PUT` `body` to `url` and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns the transport, HTTP status, or decode error of the call.
    pub async fn put<B, T>(&self, url: Url, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::PUT, url, Some(body)).await
    }

    /// `PATCH` `body` to `url` and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns the transport, HTTP status, or decode error of the call.
    pub async fn patch<B, T>(&self, url: Url, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::PATCH, url, Some(body)).await
    }

    /// `DELETE` `url` and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns the transport, HTTP status, or decode error of the call.
    pub async fn delete<T>(&self, url: Url) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.execute::<(), T>(Method::DELETE, url, None).await
    }

    async fn execute<B, T>(&self, method: Method, url: Url, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = ApiRequest::new(method, url).with_bearer_token(self.current_token()?);
        if let Some(payload) = body {
            request = request.with_body(encode_body(payload)?);
        }
        self.dispatch(request).await
    }

    async fn dispatch<T>(&self, request: ApiRequest) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = request.url.clone();
        let ApiResponse { status, body } = self.transport.send(request).await?;

        if !status.is_success() {
            debug!(%url, %status, "CLC API call failed");
            return Err(Error::Api { status, body });
        }

        serde_json::from_str(&body).map_err(|err| {
            debug!(%url, %err, "undecodable CLC API response");
            Error::from(err)
        })
    }

    fn current_token(&self) -> Result<Option<SecretString>> {
        self.token
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| Error::InternalError("token lock poisoned".to_string()))
    }
}

fn encode_body<B>(body: &B) -> Result<serde_json::Value>
where
    B: Serialize + ?Sized,
{
    serde_json::to_value(body)
        .map_err(|err| Error::InternalError(format!("Failed to encode request body: {err}")))
}
