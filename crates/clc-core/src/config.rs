//! Configuration structures for CLC API clients.
//!
//! An [`ApiConfig`] names the API endpoint, the account alias embedded in every
//! resource path, and the credentials used to obtain a bearer token.

use crate::client::DEFAULT_TIMEOUT_SECS;
use crate::Error;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Public API endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.ctl.io/v2";

/// Environment variable holding the API base URL.
pub const ENV_BASE_URL: &str = "CLC_BASE_URL";
/// Environment variable holding the account alias.
pub const ENV_ALIAS: &str = "CLC_ALIAS";
/// Environment variable holding the login username.
pub const ENV_USERNAME: &str = "CLC_USERNAME";
/// Environment variable holding the login password.
pub const ENV_PASSWORD: &str = "CLC_PASSWORD";
/// Environment variable holding a pre-issued bearer token.
pub const ENV_TOKEN: &str = "CLC_TOKEN";

/// Configuration for a CLC API client.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    /// API base URL, including the version segment
    #[validate(url)]
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Account alias embedded in resource paths
    #[validate(length(min = 1))]
    pub alias: String,

    /// Username used by `authentication/login`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Password used by `authentication/login`
    #[serde(default, skip_serializing)]
    pub password: Option<SecretString>,

    /// Bearer token attached to every request
    #[serde(default, skip_serializing)]
    pub token: Option<SecretString>,

    /// Per-call timeout in seconds, at most five minutes
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Reject invalid TLS certificates; disable only against test endpoints
    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

const fn default_tls_verify() -> bool {
    true
}

impl ApiConfig {
    /// Create a new configuration for the given endpoint and account alias.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the alias is empty.
    pub fn new(base_url: impl Into<String>, alias: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            base_url: base_url.into(),
            alias: alias.into(),
            username: None,
            password: None,
            token: None,
            request_timeout_secs: default_request_timeout_secs(),
            tls_verify: default_tls_verify(),
        };

        config.check()?;
        Ok(config)
    }

    /// Build a configuration from `CLC_*` environment variables.
    ///
    /// `CLC_ALIAS` is required; `CLC_BASE_URL` falls back to [`DEFAULT_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns an error if the alias is missing or validation fails.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let alias = lookup(ENV_ALIAS)
            .ok_or_else(|| Error::ConfigError(format!("{ENV_ALIAS} is not set")))?;
        let base_url = lookup(ENV_BASE_URL).unwrap_or_else(default_base_url);

        let mut config = Self::new(base_url, alias)?;
        config.username = lookup(ENV_USERNAME);
        config.password = lookup(ENV_PASSWORD).map(SecretString::from);
        config.token = lookup(ENV_TOKEN).map(SecretString::from);
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|err| {
            Error::ConfigError(format!("Failed to read {}: {err}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|err| {
            Error::ConfigError(format!(
                "Invalid configuration in {}: {err}",
                path.display()
            ))
        })?;

        config.check()?;
        Ok(config)
    }

    /// Set login credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(SecretString::from(password.into()));
        self
    }

    /// Set a pre-issued bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parse the base URL, normalised with a trailing slash so relative paths join under it.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_base_url(&self) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| Error::ConfigError(format!("Invalid base URL: {e}")))?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    fn check(&self) -> Result<(), Error> {
        self.validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_api_config_new() {
        let config = ApiConfig::new("https://api.ctl.io/v2", "test").unwrap();
        assert_eq!(config.alias, "test");
        assert!(config.tls_verify);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.token.is_none());
    }

    #[test]
    fn test_api_config_invalid_url() {
        assert!(ApiConfig::new("not-a-url", "test").is_err());
    }

    #[test]
    fn test_api_config_empty_alias() {
        let err = ApiConfig::new("https://api.ctl.io/v2", "").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_api_config_builder() {
        let config = ApiConfig::new("https://api.ctl.io/v2", "test")
            .unwrap()
            .with_credentials("test.user", "s0s3cur3")
            .with_token("validtoken")
            .with_timeout(60)
            .with_tls_verify(false);

        assert_eq!(config.username.as_deref(), Some("test.user"));
        assert_eq!(
            config.password.as_ref().map(|s| s.expose_secret()),
            Some("s0s3cur3")
        );
        assert_eq!(
            config.token.as_ref().map(|s| s.expose_secret()),
            Some("validtoken")
        );
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert!(!config.tls_verify);
    }

    #[test]
    fn test_parse_base_url_adds_trailing_slash() {
        let config = ApiConfig::new("https://api.ctl.io/v2", "test").unwrap();
        let url = config.parse_base_url().unwrap();
        assert_eq!(url.as_str(), "https://api.ctl.io/v2/");
        assert_eq!(
            url.join("datacenters/test").unwrap().as_str(),
            "https://api.ctl.io/v2/datacenters/test"
        );
    }

    #[test]
    fn test_from_lookup() {
        let config = ApiConfig::from_lookup(lookup_from(&[
            (ENV_ALIAS, "test"),
            (ENV_USERNAME, "test.user"),
            (ENV_PASSWORD, "s0s3cur3"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.alias, "test");
        assert_eq!(config.username.as_deref(), Some("test.user"));
        assert!(config.password.is_some());
        assert!(config.token.is_none());
    }

    #[test]
    fn test_from_lookup_requires_alias() {
        let err = ApiConfig::from_lookup(lookup_from(&[(ENV_USERNAME, "u")])).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_secrets_not_serialized() {
        let config = ApiConfig::new("https://api.ctl.io/v2", "test")
            .unwrap()
            .with_credentials("test.user", "s0s3cur3");

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("test.user"));
        assert!(!json.contains("s0s3cur3"));
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let config: ApiConfig =
            serde_json::from_str(r#"{"alias":"test","password":"pw"}"#).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.tls_verify);
        assert_eq!(
            config.password.as_ref().map(|s| s.expose_secret()),
            Some("pw")
        );
    }

    #[test]
    fn test_timeout_limited_to_five_minutes() {
        let mut config = ApiConfig::new("https://api.ctl.io/v2", "test").unwrap();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        config.request_timeout_secs = 301;
        assert!(config.validate().is_err());

        config.request_timeout_secs = 30;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_loads_json() {
        let file_name = format!("clc-config-{}.json", std::process::id());
        let path = std::env::temp_dir().join(file_name);
        std::fs::write(
            &path,
            r#"{"alias":"test","username":"test.user","password":"s0s3cur3","tlsVerify":false}"#,
        )
        .unwrap();

        let loaded = ApiConfig::from_file(&path);
        std::fs::remove_file(&path).unwrap();
        let config = loaded.unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.alias, "test");
        assert_eq!(config.request_timeout_secs, 30);
        assert!(!config.tls_verify);
        assert_eq!(config.username.as_deref(), Some("test.user"));
        assert_eq!(
            config.password.as_ref().map(|s| s.expose_secret()),
            Some("s0s3cur3")
        );
        assert!(config.token.is_none());
    }

    #[test]
    fn test_from_file_missing() {
        let err = ApiConfig::from_file("/nonexistent/clc.json").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }
}
