//! Error types for CLC API operations.
//!
//! Every service call either fails locally (validation, configuration) before
//! anything is sent, or surfaces the transport, HTTP status or decode failure
//! of its single round trip. Nothing is retried.

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a CLC API call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Missing or malformed settings
    #[error("invalid client configuration: {0}")]
    ConfigError(String),

    /// Request input rejected before sending
    #[error("request rejected before sending: {0}")]
    ValidationError(String),

    /// The API answered with a non-success status.
    ///
    /// `body` is the response body exactly as received.
    #[error("CLC API returned {status}: {body}")]
    Api {
        /// Status code of the response
        status: StatusCode,
        /// Raw response body
        body: String,
    },

    /// Transport failure before a response was received
    #[error("CLC API call failed: {0}")]
    HttpError(String),

    /// Call exceeded the configured timeout
    #[error("CLC API call timed out: {0}")]
    Timeout(String),

    /// The API host could not be reached
    #[error("CLC API unavailable: {0}")]
    ServiceUnavailable(String),

    /// A response lacks a resource it should reference, such as a status link
    #[error("resource not found: {0}")]
    NotFound(String),

    /// Failed to decode a response body
    #[error("unexpected response body: {0}")]
    ParseError(String),

    /// A path could not be joined onto the base URL
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Unexpected state inside the client
    #[error("client bug: {0}")]
    InternalError(String),
}

/// Result of a CLC API call.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Stable, machine-readable name of the failure kind.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::Api { .. } => "API_ERROR",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::NotFound(_) => "NOT_FOUND",
            Self::ParseError(_) => "PARSE_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// HTTP status of an [`Error::Api`] failure.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::ConfigError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        let cases = [
            (Error::ConfigError(String::new()), "CONFIG_ERROR"),
            (Error::ValidationError(String::new()), "VALIDATION_ERROR"),
            (
                Error::Api {
                    status: StatusCode::CONFLICT,
                    body: String::new(),
                },
                "API_ERROR",
            ),
            (Error::NotFound(String::new()), "NOT_FOUND"),
            (Error::ParseError(String::new()), "PARSE_ERROR"),
        ];
        for (err, code) in cases {
            assert_eq!(err.error_code(), code);
        }
    }

    #[test]
    fn display_includes_detail() {
        let err = Error::ValidationError("name is required".to_string());
        assert_eq!(
            err.to_string(),
            "request rejected before sending: name is required"
        );

        let err = Error::Api {
            status: StatusCode::NOT_FOUND,
            body: "no such server".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "CLC API returned 404 Not Found: no such server"
        );
    }

    #[test]
    fn status_only_for_api_errors() {
        let err = Error::Api {
            status: StatusCode::TOO_MANY_REQUESTS,
            body: String::new(),
        };
        assert_eq!(err.status(), Some(StatusCode::TOO_MANY_REQUESTS));
        assert_eq!(Error::Timeout(String::new()).status(), None);
    }

    #[test]
    fn decode_failures_keep_serde_text() {
        let serde_err = serde_json::from_str::<u32>("<html>").unwrap_err();
        let expected = serde_err.to_string();
        let err: Error = serde_err.into();
        assert_eq!(err, Error::ParseError(expected));
    }

    #[test]
    fn bad_base_url_is_invalid_endpoint() {
        let err: Error = url::Url::parse("api.ctl.io/v2").unwrap_err().into();
        assert!(matches!(err, Error::InvalidEndpoint(_)));
    }
}
