//! Error types for the Auth0 client.
//!
//! Two remote error kinds are surfaced: [`Auth0Error::Authentication`] for the
//! token and login endpoints, and [`Auth0Error::Api`] for the Management API.
//! Transport failures stay separate from both so callers never confuse a
//! refused connection with a rejected credential.

use serde::Deserialize;
use thiserror::Error;

use crate::transport::{HttpResponse, TransportError};

/// Result type alias for Auth0 operations.
pub type Auth0Result<T> = Result<T, Auth0Error>;

/// Error type for Auth0 client operations.
#[derive(Debug, Error)]
pub enum Auth0Error {
    /// Configuration error (invalid base URL, missing token, etc.)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// A required request field was missing before dispatch.
    #[error("Validation error: {message}")]
    Validation {
        /// Error message describing the validation issue.
        message: String,
        /// The field that failed validation.
        field: Option<String>,
    },

    /// An authentication endpoint returned a non-success status.
    #[error("Authentication failed (HTTP {status_code}): {error}{}", .error_description.as_deref().map(|d| format!(" - {d}")).unwrap_or_default())]
    Authentication {
        /// HTTP status code.
        status_code: u16,
        /// Remote error code, e.g. `invalid_grant`.
        error: String,
        /// Remote error description.
        error_description: Option<String>,
    },

    /// A Management API endpoint returned a non-success status.
    #[error("API error (HTTP {status_code}): {message}")]
    Api {
        /// HTTP status code.
        status_code: u16,
        /// Remote error name, e.g. `Bad Request`.
        error: Option<String>,
        /// Remote error message.
        message: String,
        /// Remote machine-readable error code, e.g. `invalid_body`.
        error_code: Option<String>,
    },

    /// Network/connection error.
    #[error("Network error: {message}")]
    Network {
        /// Error message.
        message: String,
        /// Underlying cause.
        cause: Option<String>,
    },

    /// Timeout configured on the transport elapsed.
    #[error("Request timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message.
        message: String,
    },
}

impl Auth0Error {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Auth0Error::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Creates a validation error for a missing required field.
    pub fn missing_field(field: &str) -> Self {
        Auth0Error::Validation {
            message: format!("{field} is required"),
            field: Some(field.to_string()),
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Auth0Error::Configuration {
            message: message.into(),
        }
    }

    /// Returns true for errors raised by an authentication endpoint.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Auth0Error::Authentication { .. })
    }

    /// Returns true for errors raised by a Management API endpoint.
    pub fn is_api(&self) -> bool {
        matches!(self, Auth0Error::Api { .. })
    }

    /// Returns true if the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Auth0Error::Network { .. } | Auth0Error::Timeout { .. })
    }

    /// Returns the HTTP status code of a remote error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Auth0Error::Authentication { status_code, .. }
            | Auth0Error::Api { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Returns the remote error code, if the service supplied one.
    pub fn remote_error_code(&self) -> Option<&str> {
        match self {
            Auth0Error::Authentication { error, .. } => Some(error),
            Auth0Error::Api { error_code, error, .. } => {
                error_code.as_deref().or(error.as_deref())
            }
            _ => None,
        }
    }

    /// Builds an [`Auth0Error::Authentication`] from a failed response.
    pub(crate) fn from_authentication_response(response: &HttpResponse) -> Self {
        let body = ErrorResponseBody::parse(&response.body);
        let error = body
            .error
            .or(body.code)
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| reason_phrase(response.status));
        let error_description = body
            .error_description
            .or(body.description)
            .or(body.message);

        Auth0Error::Authentication {
            status_code: response.status,
            error,
            error_description,
        }
    }

    /// Builds an [`Auth0Error::Api`] from a failed response.
    pub(crate) fn from_api_response(response: &HttpResponse) -> Self {
        let body = ErrorResponseBody::parse(&response.body);
        let message = body
            .message
            .or(body.error_description)
            .or(body.description)
            .unwrap_or_else(|| {
                let raw = String::from_utf8_lossy(&response.body).trim().to_string();
                if raw.is_empty() {
                    reason_phrase(response.status)
                } else {
                    raw
                }
            });

        Auth0Error::Api {
            status_code: response.status,
            error: body.error,
            message,
            error_code: body.error_code.or(body.code),
        }
    }
}

/// Error body returned by Auth0.
///
/// The service is not consistent about its error shape: the token endpoints
/// answer `{error, error_description}`, the Management API answers
/// `{statusCode, error, message, errorCode}` and the database login endpoints
/// answer `{code, description}`. All fields are optional so one struct covers
/// every variant.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponseBody {
    /// OAuth error code, or the HTTP error name on Management responses.
    #[serde(default)]
    pub error: Option<String>,
    /// OAuth error description.
    #[serde(default)]
    pub error_description: Option<String>,
    /// Management API message.
    #[serde(default)]
    pub message: Option<String>,
    /// Management API machine-readable code.
    #[serde(default, rename = "errorCode")]
    pub error_code: Option<String>,
    /// Legacy error code.
    #[serde(default)]
    pub code: Option<String>,
    /// Legacy error description.
    #[serde(default)]
    pub description: Option<String>,
}

impl ErrorResponseBody {
    /// Parses an error body, falling back to an empty body on malformed JSON.
    pub fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

fn reason_phrase(status: u16) -> String {
    http::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .map_or_else(|| format!("http_{status}"), |r| r.to_lowercase().replace(' ', "_"))
}

impl From<TransportError> for Auth0Error {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout { .. } => Auth0Error::Timeout {
                message: err.to_string(),
            },
            TransportError::Connection { ref message } => Auth0Error::Network {
                message: err.to_string(),
                cause: Some(message.clone()),
            },
            other => Auth0Error::Network {
                message: other.to_string(),
                cause: None,
            },
        }
    }
}

impl From<serde_json::Error> for Auth0Error {
    fn from(err: serde_json::Error) -> Self {
        Auth0Error::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for Auth0Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Auth0Error::Timeout {
                message: err.to_string(),
            }
        } else {
            Auth0Error::Network {
                message: err.to_string(),
                cause: std::error::Error::source(&err).map(ToString::to_string),
            }
        }
    }
}

impl From<url::ParseError> for Auth0Error {
    fn from(err: url::ParseError) -> Self {
        Auth0Error::Configuration {
            message: format!("Invalid URL: {err}"),
        }
    }
}
