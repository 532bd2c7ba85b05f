//! Configuration module for the Auth0 client.
//!
//! Both API facades are configured from the same [`Auth0Config`]: the base
//! URL of the tenant endpoint they talk to, optional transport settings and
//! the `Auth0-Client` telemetry switch.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use std::time::Duration;
use url::Url;

use crate::errors::{Auth0Error, Auth0Result};

/// Environment variable holding the Authentication API base URL.
pub const ENV_AUTHENTICATION_API_URL: &str = "AUTH0_AUTHENTICATION_API_URL";

/// Environment variable holding the Management API base URL.
pub const ENV_MANAGEMENT_API_URL: &str = "AUTH0_MANAGEMENT_API_URL";

/// Environment variable holding the Management API bearer token.
pub const ENV_MANAGEMENT_API_TOKEN: &str = "AUTH0_MANAGEMENT_API_TOKEN";

/// Environment variable holding an optional request timeout in seconds.
pub const ENV_TIMEOUT: &str = "AUTH0_TIMEOUT";

/// Name of the telemetry header sent with every request.
pub const TELEMETRY_HEADER: &str = "Auth0-Client";

/// Configuration for an Auth0 API client.
#[derive(Debug, Clone)]
pub struct Auth0Config {
    /// Base URL for API requests, without a trailing slash.
    pub base_url: String,
    /// Request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
    /// Send the `Auth0-Client` telemetry header.
    pub telemetry: bool,
    /// Custom headers to include in requests.
    pub custom_headers: Vec<(String, String)>,
}

impl Auth0Config {
    /// Creates a new configuration builder.
    pub fn builder() -> Auth0ConfigBuilder {
        Auth0ConfigBuilder::new()
    }

    /// Creates a configuration whose base URL is read from `var_name`.
    ///
    /// `AUTH0_TIMEOUT` (seconds) is honoured when set.
    pub fn from_env(var_name: &str) -> Auth0Result<Self> {
        let base_url = std::env::var(var_name).map_err(|_| {
            Auth0Error::configuration(format!("{var_name} environment variable not set"))
        })?;

        let mut builder = Auth0ConfigBuilder::new().base_url(base_url);

        if let Ok(timeout_str) = std::env::var(ENV_TIMEOUT) {
            if let Ok(timeout_secs) = timeout_str.parse::<u64>() {
                builder = builder.timeout(Duration::from_secs(timeout_secs));
            }
        }

        builder.build()
    }

    /// Returns the full URL for an endpoint.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Returns the headers every request carries.
    pub(crate) fn default_headers(&self) -> Vec<(String, String)> {
        let mut headers = self.custom_headers.clone();
        headers.push(("Accept".to_string(), mime::APPLICATION_JSON.to_string()));
        if self.telemetry {
            headers.push((TELEMETRY_HEADER.to_string(), telemetry_header_value()));
        }
        headers
    }
}

/// Encodes the client name and version the way Auth0 SDKs report them.
pub fn telemetry_header_value() -> String {
    let payload = serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    });
    URL_SAFE_NO_PAD.encode(payload.to_string())
}

/// Builder for `Auth0Config`.
#[derive(Debug)]
pub struct Auth0ConfigBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    telemetry: bool,
    custom_headers: Vec<(String, String)>,
}

impl Default for Auth0ConfigBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: None,
            telemetry: true,
            custom_headers: Vec::new(),
        }
    }
}

impl Auth0ConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL, e.g. `https://tenant.auth0.com`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the tenant domain; `https://` is prepended.
    pub fn domain(mut self, domain: impl AsRef<str>) -> Self {
        self.base_url = Some(format!("https://{}", domain.as_ref()));
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    /// Enables or disables the `Auth0-Client` telemetry header.
    pub fn telemetry(mut self, enabled: bool) -> Self {
        self.telemetry = enabled;
        self
    }

    /// Adds a custom header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.push((name.into(), value.into()));
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> Auth0Result<Auth0Config> {
        let raw = self
            .base_url
            .ok_or_else(|| Auth0Error::configuration("Base URL is required"))?;

        let parsed = Url::parse(raw.trim())?;

        match parsed.scheme() {
            "https" => {}
            "http" => {
                let loopback = matches!(
                    parsed.host_str(),
                    Some("localhost" | "127.0.0.1" | "[::1]")
                );
                if !loopback {
                    tracing::warn!(base_url = %parsed, "Base URL does not use HTTPS");
                }
            }
            other => {
                return Err(Auth0Error::configuration(format!(
                    "Unsupported URL scheme '{other}'"
                )));
            }
        }

        if parsed.host_str().is_none() {
            return Err(Auth0Error::configuration("Base URL must include a host"));
        }

        let base_url = parsed.as_str().trim_end_matches('/').to_string();

        Ok(Auth0Config {
            base_url,
            timeout: self.timeout,
            telemetry: self.telemetry,
            custom_headers: self.custom_headers,
        })
    }
}
