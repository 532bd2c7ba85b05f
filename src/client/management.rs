//! Management API client.

use secrecy::SecretString;
use std::sync::Arc;

use crate::auth::{AuthProvider, BearerTokenAuth};
use crate::config::{
    Auth0Config, Auth0ConfigBuilder, ENV_MANAGEMENT_API_TOKEN, ENV_MANAGEMENT_API_URL,
};
use crate::errors::{Auth0Error, Auth0Result};
use crate::observability::LogConfig;
use crate::services::{
    ConnectionsService, ServiceContext, TenantSettingsService, UsersService,
    MANAGEMENT_API_PREFIX,
};
use crate::transport::{HttpTransport, HttpTransportImpl};

/// Client for the Auth0 Management API v2.
///
/// Every call is authorized with the bearer token the client was built with.
///
/// # Example
///
/// ```rust,no_run
/// use auth0_client::{ManagementApiClient, UserCreateRequest};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = ManagementApiClient::new("management-api-token", "https://tenant.auth0.com")?;
///
///     let user = client
///         .users()
///         .create(
///             UserCreateRequest::new("Username-Password-Authentication", "u@example.com")
///                 .with_password("correct horse battery staple"),
///         )
///         .await?;
///
///     client.users().delete(&user.user_id).await?;
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct ManagementApiClient {
    config: Auth0Config,
    users: UsersService,
    connections: ConnectionsService,
    tenant_settings: TenantSettingsService,
}

impl ManagementApiClient {
    /// Creates a new client builder.
    pub fn builder() -> ManagementApiClientBuilder {
        ManagementApiClientBuilder::new()
    }

    /// Creates a client for the tenant at `base_url` using `token`.
    pub fn new(token: impl Into<String>, base_url: impl Into<String>) -> Auth0Result<Self> {
        Self::builder().token(token).base_url(base_url).build()
    }

    /// Creates a client from `AUTH0_MANAGEMENT_API_TOKEN` and
    /// `AUTH0_MANAGEMENT_API_URL`.
    pub fn from_env() -> Auth0Result<Self> {
        let token = std::env::var(ENV_MANAGEMENT_API_TOKEN).map_err(|_| {
            Auth0Error::configuration(format!(
                "{ENV_MANAGEMENT_API_TOKEN} environment variable not set"
            ))
        })?;
        let config = Auth0Config::from_env(ENV_MANAGEMENT_API_URL)?;

        Self::builder().token(token).config(config).build()
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Auth0Config {
        &self.config
    }

    /// Users service.
    pub fn users(&self) -> &UsersService {
        &self.users
    }

    /// Connections service.
    pub fn connections(&self) -> &ConnectionsService {
        &self.connections
    }

    /// Tenant settings service.
    pub fn tenant_settings(&self) -> &TenantSettingsService {
        &self.tenant_settings
    }
}

/// Builder for the Management API client.
pub struct ManagementApiClientBuilder {
    config_builder: Auth0ConfigBuilder,
    config: Option<Auth0Config>,
    token: Option<SecretString>,
    auth: Option<Arc<dyn AuthProvider>>,
    transport: Option<Arc<dyn HttpTransport>>,
    log_config: LogConfig,
}

impl ManagementApiClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            config_builder: Auth0ConfigBuilder::new(),
            config: None,
            token: None,
            auth: None,
            transport: None,
            log_config: LogConfig::default(),
        }
    }

    /// Sets the Management API bearer token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::new(token.into()));
        self
    }

    /// Sets the tenant base URL.
    ///
    /// A trailing `/api/v2` is accepted and stripped.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(base_url);
        self
    }

    /// Sets the tenant domain.
    pub fn domain(mut self, domain: impl AsRef<str>) -> Self {
        self.config_builder = self.config_builder.domain(domain);
        self
    }

    /// Uses an already built configuration.
    pub fn config(mut self, config: Auth0Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets a transport-level timeout.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets a custom credential provider instead of a bearer token.
    pub fn auth(mut self, auth: Arc<dyn AuthProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Sets a custom transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets the log configuration.
    pub fn log_config(mut self, config: LogConfig) -> Self {
        self.log_config = config;
        self
    }

    /// Builds the client.
    pub fn build(self) -> Auth0Result<ManagementApiClient> {
        let mut config = match self.config {
            Some(config) => config,
            None => self.config_builder.build()?,
        };
        config.base_url = tenant_root(&config.base_url);

        let auth: Arc<dyn AuthProvider> = match (self.auth, self.token) {
            (Some(auth), _) => auth,
            (None, Some(token)) => Arc::new(BearerTokenAuth::new(token)),
            (None, None) => {
                return Err(Auth0Error::configuration(
                    "Management API token is required",
                ))
            }
        };
        auth.validate()?;

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(
                HttpTransportImpl::new(&config.base_url, config.timeout)
                    .map_err(|e| Auth0Error::configuration(e.to_string()))?,
            ),
        };

        let context = ServiceContext::new(transport, auth, config.default_headers())
            .with_log_config(self.log_config);

        Ok(ManagementApiClient {
            users: UsersService::new(context.clone()),
            connections: ConnectionsService::new(context.clone()),
            tenant_settings: TenantSettingsService::new(context),
            config,
        })
    }
}

impl Default for ManagementApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Strips the API prefix so paths are not prefixed twice.
fn tenant_root(base_url: &str) -> String {
    let suffix = format!("/{MANAGEMENT_API_PREFIX}");
    base_url
        .strip_suffix(suffix.as_str())
        .unwrap_or(base_url)
        .to_string()
}
