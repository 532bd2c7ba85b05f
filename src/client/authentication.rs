//! Authentication API client.

use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::instrument;

use crate::auth::{AuthProvider, BearerTokenAuth};
use crate::config::{Auth0Config, Auth0ConfigBuilder, ENV_AUTHENTICATION_API_URL};
use crate::errors::{Auth0Error, Auth0Result};
use crate::observability::{LogConfig, RequestTimer};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, HttpTransportImpl};
use crate::types::authentication::{
    require, AccessTokenResponse, AuthenticationRequest, AuthenticationResponse,
    DelegationTokenResponse, ExchangeCodeRequest, IdTokenDelegationRequest, UserInfo,
};
use crate::types::grants::TokenRequest;
use crate::types::login::{UsernamePasswordLoginRequest, UsernamePasswordLoginResponse};

const USER_INFO_PATH: &str = "userinfo";
const USERNAME_PASSWORD_LOGIN_PATH: &str = "usernamepassword/login";

/// Client for the Auth0 Authentication API.
///
/// Every operation is a single HTTP round trip: nothing is retried, cached or
/// refreshed behind the caller's back.
///
/// # Example
///
/// ```rust,no_run
/// use auth0_client::{AuthenticationApiClient, AuthenticationRequest};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = AuthenticationApiClient::new("https://tenant.auth0.com")?;
///
///     let tokens = client
///         .authenticate(
///             AuthenticationRequest::new("client-id", "u@example.com", "password")
///                 .with_client_secret("client-secret")
///                 .with_connection("Username-Password-Authentication")
///                 .with_scope("openid offline_access"),
///         )
///         .await?;
///
///     println!("refresh token issued: {}", tokens.has_refresh_token());
///     Ok(())
/// }
/// ```
pub struct AuthenticationApiClient {
    config: Auth0Config,
    transport: Arc<dyn HttpTransport>,
    log_config: LogConfig,
}

impl AuthenticationApiClient {
    /// Creates a new client builder.
    pub fn builder() -> AuthenticationApiClientBuilder {
        AuthenticationApiClientBuilder::new()
    }

    /// Creates a client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Auth0Result<Self> {
        Self::builder().base_url(base_url).build()
    }

    /// Creates a client from `AUTH0_AUTHENTICATION_API_URL`.
    pub fn from_env() -> Auth0Result<Self> {
        let config = Auth0Config::from_env(ENV_AUTHENTICATION_API_URL)?;
        Self::builder().config(config).build()
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Auth0Config {
        &self.config
    }

    /// Authenticates a user with the resource-owner password grant.
    ///
    /// The response carries an id token only if the scope included `openid`
    /// and a refresh token only if it included `offline_access`.
    #[instrument(skip(self, request), fields(connection = ?request.connection, scope = %request.scope))]
    pub async fn authenticate(
        &self,
        request: AuthenticationRequest,
    ) -> Auth0Result<AuthenticationResponse> {
        let wants_id_token = request.requests_id_token();
        let wants_refresh_token = request.requests_offline_access();

        let mut response: AuthenticationResponse =
            self.request_token(&TokenRequest::Password(request)).await?;

        if response.refresh_token.is_some() && !wants_refresh_token {
            tracing::debug!("Discarding refresh token that was not requested");
            response.refresh_token = None;
        }
        if wants_id_token && response.id_token.is_none() {
            tracing::warn!("Scope requested openid but no id token was issued");
        }

        Ok(response)
    }

    /// Exchanges an authorization code for an access token.
    #[instrument(skip(self, request), fields(redirect_uri = %request.redirect_uri))]
    pub async fn exchange_code_for_access_token(
        &self,
        request: ExchangeCodeRequest,
    ) -> Auth0Result<AccessTokenResponse> {
        self.request_token(&TokenRequest::AuthorizationCode(request))
            .await
    }

    /// Exchanges an id token for a delegation token aimed at another client.
    ///
    /// The id token must come from an earlier [`authenticate`](Self::authenticate).
    #[instrument(skip(self, request), fields(target = %request.target))]
    pub async fn get_delegation_token(
        &self,
        request: IdTokenDelegationRequest,
    ) -> Auth0Result<DelegationTokenResponse> {
        self.request_token(&TokenRequest::Delegation(request)).await
    }

    /// Fetches the profile of the user an access token was issued to.
    #[instrument(skip(self, access_token))]
    pub async fn get_user_info(&self, access_token: &str) -> Auth0Result<UserInfo> {
        require("access_token", access_token)?;

        let mut request = self.request(HttpRequest::get(USER_INFO_PATH));
        BearerTokenAuth::from_string(access_token).apply_auth(&mut request.headers);

        let response = self.send("get_user_info", request).await?;
        decode(&response)
    }

    /// Requests the legacy username/password login form.
    ///
    /// Returns the raw HTML markup; submitting the form is up to the caller.
    #[instrument(skip(self, request), fields(connection = %request.connection))]
    pub async fn username_password_login(
        &self,
        request: UsernamePasswordLoginRequest,
    ) -> Auth0Result<UsernamePasswordLoginResponse> {
        request.validate()?;

        let http_request = self
            .request(HttpRequest::post(USERNAME_PASSWORD_LOGIN_PATH))
            .with_json(&request)?
            .with_header("Accept", mime::TEXT_HTML.to_string());

        let response = self.send("username_password_login", http_request).await?;
        let html_form = response.text();

        if html_form.trim().is_empty() {
            return Err(Auth0Error::Serialization {
                message: "Login form response was empty".to_string(),
            });
        }

        Ok(UsernamePasswordLoginResponse { html_form })
    }

    /// Posts a grant to its endpoint and decodes the issued tokens.
    async fn request_token<T: DeserializeOwned>(&self, grant: &TokenRequest) -> Auth0Result<T> {
        grant.validate()?;

        tracing::debug!(
            grant_type = %grant.grant_type(),
            endpoint = grant.endpoint(),
            "Requesting token"
        );

        let http_request = self
            .request(HttpRequest::post(grant.endpoint()))
            .with_json(grant)?;

        let response = self.send(grant.endpoint(), http_request).await?;
        decode(&response)
    }

    /// Applies the default headers to a request.
    fn request(&self, mut request: HttpRequest) -> HttpRequest {
        for (name, value) in self.config.default_headers() {
            request.headers.insert(name, value);
        }
        request
    }

    async fn send(&self, operation: &'static str, request: HttpRequest) -> Auth0Result<HttpResponse> {
        if self.log_config.log_request_bodies {
            if let Some(body) = &request.body {
                tracing::debug!(body = %self.log_config.format_body(body), "Request body");
            }
        }

        let timer = RequestTimer::start(operation);
        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                timer.finish(false);
                return Err(e.into());
            }
        };

        if !response.is_success() {
            timer.finish(false);
            let error = Auth0Error::from_authentication_response(&response);
            tracing::warn!(status = response.status, error = %error, "Authentication request rejected");
            return Err(error);
        }

        timer.finish(true);
        Ok(response)
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Auth0Result<T> {
    response.json().map_err(|e| Auth0Error::Serialization {
        message: format!("Failed to parse response: {e}"),
    })
}

impl std::fmt::Debug for AuthenticationApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationApiClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for the Authentication API client.
pub struct AuthenticationApiClientBuilder {
    config_builder: Auth0ConfigBuilder,
    config: Option<Auth0Config>,
    transport: Option<Arc<dyn HttpTransport>>,
    log_config: LogConfig,
}

impl AuthenticationApiClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            config_builder: Auth0ConfigBuilder::new(),
            config: None,
            transport: None,
            log_config: LogConfig::default(),
        }
    }

    /// Sets the base URL.
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
    pub fn build(self) -> Auth0Result<AuthenticationApiClient> {
        let config = match self.config {
            Some(config) => config,
            None => self.config_builder.build()?,
        };

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(
                HttpTransportImpl::new(&config.base_url, config.timeout)
                    .map_err(|e| Auth0Error::configuration(e.to_string()))?,
            ),
        };

        Ok(AuthenticationApiClient {
            config,
            transport,
            log_config: self.log_config,
        })
    }
}

impl Default for AuthenticationApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
