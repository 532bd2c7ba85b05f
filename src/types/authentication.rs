//! Authentication API request and response types.

use serde::{Deserialize, Serialize};

use super::common::{scope_contains, Metadata, Timestamp};
use super::users::Identity;
use crate::errors::{Auth0Error, Auth0Result};

/// Scope value that makes the service issue an id token.
pub const SCOPE_OPENID: &str = "openid";

/// Scope value that makes the service issue a refresh token.
pub const SCOPE_OFFLINE_ACCESS: &str = "offline_access";

/// Resource-owner password grant.
///
/// Leaving `connection` empty makes the service authenticate against the
/// tenant's default directory.
#[derive(Clone, Default, Serialize)]
pub struct AuthenticationRequest {
    /// Client id of the application.
    pub client_id: String,
    /// Client secret of the application.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    /// Connection (user store) to authenticate against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,
    /// Username or email of the user.
    pub username: String,
    /// Password of the user.
    pub password: String,
    /// Space-delimited scopes, e.g. `openid offline_access`.
    pub scope: String,
}

impl AuthenticationRequest {
    /// Creates a password grant for the given client and user.
    pub fn new(
        client_id: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            username: username.into(),
            password: password.into(),
            scope: SCOPE_OPENID.to_string(),
            ..Self::default()
        }
    }

    /// Sets the client secret.
    pub fn with_client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Sets the connection.
    pub fn with_connection(mut self, connection: impl Into<String>) -> Self {
        self.connection = Some(connection.into());
        self
    }

    /// Sets the scope.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Returns true if the scope asks for an id token.
    pub fn requests_id_token(&self) -> bool {
        scope_contains(&self.scope, SCOPE_OPENID)
    }

    /// Returns true if the scope asks for a refresh token.
    pub fn requests_offline_access(&self) -> bool {
        scope_contains(&self.scope, SCOPE_OFFLINE_ACCESS)
    }

    /// Checks required-field presence.
    pub fn validate(&self) -> Auth0Result<()> {
        require("client_id", &self.client_id)?;
        require(
            "client_secret",
            self.client_secret.as_deref().unwrap_or_default(),
        )?;
        require("username", &self.username)?;
        require("password", &self.password)?;
        if let Some(connection) = &self.connection {
            require("connection", connection)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for AuthenticationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationRequest")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "[REDACTED]"))
            .field("connection", &self.connection)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("scope", &self.scope)
            .finish()
    }
}

/// Tokens issued by a password grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticationResponse {
    /// Access token.
    pub access_token: String,
    /// Id token; only issued when the scope contained `openid`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    /// Refresh token; only issued when the scope contained `offline_access`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Token type, normally `bearer`.
    pub token_type: String,
    /// Lifetime of the access token in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}

impl AuthenticationResponse {
    /// Returns true if a refresh token was issued.
    pub fn has_refresh_token(&self) -> bool {
        self.refresh_token.is_some()
    }
}

/// Authorization-code grant.
#[derive(Clone, Default, Serialize)]
pub struct ExchangeCodeRequest {
    /// Client id of the application.
    pub client_id: String,
    /// Client secret of the application.
    pub client_secret: String,
    /// Redirect URI used when the code was issued.
    pub redirect_uri: String,
    /// The authorization code returned to the redirect URI.
    #[serde(rename = "code")]
    pub authorization_code: String,
}

impl ExchangeCodeRequest {
    /// Creates an authorization-code exchange.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
        authorization_code: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            authorization_code: authorization_code.into(),
        }
    }

    /// Checks required-field presence.
    pub fn validate(&self) -> Auth0Result<()> {
        require("client_id", &self.client_id)?;
        require("client_secret", &self.client_secret)?;
        require("redirect_uri", &self.redirect_uri)?;
        require("authorization_code", &self.authorization_code)
    }
}

impl std::fmt::Debug for ExchangeCodeRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeCodeRequest")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .field("authorization_code", &"[REDACTED]")
            .finish()
    }
}

/// Tokens issued by an authorization-code exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    /// Access token.
    pub access_token: String,
    /// Id token, if `openid` was part of the authorized scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    /// Token type.
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime of the access token in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}

/// Exchange of an id token for a delegation token aimed at another client.
#[derive(Clone, Default, Serialize)]
pub struct IdTokenDelegationRequest {
    /// Client id of the calling application.
    pub client_id: String,
    /// Client id of the target application.
    pub target: String,
    /// Id token obtained from a previous authentication.
    pub id_token: String,
    /// Scope of the delegation token.
    pub scope: String,
    /// API type of the target, e.g. `app`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_type: Option<String>,
}

impl IdTokenDelegationRequest {
    /// Creates a delegation request for `target` using `id_token`.
    pub fn new(
        client_id: impl Into<String>,
        target: impl Into<String>,
        id_token: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            target: target.into(),
            id_token: id_token.into(),
            scope: SCOPE_OPENID.to_string(),
            api_type: None,
        }
    }

    /// Sets the scope.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Sets the API type.
    pub fn with_api_type(mut self, api_type: impl Into<String>) -> Self {
        self.api_type = Some(api_type.into());
        self
    }

    /// Checks required-field presence.
    pub fn validate(&self) -> Auth0Result<()> {
        require("client_id", &self.client_id)?;
        require("target", &self.target)?;
        require("id_token", &self.id_token)
    }
}

impl std::fmt::Debug for IdTokenDelegationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdTokenDelegationRequest")
            .field("client_id", &self.client_id)
            .field("target", &self.target)
            .field("id_token", &"[REDACTED]")
            .field("scope", &self.scope)
            .field("api_type", &self.api_type)
            .finish()
    }
}

/// Delegation token issued for the target client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelegationTokenResponse {
    /// The delegated id token.
    pub id_token: String,
    /// Token type.
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime of the token in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}

/// Profile returned by the `/userinfo` endpoint.
///
/// Claims not modelled here are kept in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserInfo {
    /// OIDC subject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Auth0 user id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Whether the email address is verified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
    /// Full name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Nickname.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// Picture URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    /// Last profile update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    /// Linked identities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identities: Option<Vec<Identity>>,
    /// Application metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_metadata: Option<Metadata>,
    /// User metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_metadata: Option<Metadata>,
    /// Any other claims.
    #[serde(flatten)]
    pub extra: Metadata,
}

impl UserInfo {
    /// Returns the user id, falling back to the OIDC subject.
    pub fn id(&self) -> Option<&str> {
        self.user_id.as_deref().or(self.sub.as_deref())
    }
}

fn default_token_type() -> String {
    "bearer".to_string()
}

pub(crate) fn require(field: &str, value: &str) -> Auth0Result<()> {
    if value.trim().is_empty() {
        Err(Auth0Error::missing_field(field))
    } else {
        Ok(())
    }
}
