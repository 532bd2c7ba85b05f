//! User types for the Management API.

use serde::{Deserialize, Serialize};

use super::common::{Metadata, Timestamp};

/// Fields shared by user requests and responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserBase {
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Whether the email address is verified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
    /// Username; only for connections that require one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Phone number; only for SMS connections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Application metadata, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_metadata: Option<Metadata>,
    /// User metadata, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_metadata: Option<Metadata>,
}

/// An identity linked to a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// Connection the identity belongs to.
    #[serde(default)]
    pub connection: String,
    /// Identity id within the provider; some providers send it as a number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<serde_json::Value>,
    /// Provider name, e.g. `auth0` or `google-oauth2`.
    #[serde(default)]
    pub provider: String,
    /// Whether the provider is a social provider.
    #[serde(default, rename = "isSocial")]
    pub is_social: bool,
}

/// A user as returned by the Management API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    /// User id, e.g. `auth0|56c75c4e42b6359e98374bc2`.
    pub user_id: String,
    /// Shared user fields.
    #[serde(flatten)]
    pub base: UserBase,
    /// Full name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Nickname.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// Picture URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    /// Linked identities.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identities: Vec<Identity>,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    /// Last update time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    /// Last login time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<Timestamp>,
    /// Number of logins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logins_count: Option<u64>,
    /// Whether the user is blocked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,
}

impl User {
    /// Returns the user's email address.
    pub fn email(&self) -> Option<&str> {
        self.base.email.as_deref()
    }

    /// Returns the user's username.
    pub fn username(&self) -> Option<&str> {
        self.base.username.as_deref()
    }

    /// Returns the identity for `connection`, if linked.
    pub fn identity(&self, connection: &str) -> Option<&Identity> {
        self.identities.iter().find(|i| i.connection == connection)
    }
}

/// Request to create a user.
#[derive(Clone, Default, Serialize)]
pub struct UserCreateRequest {
    /// Connection the user is created in.
    pub connection: String,
    /// Shared user fields.
    #[serde(flatten)]
    pub base: UserBase,
    /// Initial password; required for database connections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Send a verification email after creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify_email: Option<bool>,
    /// Explicit id for the new user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl UserCreateRequest {
    /// Creates a request for `email` in `connection`.
    pub fn new(connection: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            connection: connection.into(),
            base: UserBase {
                email: Some(email.into()),
                ..UserBase::default()
            },
            ..Self::default()
        }
    }

    /// Sets the password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Marks the email as verified.
    pub fn with_email_verified(mut self, verified: bool) -> Self {
        self.base.email_verified = Some(verified);
        self
    }

    /// Sets the username.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.base.username = Some(username.into());
        self
    }

    /// Sets the application metadata.
    pub fn with_app_metadata(mut self, metadata: Metadata) -> Self {
        self.base.app_metadata = Some(metadata);
        self
    }

    /// Sets the user metadata.
    pub fn with_user_metadata(mut self, metadata: Metadata) -> Self {
        self.base.user_metadata = Some(metadata);
        self
    }
}

impl std::fmt::Debug for UserCreateRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCreateRequest")
            .field("connection", &self.connection)
            .field("base", &self.base)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("verify_email", &self.verify_email)
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Request to update a user. Unset fields are left unchanged.
#[derive(Clone, Default, Serialize)]
pub struct UserUpdateRequest {
    /// Shared user fields.
    #[serde(flatten)]
    pub base: UserBase,
    /// New password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Connection to apply password or email changes in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,
    /// Block or unblock the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,
    /// Send a verification email for an email change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify_email: Option<bool>,
    /// Client used for the verification email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl std::fmt::Debug for UserUpdateRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserUpdateRequest")
            .field("base", &self.base)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("connection", &self.connection)
            .field("blocked", &self.blocked)
            .field("verify_email", &self.verify_email)
            .field("client_id", &self.client_id)
            .finish()
    }
}
