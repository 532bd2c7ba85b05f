//! Legacy username/password login.
//!
//! `/usernamepassword/login` does not return tokens. It answers with an HTML
//! page holding a self-submitting form; posting that form from a browser
//! completes the login and redirects to `redirect_uri` with a code.

use serde::Serialize;

use super::authentication::require;
use crate::errors::Auth0Result;

/// Request for the legacy login form.
#[derive(Clone, Serialize)]
pub struct UsernamePasswordLoginRequest {
    /// Client id of the application.
    pub client_id: String,
    /// Database connection holding the user.
    pub connection: String,
    /// Username or email of the user.
    pub username: String,
    /// Password of the user.
    pub password: String,
    /// Space-delimited scopes.
    pub scope: String,
    /// URI the browser is sent to once the form is posted.
    pub redirect_uri: String,
    /// OAuth response type, `code` unless changed.
    pub response_type: String,
    /// Opaque value echoed back on the redirect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl UsernamePasswordLoginRequest {
    /// Creates a login-form request with `openid` scope and `code` response type.
    pub fn new(
        client_id: impl Into<String>,
        connection: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            connection: connection.into(),
            username: username.into(),
            password: password.into(),
            scope: "openid".to_string(),
            redirect_uri: redirect_uri.into(),
            response_type: "code".to_string(),
            state: None,
        }
    }

    /// Sets the scope.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Sets the state parameter.
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Checks required-field presence.
    pub fn validate(&self) -> Auth0Result<()> {
        require("client_id", &self.client_id)?;
        require("connection", &self.connection)?;
        require("username", &self.username)?;
        require("password", &self.password)?;
        require("redirect_uri", &self.redirect_uri)
    }
}

impl std::fmt::Debug for UsernamePasswordLoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsernamePasswordLoginRequest")
            .field("client_id", &self.client_id)
            .field("connection", &self.connection)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("scope", &self.scope)
            .field("redirect_uri", &self.redirect_uri)
            .field("response_type", &self.response_type)
            .field("state", &self.state)
            .finish()
    }
}

/// The raw login form markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsernamePasswordLoginResponse {
    /// HTML document containing the form to submit.
    pub html_form: String,
}
