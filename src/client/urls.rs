//! Browser redirect URLs.
//!
//! These are built locally; no request is made.

use url::Url;

use super::AuthenticationApiClient;
use crate::errors::Auth0Result;
use crate::types::authentication::{require, SCOPE_OPENID};

const AUTHORIZE_PATH: &str = "authorize";
const LOGOUT_PATH: &str = "v2/logout";

/// Parameters of an `/authorize` redirect.
#[derive(Debug, Clone)]
pub struct AuthorizationUrl {
    /// Application client id.
    pub client_id: String,
    /// Callback URL registered for the application.
    pub redirect_uri: String,
    /// `code` or `token`.
    pub response_type: String,
    /// Space-separated scopes.
    pub scope: String,
    /// Connection to skip the login page with.
    pub connection: Option<String>,
    /// Opaque value echoed back on the callback.
    pub state: Option<String>,
    /// API the issued access token is for.
    pub audience: Option<String>,
}

impl AuthorizationUrl {
    /// Creates an authorization-code redirect with the `openid` scope.
    pub fn new(client_id: impl Into<String>, redirect_uri: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
            response_type: "code".to_string(),
            scope: SCOPE_OPENID.to_string(),
            connection: None,
            state: None,
            audience: None,
        }
    }

    /// Sets the response type.
    pub fn with_response_type(mut self, response_type: impl Into<String>) -> Self {
        self.response_type = response_type.into();
        self
    }

    /// Sets the scope.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Sets the connection.
    pub fn with_connection(mut self, connection: impl Into<String>) -> Self {
        self.connection = Some(connection.into());
        self
    }

    /// Sets the state.
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Sets the audience.
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }
}

/// Parameters of a `/v2/logout` redirect.
#[derive(Debug, Clone, Default)]
pub struct LogoutUrl {
    /// Where to send the browser after logout.
    pub return_to: Option<String>,
    /// Application client id; required by Auth0 when `return_to` is an
    /// application-level allowed URL.
    pub client_id: Option<String>,
    /// Also log out of the upstream identity provider.
    pub federated: bool,
}

impl LogoutUrl {
    /// Creates a bare logout redirect.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the return URL.
    pub fn with_return_to(mut self, return_to: impl Into<String>) -> Self {
        self.return_to = Some(return_to.into());
        self
    }

    /// Sets the client id.
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Requests federated logout.
    pub fn federated(mut self) -> Self {
        self.federated = true;
        self
    }
}

impl AuthenticationApiClient {
    /// Builds the `/authorize` URL to redirect a browser to.
    pub fn build_authorization_url(&self, params: &AuthorizationUrl) -> Auth0Result<Url> {
        require("client_id", &params.client_id)?;
        require("redirect_uri", &params.redirect_uri)?;

        let mut url = Url::parse(&self.config().endpoint_url(AUTHORIZE_PATH))?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("response_type", &params.response_type)
                .append_pair("client_id", &params.client_id)
                .append_pair("redirect_uri", &params.redirect_uri)
                .append_pair("scope", &params.scope);
            if let Some(connection) = &params.connection {
                query.append_pair("connection", connection);
            }
            if let Some(state) = &params.state {
                query.append_pair("state", state);
            }
            if let Some(audience) = &params.audience {
                query.append_pair("audience", audience);
            }
        }

        Ok(url)
    }

    /// Builds the `/v2/logout` URL to redirect a browser to.
    pub fn build_logout_url(&self, params: &LogoutUrl) -> Auth0Result<Url> {
        let mut url = Url::parse(&self.config().endpoint_url(LOGOUT_PATH))?;

        if params.return_to.is_some() || params.client_id.is_some() || params.federated {
            let mut query = url.query_pairs_mut();
            if let Some(return_to) = &params.return_to {
                query.append_pair("returnTo", return_to);
            }
            if let Some(client_id) = &params.client_id {
                query.append_pair("client_id", client_id);
            }
            if params.federated {
                query.append_key_only("federated");
            }
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Auth0Error;
    use pretty_assertions::assert_eq;

    fn client() -> AuthenticationApiClient {
        AuthenticationApiClient::new("https://tenant.auth0.com").unwrap()
    }

    #[test]
    fn test_authorization_url_defaults() {
        let url = client()
            .build_authorization_url(&AuthorizationUrl::new("client-id", "https://app/callback"))
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://tenant.auth0.com/authorize?response_type=code&client_id=client-id&redirect_uri=https%3A%2F%2Fapp%2Fcallback&scope=openid"
        );
    }

    #[test]
    fn test_authorization_url_optional_parameters() {
        let url = client()
            .build_authorization_url(
                &AuthorizationUrl::new("client-id", "https://app/callback")
                    .with_scope("openid offline_access")
                    .with_connection("google-oauth2")
                    .with_state("xyz"),
            )
            .unwrap();

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("scope".to_string(), "openid offline_access".to_string())));
        assert!(pairs.contains(&("connection".to_string(), "google-oauth2".to_string())));
        assert!(pairs.contains(&("state".to_string(), "xyz".to_string())));
        assert!(!pairs.iter().any(|(k, _)| k == "audience"));
    }

    #[test]
    fn test_authorization_url_requires_client_id() {
        let err = client()
            .build_authorization_url(&AuthorizationUrl::new("", "https://app/callback"))
            .unwrap_err();

        assert!(matches!(err, Auth0Error::Validation { .. }));
    }

    #[test]
    fn test_bare_logout_url() {
        let url = client().build_logout_url(&LogoutUrl::new()).unwrap();
        assert_eq!(url.as_str(), "https://tenant.auth0.com/v2/logout");
    }

    #[test]
    fn test_federated_logout_url() {
        let url = client()
            .build_logout_url(
                &LogoutUrl::new()
                    .with_return_to("https://app/")
                    .with_client_id("client-id")
                    .federated(),
            )
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://tenant.auth0.com/v2/logout?returnTo=https%3A%2F%2Fapp%2F&client_id=client-id&federated"
        );
    }
}
