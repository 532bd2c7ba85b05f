//! Connection types for the Management API.

use serde::{Deserialize, Serialize};

use super::common::Metadata;

/// Strategy name of Auth0 database connections.
pub const STRATEGY_AUTH0: &str = "auth0";

/// A connection (identity source) configured on the tenant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Connection id, e.g. `con_0000000000000001`.
    pub id: String,
    /// Connection name.
    pub name: String,
    /// Identity provider strategy, e.g. `auth0` or `google-oauth2`.
    pub strategy: String,
    /// Client ids of the applications the connection is enabled for.
    #[serde(default)]
    pub enabled_clients: Vec<String>,
    /// Strategy-specific options, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Metadata>,
}

impl Connection {
    /// Returns true if the connection is enabled for `client_id`.
    pub fn is_enabled_for(&self, client_id: &str) -> bool {
        self.enabled_clients.iter().any(|c| c == client_id)
    }
}

/// Request to create a connection.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConnectionCreateRequest {
    /// Connection name; must be unique in the tenant.
    pub name: String,
    /// Identity provider strategy.
    pub strategy: String,
    /// Client ids to enable the connection for.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enabled_clients: Vec<String>,
    /// Strategy-specific options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Metadata>,
}

impl ConnectionCreateRequest {
    /// Creates a request for a connection named `name` using `strategy`.
    pub fn new(name: impl Into<String>, strategy: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            strategy: strategy.into(),
            ..Self::default()
        }
    }

    /// Enables the connection for `client_id`.
    pub fn enable_client(mut self, client_id: impl Into<String>) -> Self {
        self.enabled_clients.push(client_id.into());
        self
    }
}

/// Request to update a connection. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConnectionUpdateRequest {
    /// Replacement list of enabled clients.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_clients: Option<Vec<String>>,
    /// Replacement options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Metadata>,
}
