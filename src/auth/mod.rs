//! Bearer-token credentials.
//!
//! The Management API and the `/userinfo` endpoint both authorize requests
//! with `Authorization: Bearer <token>`. Tokens are held as secrets and never
//! appear in `Debug` output.

use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;

use crate::errors::Auth0Error;

/// Authentication provider trait.
///
/// Implementations attach credentials to outgoing request headers.
pub trait AuthProvider: Send + Sync {
    /// Apply authentication to request headers.
    fn apply_auth(&self, headers: &mut HashMap<String, String>);

    /// Get the authentication scheme name.
    fn scheme(&self) -> &str;

    /// Validate the credentials.
    fn validate(&self) -> Result<(), Auth0Error>;
}

/// Bearer token authentication provider.
pub struct BearerTokenAuth {
    token: SecretString,
}

impl BearerTokenAuth {
    /// Creates a new bearer token provider.
    pub fn new(token: SecretString) -> Self {
        Self { token }
    }

    /// Creates from a string token.
    pub fn from_string(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::new(token.into()),
        }
    }

    /// Gets a hint of the token for debugging (last 4 characters).
    pub fn token_hint(&self) -> String {
        let token = self.token.expose_secret();
        match token.char_indices().rev().nth(3) {
            Some((start, _)) if start > 0 => format!("...{}", &token[start..]),
            _ => "****".to_string(),
        }
    }
}

impl AuthProvider for BearerTokenAuth {
    fn apply_auth(&self, headers: &mut HashMap<String, String>) {
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.token.expose_secret()),
        );
    }

    fn scheme(&self) -> &str {
        "Bearer"
    }

    fn validate(&self) -> Result<(), Auth0Error> {
        let token = self.token.expose_secret();

        if token.trim().is_empty() {
            return Err(Auth0Error::configuration("Bearer token cannot be empty"));
        }

        // Management tokens are JWTs: header.payload.signature
        if token.split('.').count() != 3 {
            tracing::warn!(
                token_hint = %self.token_hint(),
                "Bearer token does not look like a JWT"
            );
        }

        Ok(())
    }
}

impl std::fmt::Debug for BearerTokenAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerTokenAuth")
            .field("token", &"[REDACTED]")
            .field("token_hint", &self.token_hint())
            .finish()
    }
}
