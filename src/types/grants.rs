//! Grant-type branching for the token endpoints.
//!
//! Each token flow is a distinct variant of [`TokenRequest`], so a request can
//! never mix fields from different grants. The variant decides both the
//! `grant_type` sent on the wire and the endpoint it is posted to.

use serde::{Deserialize, Serialize};

use super::authentication::{AuthenticationRequest, ExchangeCodeRequest, IdTokenDelegationRequest};
use crate::errors::Auth0Result;

/// Legacy resource-owner endpoint, used when a connection is named.
pub const RESOURCE_OWNER_PATH: &str = "oauth/ro";

/// OAuth2 token endpoint.
pub const TOKEN_PATH: &str = "oauth/token";

/// Delegation endpoint.
pub const DELEGATION_PATH: &str = "delegation";

/// OAuth2 grant type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrantType {
    /// Resource-owner password credentials.
    #[serde(rename = "password")]
    Password,
    /// Authorization code.
    #[serde(rename = "authorization_code")]
    AuthorizationCode,
    /// JWT bearer assertion, used for delegation.
    #[serde(rename = "urn:ietf:params:oauth:grant-type:jwt-bearer")]
    JwtBearer,
}

impl GrantType {
    /// Returns the wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            GrantType::Password => "password",
            GrantType::AuthorizationCode => "authorization_code",
            GrantType::JwtBearer => "urn:ietf:params:oauth:grant-type:jwt-bearer",
        }
    }
}

impl std::fmt::Display for GrantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request against one of the token-issuing endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "grant_type")]
pub enum TokenRequest {
    /// Password grant.
    #[serde(rename = "password")]
    Password(AuthenticationRequest),
    /// Authorization-code grant.
    #[serde(rename = "authorization_code")]
    AuthorizationCode(ExchangeCodeRequest),
    /// Id-token delegation.
    #[serde(rename = "urn:ietf:params:oauth:grant-type:jwt-bearer")]
    Delegation(IdTokenDelegationRequest),
}

impl TokenRequest {
    /// Returns the grant type sent on the wire.
    pub fn grant_type(&self) -> GrantType {
        match self {
            TokenRequest::Password(_) => GrantType::Password,
            TokenRequest::AuthorizationCode(_) => GrantType::AuthorizationCode,
            TokenRequest::Delegation(_) => GrantType::JwtBearer,
        }
    }

    /// Returns the endpoint path the request is posted to.
    ///
    /// A password grant naming a connection goes to `/oauth/ro`; without one
    /// it goes to `/oauth/token`, where the tenant's default directory
    /// applies.
    pub fn endpoint(&self) -> &'static str {
        match self {
            TokenRequest::Password(request) if request.connection.is_some() => RESOURCE_OWNER_PATH,
            TokenRequest::Password(_) | TokenRequest::AuthorizationCode(_) => TOKEN_PATH,
            TokenRequest::Delegation(_) => DELEGATION_PATH,
        }
    }

    /// Checks required-field presence for the variant.
    pub fn validate(&self) -> Auth0Result<()> {
        match self {
            TokenRequest::Password(request) => request.validate(),
            TokenRequest::AuthorizationCode(request) => request.validate(),
            TokenRequest::Delegation(request) => request.validate(),
        }
    }
}

impl From<AuthenticationRequest> for TokenRequest {
    fn from(request: AuthenticationRequest) -> Self {
        TokenRequest::Password(request)
    }
}

impl From<ExchangeCodeRequest> for TokenRequest {
    fn from(request: ExchangeCodeRequest) -> Self {
        TokenRequest::AuthorizationCode(request)
    }
}

impl From<IdTokenDelegationRequest> for TokenRequest {
    fn from(request: IdTokenDelegationRequest) -> Self {
        TokenRequest::Delegation(request)
    }
}
