//! Auth0 Client Library
//!
//! An async Rust client for the Auth0 Authentication API and Management API v2.
//!
//! # Features
//!
//! - **Authentication API**: password grant (with or without a connection),
//!   authorization-code exchange, id-token delegation, `/userinfo` and the
//!   legacy username/password login form
//! - **Management API**: users, connections and tenant settings
//! - **Typed Errors**: authentication failures, Management API failures and
//!   transport failures are distinct variants
//! - **Observability**: `tracing` spans on every operation with credential redaction
//! - **Async/Await**: Built on Tokio and reqwest
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use auth0_client::{AuthenticationApiClient, AuthenticationRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AuthenticationApiClient::builder()
//!         .domain("tenant.auth0.com")
//!         .build()?;
//!
//!     let request = AuthenticationRequest::new("client-id", "u@example.com", "password")
//!         .with_client_secret("client-secret")
//!         .with_connection("Username-Password-Authentication")
//!         .with_scope("openid offline_access");
//!
//!     let tokens = client.authenticate(request).await?;
//!     println!("{}", tokens.access_token);
//!     Ok(())
//! }
//! ```
//!
//! # Management Example
//!
//! ```rust,no_run
//! use auth0_client::ManagementApiClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ManagementApiClient::builder()
//!         .domain("tenant.auth0.com")
//!         .token("management-api-token")
//!         .build()?;
//!
//!     let settings = client.tenant_settings().get().await?;
//!     println!("default directory: {:?}", settings.default_directory());
//!
//!     for connection in client.connections().get_all(Some("auth0")).await? {
//!         println!("{} ({})", connection.name, connection.id);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod observability;
pub mod services;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use client::{
    AuthenticationApiClient, AuthenticationApiClientBuilder, AuthorizationUrl, LogoutUrl,
    ManagementApiClient, ManagementApiClientBuilder,
};
pub use config::Auth0Config;
pub use errors::{Auth0Error, Auth0Result};

// Type re-exports
pub use types::authentication::{
    AccessTokenResponse, AuthenticationRequest, AuthenticationResponse, DelegationTokenResponse,
    ExchangeCodeRequest, IdTokenDelegationRequest, UserInfo,
};
pub use types::common::{Metadata, Timestamp};
pub use types::connections::{Connection, ConnectionCreateRequest, ConnectionUpdateRequest};
pub use types::grants::{GrantType, TokenRequest};
pub use types::login::{UsernamePasswordLoginRequest, UsernamePasswordLoginResponse};
pub use types::tenant::{TenantSettings, TenantSettingsUpdateRequest};
pub use types::users::{Identity, User, UserBase, UserCreateRequest, UserUpdateRequest};

/// Mock implementations for testing.
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
