//! Auth0 API clients.
//!
//! [`AuthenticationApiClient`] talks to the token and profile endpoints;
//! [`ManagementApiClient`] exposes the Management API v2 resources.

mod authentication;
mod management;
mod urls;

pub use authentication::{AuthenticationApiClient, AuthenticationApiClientBuilder};
pub use management::{ManagementApiClient, ManagementApiClientBuilder};
pub use urls::{AuthorizationUrl, LogoutUrl};
