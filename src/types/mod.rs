//! Request and response types for the Auth0 APIs.

pub mod authentication;
pub mod common;
pub mod connections;
pub mod grants;
pub mod login;
pub mod tenant;
pub mod users;
