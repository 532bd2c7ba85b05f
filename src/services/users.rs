//! Users service.

use tracing::instrument;

use super::ServiceContext;
use crate::errors::Auth0Result;
use crate::transport::{encode_path_segment, HttpMethod};
use crate::types::authentication::require;
use crate::types::users::{User, UserCreateRequest, UserUpdateRequest};

/// Users service for creating, reading, updating and deleting users.
///
/// Requires a token carrying the matching `users` scopes; the service, not
/// the client, enforces them.
#[derive(Debug, Clone)]
pub struct UsersService {
    context: ServiceContext,
}

impl UsersService {
    pub(crate) fn new(context: ServiceContext) -> Self {
        Self { context }
    }

    /// Creates a user.
    #[instrument(skip(self, request), fields(connection = %request.connection))]
    pub async fn create(&self, request: UserCreateRequest) -> Auth0Result<User> {
        require("connection", &request.connection)?;

        let http_request = self
            .context
            .json_request(HttpMethod::Post, "users", &request)?;
        let user: User = self.context.execute(http_request).await?;

        tracing::info!(user_id = %user.user_id, "Created user");
        Ok(user)
    }

    /// Gets a user by id.
    #[instrument(skip(self))]
    pub async fn get(&self, user_id: &str) -> Auth0Result<User> {
        require("user_id", user_id)?;

        let http_request = self
            .context
            .request(HttpMethod::Get, &user_path(user_id));
        self.context.execute(http_request).await
    }

    /// Updates a user; only fields set on `request` change.
    #[instrument(skip(self, request))]
    pub async fn update(&self, user_id: &str, request: UserUpdateRequest) -> Auth0Result<User> {
        require("user_id", user_id)?;

        let http_request =
            self.context
                .json_request(HttpMethod::Patch, &user_path(user_id), &request)?;
        self.context.execute(http_request).await
    }

    /// Deletes a user.
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: &str) -> Auth0Result<()> {
        require("user_id", user_id)?;

        let http_request = self
            .context
            .request(HttpMethod::Delete, &user_path(user_id));
        self.context.execute_empty(http_request).await?;

        tracing::info!(user_id, "Deleted user");
        Ok(())
    }
}

fn user_path(user_id: &str) -> String {
    format!("users/{}", encode_path_segment(user_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Auth0Error;
    use crate::mocks::{fixtures, MockAuth, MockResponse, MockTransport};
    use std::sync::Arc;

    fn service(transport: &Arc<MockTransport>) -> UsersService {
        UsersService::new(ServiceContext::new(
            transport.clone(),
            Arc::new(MockAuth::default()),
            Vec::new(),
        ))
    }

    #[tokio::test]
    async fn test_create_posts_to_users() {
        let transport = Arc::new(MockTransport::new());
        transport.queue(MockResponse::json(&fixtures::user("auth0|abc", "u@example.com")).with_status(201));

        let user = service(&transport)
            .create(UserCreateRequest::new("db", "u@example.com").with_password("password"))
            .await
            .unwrap();

        assert_eq!(user.user_id, "auth0|abc");
        let request = transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.path, "api/v2/users");
        assert_eq!(
            request.headers.get("Authorization").map(String::as_str),
            Some("Bearer mock-management-token")
        );
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces_as_network_error() {
        let transport = Arc::new(MockTransport::new());
        transport.queue_failure(|| crate::transport::TransportError::Connection {
            message: "connection refused".to_string(),
        });

        let err = service(&transport).get("auth0|abc").await.unwrap_err();

        assert!(matches!(err, Auth0Error::Network { .. }));
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_get_encodes_user_id() {
        let transport = Arc::new(MockTransport::new());
        transport.queue_json(&fixtures::user("auth0|abc", "u@example.com"));

        service(&transport).get("auth0|abc").await.unwrap();

        assert_eq!(transport.last_request().unwrap().path, "api/v2/users/auth0%7Cabc");
    }

    #[tokio::test]
    async fn test_update_uses_patch() {
        let transport = Arc::new(MockTransport::new());
        transport.queue_json(&fixtures::user("auth0|abc", "u@example.com"));

        let update = UserUpdateRequest {
            blocked: Some(true),
            ..UserUpdateRequest::default()
        };
        service(&transport).update("auth0|abc", update).await.unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Patch);
        assert_eq!(request.body.unwrap(), br#"{"blocked":true}"#.to_vec());
    }

    #[tokio::test]
    async fn test_delete_accepts_no_content() {
        let transport = Arc::new(MockTransport::new());
        transport.queue(MockResponse::empty(204));

        service(&transport).delete("auth0|abc").await.unwrap();

        assert_eq!(transport.last_request().unwrap().method, HttpMethod::Delete);
    }

    #[tokio::test]
    async fn test_blank_id_is_rejected_before_dispatch() {
        let transport = Arc::new(MockTransport::new());

        let err = service(&transport).delete(" ").await.unwrap_err();

        assert!(matches!(err, Auth0Error::Validation { .. }));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_remote_failure_is_api_error() {
        let transport = Arc::new(MockTransport::new());
        transport.queue_management_error(409, "Conflict", "The user already exists.", "auth0_idp_error");

        let err = service(&transport)
            .create(UserCreateRequest::new("db", "u@example.com"))
            .await
            .unwrap_err();

        assert!(err.is_api());
        assert_eq!(err.status_code(), Some(409));
        assert_eq!(err.remote_error_code(), Some("auth0_idp_error"));
    }
}
