//! Mock implementations for testing.
//!
//! Provides a mock transport, a mock credential and response fixtures for
//! unit testing without calling a live tenant.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::auth::AuthProvider;
use crate::errors::Auth0Error;
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};

/// Mock HTTP transport for testing.
pub struct MockTransport {
    responses: Mutex<Vec<MockResult>>,
    requests: Mutex<Vec<RecordedRequest>>,
    default_response: Mutex<Option<MockResponse>>,
}

/// A recorded request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Request path.
    pub path: String,
    /// Request body.
    pub body: Option<Vec<u8>>,
    /// Request headers.
    pub headers: HashMap<String, String>,
}

impl RecordedRequest {
    /// Parses the recorded body as JSON.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|b| serde_json::from_slice(b).ok())
    }
}

/// A mock response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Vec<u8>,
}

enum MockResult {
    Response(MockResponse),
    Failure(fn() -> TransportError),
}

impl MockResponse {
    fn with_content_type(status: u16, content_type: &str, body: Vec<u8>) -> Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), content_type.to_string());

        Self {
            status,
            headers,
            body,
        }
    }

    /// Creates a successful JSON response.
    pub fn json<T: serde::Serialize>(value: &T) -> Self {
        let body = serde_json::to_vec(value).unwrap_or_default();
        Self::with_content_type(200, "application/json", body)
    }

    /// Creates a successful HTML response.
    pub fn html(markup: &str) -> Self {
        Self::with_content_type(200, "text/html; charset=utf-8", markup.as_bytes().to_vec())
    }

    /// Creates an empty response, e.g. `204 No Content`.
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Creates an OAuth-style error response.
    pub fn oauth_error(status: u16, error: &str, description: &str) -> Self {
        let body = serde_json::json!({
            "error": error,
            "error_description": description,
        });
        Self::with_content_type(status, "application/json", body.to_string().into_bytes())
    }

    /// Creates a Management API error response.
    pub fn management_error(status: u16, error: &str, message: &str, error_code: &str) -> Self {
        let body = serde_json::json!({
            "statusCode": status,
            "error": error,
            "message": message,
            "errorCode": error_code,
        });
        Self::with_content_type(status, "application/json", body.to_string().into_bytes())
    }

    /// Sets the status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Adds a header.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
            default_response: Mutex::new(None),
        }
    }

    /// Queues a response.
    pub fn queue(&self, response: MockResponse) {
        lock(&self.responses).push(MockResult::Response(response));
    }

    /// Queues a JSON response.
    pub fn queue_json<T: serde::Serialize>(&self, value: &T) {
        self.queue(MockResponse::json(value));
    }

    /// Queues an OAuth-style error response.
    pub fn queue_oauth_error(&self, status: u16, error: &str, description: &str) {
        self.queue(MockResponse::oauth_error(status, error, description));
    }

    /// Queues a Management API error response.
    pub fn queue_management_error(&self, status: u16, error: &str, message: &str, error_code: &str) {
        self.queue(MockResponse::management_error(status, error, message, error_code));
    }

    /// Queues a transport failure.
    pub fn queue_failure(&self, failure: fn() -> TransportError) {
        lock(&self.responses).push(MockResult::Failure(failure));
    }

    /// Sets the default response.
    pub fn set_default(&self, response: MockResponse) {
        *lock(&self.default_response) = Some(response);
    }

    /// Gets all recorded requests.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Gets the last recorded request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    fn next_result(&self) -> MockResult {
        let mut responses = lock(&self.responses);
        if responses.is_empty() {
            MockResult::Response(
                lock(&self.default_response)
                    .clone()
                    .unwrap_or_else(|| MockResponse::empty(500)),
            )
        } else {
            responses.remove(0)
        }
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        lock(&self.requests).push(RecordedRequest {
            method: request.method,
            path: request.path,
            body: request.body,
            headers: request.headers,
        });

        match self.next_result() {
            MockResult::Response(response) => Ok(HttpResponse {
                status: response.status,
                headers: response.headers,
                body: response.body,
            }),
            MockResult::Failure(failure) => Err(failure()),
        }
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("request_count", &self.request_count())
            .finish()
    }
}

/// Mock bearer credential for testing.
#[derive(Debug)]
pub struct MockAuth {
    token: String,
}

impl MockAuth {
    /// Creates a new mock credential.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl Default for MockAuth {
    fn default() -> Self {
        Self::new("mock-management-token")
    }
}

impl AuthProvider for MockAuth {
    fn apply_auth(&self, headers: &mut HashMap<String, String>) {
        headers.insert("Authorization".to_string(), format!("Bearer {}", self.token));
    }

    fn scheme(&self) -> &str {
        "Bearer"
    }

    fn validate(&self) -> Result<(), Auth0Error> {
        Ok(())
    }
}

/// Test fixtures for common response types.
pub mod fixtures {
    use crate::types::authentication::{AuthenticationResponse, UserInfo};
    use crate::types::common::Timestamp;
    use crate::types::connections::{Connection, STRATEGY_AUTH0};
    use crate::types::tenant::TenantSettings;
    use crate::types::users::{Identity, User, UserBase};

    /// Creates a password-grant response honouring the requested scope.
    pub fn authentication_response(scope: &str) -> AuthenticationResponse {
        let has = |wanted: &str| scope.split_whitespace().any(|s| s == wanted);

        AuthenticationResponse {
            access_token: "mock-access-token".to_string(),
            id_token: has("openid").then(|| "eyJhbGciOi.mock.id-token".to_string()),
            refresh_token: has("offline_access").then(|| "mock-refresh-token".to_string()),
            token_type: "bearer".to_string(),
            expires_in: Some(86400),
        }
    }

    /// Creates a database user.
    pub fn user(user_id: &str, email: &str) -> User {
        User {
            user_id: user_id.to_string(),
            base: UserBase {
                email: Some(email.to_string()),
                email_verified: Some(true),
                ..UserBase::default()
            },
            identities: vec![Identity {
                connection: "Username-Password-Authentication".to_string(),
                user_id: Some(serde_json::Value::String(
                    user_id.split('|').last().unwrap_or(user_id).to_string(),
                )),
                provider: "auth0".to_string(),
                is_social: false,
            }],
            created_at: Some(Timestamp::Text("2016-02-23T19:57:29.532Z".to_string())),
            ..User::default()
        }
    }

    /// Creates a database connection.
    pub fn connection(id: &str, name: &str) -> Connection {
        Connection {
            id: id.to_string(),
            name: name.to_string(),
            strategy: STRATEGY_AUTH0.to_string(),
            enabled_clients: vec!["client-1".to_string()],
            options: None,
        }
    }

    /// Creates tenant settings with the given default directory.
    pub fn tenant_settings(default_directory: Option<&str>) -> TenantSettings {
        TenantSettings {
            default_directory: default_directory.map(String::from),
            friendly_name: Some("Mock Tenant".to_string()),
            ..TenantSettings::default()
        }
    }

    /// Creates a `/userinfo` profile.
    pub fn user_info(email: &str) -> UserInfo {
        UserInfo {
            sub: Some("auth0|mock".to_string()),
            email: Some(email.to_string()),
            email_verified: Some(true),
            ..UserInfo::default()
        }
    }
}
