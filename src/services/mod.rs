//! Management API resource services.
//!
//! Each service covers one resource family. They share a [`ServiceContext`]
//! holding the transport, the bearer credential and the default headers, so
//! every call is authorized the same way.

mod connections;
mod tenant_settings;
mod users;

pub use connections::ConnectionsService;
pub use tenant_settings::TenantSettingsService;
pub use users::UsersService;

use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::auth::AuthProvider;
use crate::errors::{Auth0Error, Auth0Result};
use crate::observability::{LogConfig, RequestTimer};
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};

/// Path prefix of the Management API v2.
pub const MANAGEMENT_API_PREFIX: &str = "api/v2";

/// Transport, credentials and headers shared by the resource services.
#[derive(Clone)]
pub(crate) struct ServiceContext {
    transport: Arc<dyn HttpTransport>,
    auth: Arc<dyn AuthProvider>,
    default_headers: Vec<(String, String)>,
    log_config: LogConfig,
}

impl ServiceContext {
    pub(crate) fn new(
        transport: Arc<dyn HttpTransport>,
        auth: Arc<dyn AuthProvider>,
        default_headers: Vec<(String, String)>,
    ) -> Self {
        Self {
            transport,
            auth,
            default_headers,
            log_config: LogConfig::default(),
        }
    }

    pub(crate) fn with_log_config(mut self, log_config: LogConfig) -> Self {
        self.log_config = log_config;
        self
    }

    /// Builds an authorized request for `path` under the API prefix.
    fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        let path = format!("{MANAGEMENT_API_PREFIX}/{}", path.trim_start_matches('/'));
        let mut request = match method {
            HttpMethod::Get => HttpRequest::get(path),
            HttpMethod::Post => HttpRequest::post(path),
            HttpMethod::Patch => HttpRequest::patch(path),
            HttpMethod::Delete => HttpRequest::delete(path),
        };

        for (name, value) in &self.default_headers {
            request.headers.insert(name.clone(), value.clone());
        }
        self.auth.apply_auth(&mut request.headers);

        request
    }

    /// Builds an authorized request with a JSON body.
    fn json_request<B: serde::Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> Auth0Result<HttpRequest> {
        Ok(self.request(method, path).with_json(body)?)
    }

    /// Sends the request and returns the raw successful response.
    async fn send(&self, request: HttpRequest) -> Auth0Result<HttpResponse> {
        if self.log_config.log_request_bodies {
            if let Some(body) = &request.body {
                tracing::debug!(body = %self.log_config.format_body(body), "Request body");
            }
        }

        tracing::debug!(method = request.method.as_str(), path = %request.path, "Management API call");

        let timer = RequestTimer::start(request.method.as_str());
        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                timer.finish(false);
                return Err(e.into());
            }
        };

        if !response.is_success() {
            timer.finish(false);
            let error = Auth0Error::from_api_response(&response);
            tracing::warn!(status = response.status, error = %error, "Management API call failed");
            return Err(error);
        }

        timer.finish(true);
        Ok(response)
    }

    /// Sends the request and decodes the JSON response body.
    async fn execute<T: DeserializeOwned>(&self, request: HttpRequest) -> Auth0Result<T> {
        let response = self.send(request).await?;
        response.json().map_err(|e| Auth0Error::Serialization {
            message: format!("Failed to parse response: {e}"),
        })
    }

    /// Sends the request and discards the response body.
    async fn execute_empty(&self, request: HttpRequest) -> Auth0Result<()> {
        self.send(request).await.map(|_| ())
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("auth_scheme", &self.auth.scheme())
            .finish()
    }
}
