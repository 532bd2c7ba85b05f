//! Connections service.

use tracing::instrument;

use super::ServiceContext;
use crate::errors::Auth0Result;
use crate::transport::{encode_path_segment, HttpMethod};
use crate::types::authentication::require;
use crate::types::connections::{Connection, ConnectionCreateRequest, ConnectionUpdateRequest};

/// Connections service.
#[derive(Debug, Clone)]
pub struct ConnectionsService {
    context: ServiceContext,
}

impl ConnectionsService {
    pub(crate) fn new(context: ServiceContext) -> Self {
        Self { context }
    }

    /// Creates a connection.
    #[instrument(skip(self, request), fields(name = %request.name, strategy = %request.strategy))]
    pub async fn create(&self, request: ConnectionCreateRequest) -> Auth0Result<Connection> {
        require("name", &request.name)?;
        require("strategy", &request.strategy)?;

        let http_request = self
            .context
            .json_request(HttpMethod::Post, "connections", &request)?;
        let connection: Connection = self.context.execute(http_request).await?;

        tracing::info!(connection_id = %connection.id, "Created connection");
        Ok(connection)
    }

    /// Gets a connection by id.
    #[instrument(skip(self))]
    pub async fn get(&self, connection_id: &str) -> Auth0Result<Connection> {
        require("connection_id", connection_id)?;

        let http_request = self
            .context
            .request(HttpMethod::Get, &connection_path(connection_id));
        self.context.execute(http_request).await
    }

    /// Lists connections, optionally only those using `strategy`.
    #[instrument(skip(self))]
    pub async fn get_all(&self, strategy: Option<&str>) -> Auth0Result<Vec<Connection>> {
        let path = match strategy {
            Some(strategy) => {
                let query: String = url::form_urlencoded::Serializer::new(String::new())
                    .append_pair("strategy", strategy)
                    .finish();
                format!("connections?{query}")
            }
            None => "connections".to_string(),
        };

        let http_request = self.context.request(HttpMethod::Get, &path);
        self.context.execute(http_request).await
    }

    /// Updates a connection; only fields set on `request` change.
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        connection_id: &str,
        request: ConnectionUpdateRequest,
    ) -> Auth0Result<Connection> {
        require("connection_id", connection_id)?;

        let http_request = self.context.json_request(
            HttpMethod::Patch,
            &connection_path(connection_id),
            &request,
        )?;
        self.context.execute(http_request).await
    }

    /// Deletes a connection and every user stored in it.
    #[instrument(skip(self))]
    pub async fn delete(&self, connection_id: &str) -> Auth0Result<()> {
        require("connection_id", connection_id)?;

        let http_request = self
            .context
            .request(HttpMethod::Delete, &connection_path(connection_id));
        self.context.execute_empty(http_request).await?;

        tracing::info!(connection_id, "Deleted connection");
        Ok(())
    }
}

fn connection_path(connection_id: &str) -> String {
    format!("connections/{}", encode_path_segment(connection_id))
}
