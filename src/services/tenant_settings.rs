//! Tenant settings service.

use tracing::instrument;

use super::ServiceContext;
use crate::errors::Auth0Result;
use crate::transport::HttpMethod;
use crate::types::tenant::{TenantSettings, TenantSettingsUpdateRequest};

const TENANT_SETTINGS_PATH: &str = "tenants/settings";

/// Tenant settings service.
#[derive(Debug, Clone)]
pub struct TenantSettingsService {
    context: ServiceContext,
}

impl TenantSettingsService {
    pub(crate) fn new(context: ServiceContext) -> Self {
        Self { context }
    }

    /// Gets the tenant settings.
    #[instrument(skip(self))]
    pub async fn get(&self) -> Auth0Result<TenantSettings> {
        let http_request = self
            .context
            .request(HttpMethod::Get, TENANT_SETTINGS_PATH);
        let settings: TenantSettings = self.context.execute(http_request).await?;

        if settings.default_directory().is_none() {
            tracing::debug!("Tenant has no default directory");
        }

        Ok(settings)
    }

    /// Updates the tenant settings; only fields set on `request` change.
    #[instrument(skip(self, request))]
    pub async fn update(&self, request: TenantSettingsUpdateRequest) -> Auth0Result<TenantSettings> {
        let http_request =
            self.context
                .json_request(HttpMethod::Patch, TENANT_SETTINGS_PATH, &request)?;
        self.context.execute(http_request).await
    }
}
