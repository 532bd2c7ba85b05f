//! Tenant settings.

use serde::{Deserialize, Serialize};

use super::common::Metadata;

/// Tenant-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenantSettings {
    /// Connection used for password grants that name no connection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_directory: Option<String>,
    /// Default audience for API authorization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_audience: Option<String>,
    /// Friendly name of the tenant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,
    /// Logo URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
    /// Support email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_email: Option<String>,
    /// Support page URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_url: Option<String>,
    /// URLs allowed as logout `returnTo` targets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_logout_urls: Option<Vec<String>>,
    /// Session lifetime in hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_lifetime: Option<f64>,
    /// Idle session lifetime in hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_session_lifetime: Option<f64>,
    /// Feature flags, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<Metadata>,
}

impl TenantSettings {
    /// Returns the default directory when one is configured.
    ///
    /// Password grants without a connection only succeed when this is set.
    pub fn default_directory(&self) -> Option<&str> {
        self.default_directory
            .as_deref()
            .filter(|d| !d.trim().is_empty())
    }
}

/// Request to update tenant settings. Unset fields are left unchanged.
pub type TenantSettingsUpdateRequest = TenantSettings;
