//! Manifest source configuration.
//!
//! # Design
//! The developer-mods flag travels with the two manifest URLs instead of
//! living in a global, so a reconciler is fully described by the value it was
//! built from. Keys are camelCase to match the launcher's settings file.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ApiError;

/// Where the supported-version manifests live and which one to read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestConfig {
    /// Read the developer manifest instead of the standard one.
    #[serde(default)]
    pub developer_mods: bool,
    pub developer_manifest_url: String,
    pub standard_manifest_url: String,
}

impl ManifestConfig {
    /// Build a config without checking the URLs. A malformed URL surfaces
    /// later as a transport error on the first fetch; use `try_new` to
    /// reject it up front.
    pub fn new(standard_manifest_url: &str, developer_manifest_url: &str) -> Self {
        Self {
            developer_mods: false,
            developer_manifest_url: developer_manifest_url.to_string(),
            standard_manifest_url: standard_manifest_url.to_string(),
        }
    }

    /// `new` followed by `validate`.
    pub fn try_new(standard_manifest_url: &str, developer_manifest_url: &str) -> Result<Self, ApiError> {
        let config = Self::new(standard_manifest_url, developer_manifest_url);
        config.validate()?;
        Ok(config)
    }

    pub fn with_developer_mods(mut self, enabled: bool) -> Self {
        self.developer_mods = enabled;
        self
    }

    /// Parse and validate a JSON settings document.
    pub fn from_json_str(text: &str) -> Result<Self, ApiError> {
        let config: Self = serde_json::from_str(text).map_err(|e| ApiError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Both URLs must be absolute `http` or `https` URLs.
    pub fn validate(&self) -> Result<(), ApiError> {
        check_url("developerManifestUrl", &self.developer_manifest_url)?;
        check_url("standardManifestUrl", &self.standard_manifest_url)
    }

    /// The manifest URL selected by `developer_mods`.
    pub fn manifest_url(&self) -> &str {
        if self.developer_mods {
            &self.developer_manifest_url
        } else {
            &self.standard_manifest_url
        }
    }
}

fn check_url(field: &str, url: &str) -> Result<(), ApiError> {
    let parsed = Url::parse(url)
        .map_err(|e| ApiError::Config(format!("{field} is not a valid URL ({url:?}): {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::Config(format!("{field} must use http or https, got {url:?}")));
    }
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(ApiError::Config(format!("{field} has no host: {url:?}"))),
    }
}
