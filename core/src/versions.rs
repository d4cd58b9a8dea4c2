//! Supported-version reconciliation.
//!
//! # Design
//! The server publishes a manifest: a JSON object whose keys are the game
//! versions that have mods available. The launcher already knows the full
//! version catalog. `VersionReconciler` fetches the manifest chosen by
//! `ManifestConfig::developer_mods` and keeps the catalog records it names.
//!
//! The result is always a subset of the catalog, in catalog order, with at
//! most one record per id. Manifest keys the catalog does not know are
//! dropped. Fetch, decode, and catalog failures are returned as errors; an
//! empty manifest is a successful empty result.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::ManifestConfig;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::typed;

/// One entry of the version catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRecord {
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_level: Option<u32>,
}

impl VersionRecord {
    /// A record carrying only its id.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            kind: None,
            url: None,
            time: None,
            release_time: None,
            sha1: None,
            compliance_level: None,
        }
    }

    /// Name shown for a supported version.
    pub fn name(&self) -> &str {
        &self.id
    }
}

/// The `latest` block of a launcher version manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestVersions {
    pub release: String,
    pub snapshot: String,
}

/// A launcher version manifest: `{"latest": {...}, "versions": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionManifest {
    pub latest: Option<LatestVersions>,
    pub versions: Vec<VersionRecord>,
}

/// Supplies the ordered list of all known versions.
pub trait VersionCatalog {
    fn versions(&self) -> Result<Vec<VersionRecord>, ApiError>;
}

impl VersionCatalog for [VersionRecord] {
    fn versions(&self) -> Result<Vec<VersionRecord>, ApiError> {
        Ok(self.to_vec())
    }
}

impl VersionCatalog for Vec<VersionRecord> {
    fn versions(&self) -> Result<Vec<VersionRecord>, ApiError> {
        Ok(self.clone())
    }
}

impl<C: VersionCatalog + ?Sized> VersionCatalog for &C {
    fn versions(&self) -> Result<Vec<VersionRecord>, ApiError> {
        (**self).versions()
    }
}

/// Catalog read from a remote launcher version manifest on every call.
#[derive(Debug, Clone)]
pub struct RemoteCatalog<X> {
    url: String,
    transport: X,
}

impl<X: Transport> RemoteCatalog<X> {
    pub fn new(url: &str, transport: X) -> Self {
        Self {
            url: url.to_string(),
            transport,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn manifest(&self) -> Result<VersionManifest, ApiError> {
        typed::get_json(&self.transport, &self.url)
    }
}

impl<X: Transport> VersionCatalog for RemoteCatalog<X> {
    fn versions(&self) -> Result<Vec<VersionRecord>, ApiError> {
        Ok(self.manifest()?.versions)
    }
}

/// Intersects the remote manifest with the version catalog.
#[derive(Debug, Clone)]
pub struct VersionReconciler<X, C> {
    config: ManifestConfig,
    transport: X,
    catalog: C,
}

impl<X: Transport, C: VersionCatalog> VersionReconciler<X, C> {
    pub fn new(config: ManifestConfig, transport: X, catalog: C) -> Self {
        Self {
            config,
            transport,
            catalog,
        }
    }

    pub fn config(&self) -> &ManifestConfig {
        &self.config
    }

    /// The manifest URL this reconciler reads.
    pub fn manifest_url(&self) -> &str {
        self.config.manifest_url()
    }

    /// Fetch the manifest and return its keys. Anything other than a JSON
    /// object is a decode error.
    pub fn manifest_keys(&self) -> Result<HashSet<String>, ApiError> {
        let manifest: Map<String, Value> = typed::get_json(&self.transport, self.manifest_url())?;
        Ok(manifest.into_iter().map(|(key, _)| key).collect())
    }

    /// Catalog records listed in the manifest, in catalog order.
    pub fn supported_versions(&self) -> Result<Vec<VersionRecord>, ApiError> {
        let keys = self.manifest_keys()?;
        let catalog = self.catalog.versions()?;
        let supported = filter_supported(catalog, &keys);
        debug!(
            manifest = self.manifest_url(),
            manifest_keys = keys.len(),
            supported = supported.len(),
            "reconciled supported versions"
        );
        Ok(supported)
    }
}

/// Keep records whose id is in `keys`, preserving order and dropping repeated
/// ids after the first.
pub fn filter_supported<I>(catalog: I, keys: &HashSet<String>) -> Vec<VersionRecord>
where
    I: IntoIterator<Item = VersionRecord>,
{
    let mut seen = HashSet::new();
    catalog
        .into_iter()
        .filter(|record| keys.contains(&record.id) && seen.insert(record.id.clone()))
        .collect()
}
