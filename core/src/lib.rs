//! Blocking, typed JSON client for the launcher backend.
//!
//! # Overview
//! `ApiClient` binds a base URL and issues GET/POST calls whose JSON
//! responses are decoded straight into caller-chosen types.
//! `VersionReconciler` reads the server's supported-version manifest and
//! intersects it with the known version catalog.
//!
//! # Design
//! - One blocking round trip per call: no pooling, retries, caching, or
//!   timeouts beyond what the platform imposes.
//! - `Transport` is the only I/O seam. `UreqTransport` is the production
//!   implementation; tests substitute their own.
//! - Every failure is an `ApiError`. Transport, status, and decode failures
//!   are separate variants so callers can tell "no data" from "error".
//! - Query strings are ordered and percent-encoded (`Query`).

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod transport;
pub mod typed;
pub mod versions;

#[cfg(test)]
mod testing;

pub use client::ApiClient;
pub use config::ManifestConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use query::Query;
pub use transport::{Transport, UreqTransport};
pub use versions::{
    LatestVersions, RemoteCatalog, VersionCatalog, VersionManifest, VersionRecord, VersionReconciler,
};
