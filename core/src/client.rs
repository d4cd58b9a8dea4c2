//! Request dispatcher bound to one backend.
//!
//! # Design
//! `ApiClient` holds only a `base_url` and a transport, neither of which
//! changes after construction. Every call joins the base URL and a relative
//! endpoint with a single `/`, then hands off to the typed bridge in
//! `crate::typed`. There are no retries, timeouts, or per-call headers.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::query::Query;
use crate::transport::{Transport, UreqTransport};
use crate::typed;

/// Typed JSON client for a fixed backend.
#[derive(Debug, Clone)]
pub struct ApiClient<X = UreqTransport> {
    base_url: String,
    transport: X,
}

impl ApiClient<UreqTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport::new())
    }
}

impl<X: Transport> ApiClient<X> {
    pub fn with_transport(base_url: &str, transport: X) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &X {
        &self.transport
    }

    /// Absolute URL for `endpoint`.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    pub fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        typed::get_json(&self.transport, &self.endpoint_url(endpoint))
    }

    pub fn get_with_query<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &Query,
    ) -> Result<T, ApiError> {
        typed::get_json_with_query(&self.transport, &self.endpoint_url(endpoint), query)
    }

    pub fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        typed::post_json(&self.transport, &self.endpoint_url(endpoint), body)
    }

    pub fn post_with_query<B, T>(&self, endpoint: &str, query: &Query, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        typed::post_json_with_query(&self.transport, &self.endpoint_url(endpoint), query, body)
    }
}
