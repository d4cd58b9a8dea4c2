//! Blocking HTTP transport.
//!
//! # Design
//! `Transport` has one required method, `execute`, which performs a single
//! round trip. `fetch` and `send` are built on top of it and own the status
//! policy: only 200 counts as success. `UreqTransport` creates a fresh agent
//! per call, so the connection it opens is dropped before `execute` returns
//! whether the call succeeded or not.

use tracing::{debug, warn};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one HTTP request per call.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;

    /// GET `url` and return the response body.
    fn fetch(&self, url: &str) -> Result<String, ApiError> {
        let response = self.execute(HttpRequest::get(url))?;
        into_body(HttpMethod::Get, url, response)
    }

    /// POST `body` as JSON to `url` and return the response body.
    fn send(&self, url: &str, body: &str) -> Result<String, ApiError> {
        let response = self.execute(HttpRequest::post_json(url, body))?;
        into_body(HttpMethod::Post, url, response)
    }
}

impl<X: Transport + ?Sized> Transport for &X {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

/// Map non-200 status codes to the appropriate `ApiError` variant.
fn into_body(method: HttpMethod, url: &str, response: HttpResponse) -> Result<String, ApiError> {
    match response.status {
        200 => Ok(response.body),
        404 => {
            warn!(method = method.as_str(), url, "resource not found");
            Err(ApiError::NotFound)
        }
        status => {
            warn!(method = method.as_str(), url, status, "unexpected HTTP status");
            Err(ApiError::HttpError {
                status,
                body: response.body,
            })
        }
    }
}

/// `Transport` backed by `ureq`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UreqTransport;

impl UreqTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");

        // Status codes come back as data; `into_body` decides what they mean.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();

        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = agent.get(request.url.as_str());
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = agent.post(request.url.as_str());
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                let body = request.body.as_deref().unwrap_or_default();
                builder.send(body.as_bytes())
            }
        };

        let mut response = result.map_err(|e| {
            warn!(url = %request.url, error = %e, "request failed");
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.body_mut().read_to_string().map_err(|e| {
            warn!(url = %request.url, error = %e, "failed to read response body");
            ApiError::Transport(e.to_string())
        })?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
