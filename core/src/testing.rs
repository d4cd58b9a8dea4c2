//! In-memory `Transport` for unit tests.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

/// Serves canned responses by exact URL and records every request it sees.
/// Unknown URLs fail with a transport error.
#[derive(Debug, Default)]
pub(crate) struct RecordingTransport {
    routes: HashMap<String, Result<HttpResponse, String>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl RecordingTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(mut self, url: &str, status: u16, body: &str) -> Self {
        self.routes
            .insert(url.to_string(), Ok(HttpResponse::new(status, body)));
        self
    }

    pub(crate) fn fail(mut self, url: &str, message: &str) -> Self {
        self.routes.insert(url.to_string(), Err(message.to_string()));
        self
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub(crate) fn requested_urls(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.url.clone()).collect()
    }
}

impl Transport for RecordingTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let route = self.routes.get(&request.url).cloned();
        self.requests.borrow_mut().push(request);
        match route {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(ApiError::Transport(message)),
            None => Err(ApiError::Transport("no route".to_string())),
        }
    }
}
