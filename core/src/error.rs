//! Error types for the launcher API client.
//!
//! # Design
//! Every failure is returned to the caller, never swallowed into an empty
//! value. `Transport` covers anything that went wrong before a status line was
//! read, so callers can tell "the server said no" apart from "we never reached
//! the server." `NotFound` keeps its own variant because a missing manifest or
//! endpoint is the status callers branch on most.

use thiserror::Error;

/// Errors returned by the transport, the typed bridge, and the reconciler.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connecting, writing the request, or reading the body failed.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status other than 200 or 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body is not valid JSON for the requested shape.
    #[error("failed to decode {target}: {message}")]
    Decode {
        target: &'static str,
        message: String,
    },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The manifest configuration is malformed or names an invalid URL.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// True when the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}
