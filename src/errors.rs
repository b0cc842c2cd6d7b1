//! Per-request execution errors
//!
//! Everything that can go wrong between resolving a request's configuration
//! and decoding its response. These are captured into the request's
//! [`ExecutionResult`](crate::models::ExecutionResult) and never abort a batch.
//! JSON-RPC error objects are not errors here; they are response data.

use thiserror::Error;

/// Coarse classification used by callers for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Nothing to send to: no URL after merging every source
    Configuration,
    /// Building, sending or receiving the HTTP exchange failed
    Transport,
    /// The response body is not a JSON-RPC 2.0 response
    Decode,
}

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("no URL configured for request '{request}'")]
    NoUrl { request: String },

    #[error("failed to marshal request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("HTTP request timed out after {seconds}s")]
    Timeout {
        seconds: u64,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to read response: {0}")]
    Body(#[source] reqwest::Error),

    #[error("HTTP error: {status} {reason} - {body}")]
    HttpStatus {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("failed to parse JSON-RPC response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ExecutionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoUrl { .. } => ErrorKind::Configuration,
            Self::Decode(_) => ErrorKind::Decode,
            Self::Encode(_)
            | Self::InvalidHeader { .. }
            | Self::Timeout { .. }
            | Self::Transport(_)
            | Self::Body(_)
            | Self::HttpStatus { .. } => ErrorKind::Transport,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// HTTP status code, when the server answered with a failure status
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
