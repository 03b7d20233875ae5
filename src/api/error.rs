//! Failures surfaced by [`ApiClient`](super::ApiClient).

use thiserror::Error;

use crate::session::SessionError;

/// Errors that can occur during an API call.
///
/// Every non-2xx status is treated the same way; the body text is the only
/// detail kept.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Connection, TLS or timeout failure before a response arrived
    #[error("Request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("{body}")]
    Status { status: u16, body: String },

    /// Success status but the body was not the expected JSON
    #[error("Unexpected response from {path}: {message}")]
    Decode { path: String, message: String },

    /// Login succeeded but the token could not be stored
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short, single-line text for status bars.
    pub fn display_message(&self) -> String {
        let text = match self {
            ApiError::Status { status, body } if body.trim().is_empty() => {
                format!("HTTP {}", status)
            }
            other => other.to_string(),
        };
        text.lines().map(str::trim).collect::<Vec<_>>().join(" ")
    }
}
