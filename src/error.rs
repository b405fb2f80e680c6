//! Error taxonomy for the remote reporting endpoints.
//!
//! Each outbound call is attempt-once; there is no retry layer. Callers pick
//! the recovery policy per endpoint: usage fetches propagate, the cost fetch
//! degrades to an empty result, the session poller degrades to `None`.

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Network-level failure: DNS, connect, TLS, or timeout.
    #[error("network error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The API key was rejected (HTTP 401).
    #[error("invalid API key")]
    Auth,

    /// The API key is valid but lacks admin permissions (HTTP 403).
    #[error("API key lacks admin permissions")]
    Permission,

    /// Any other non-success status.
    #[error("API error: {status}")]
    Server { status: u16 },

    /// The response body was not decodable as the expected JSON shape.
    ///
    /// Absent fields inside valid JSON are not malformed; they default to
    /// zero/false during deserialization.
    #[error("malformed response: {0}")]
    MalformedResponse(#[source] reqwest::Error),

    /// No API key or bearer token could be obtained from any source.
    #[error("no credentials available")]
    CredentialUnavailable,
}

impl ApiError {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Auth,
            StatusCode::FORBIDDEN => ApiError::Permission,
            _ => ApiError::Server {
                status: status.as_u16(),
            },
        }
    }

    /// Classify a `reqwest` error from `send()` or body decoding.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::MalformedResponse(err)
        } else {
            ApiError::Transport(err)
        }
    }
}
