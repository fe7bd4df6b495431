//! API Error Types

use thiserror::Error;

/// Errors raised by the REST client
///
/// The backend is treated as a black box: a non-2xx status is a failure no
/// matter which status it is. The body is carried along for logging, never
/// for branching.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never completed (connection refused, timeout, bad TLS)
    /// or the response body was not the JSON we expected
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

impl ApiError {
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// True for the network/HTTP failure class (as opposed to local
    /// validation), which callers surface as an inline error banner.
    pub fn is_http_failure(&self) -> bool {
        matches!(self, ApiError::Status { .. })
    }
}
