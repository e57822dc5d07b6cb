//! Errors returned by the courier API client.

/// Failure of a single API call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, TLS, timeout, reset).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("{url} returned HTTP {status}")]
    Status { status: u16, url: String },

    /// The body was not the JSON shape this client expects.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// The server processed the request and answered `Success: false`.
    #[error("{0}")]
    Rejected(String),

    #[error("invalid API base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ApiError {
    /// Whether the failure says nothing about the request itself, only about
    /// reaching the server.
    pub fn is_connectivity(&self) -> bool {
        match self {
            ApiError::Http(_) => true,
            ApiError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
