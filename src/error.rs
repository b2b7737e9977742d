//! Unified error types for the status poller.

use thiserror::Error;

/// Process-level error type.
///
/// Fetch failures never surface here; they are rendered into the display
/// regions instead (see [`FetchError`]).
#[derive(Error, Debug)]
pub enum PollerError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Endpoint URL could not be built.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// HTTP client construction error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Metrics exporter could not be installed.
    #[error("metrics exporter error: {0}")]
    Metrics(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single request to a status endpoint failed.
///
/// The variants only feed logs and metric labels. Every variant is displayed
/// the same way.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport failed: connection refused, timeout, reset.
    #[error("request to {endpoint} failed: {source}")]
    Request {
        /// Endpoint path.
        endpoint: &'static str,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status code.
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        /// Endpoint path.
        endpoint: &'static str,
        /// Status code received.
        status: u16,
    },

    /// Body was not the expected JSON document.
    #[error("failed to decode {endpoint} response: {reason}")]
    Decode {
        /// Endpoint path.
        endpoint: &'static str,
        /// Parser message.
        reason: String,
    },
}

impl FetchError {
    /// Short label used for the `outcome` metric dimension.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Request { .. } => "request",
            FetchError::Status { .. } => "status",
            FetchError::Decode { .. } => "decode",
        }
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, PollerError>;
