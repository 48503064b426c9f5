use reqwest::StatusCode;
use thiserror::Error;

use crate::catalog::FeatureId;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Form validation failed; the message is shown to the user verbatim
    #[error("{0}")]
    Validation(String),
    /// A toggle referenced a feature that is not in the current list
    #[error("Unknown feature: {0}")]
    UnknownFeature(FeatureId),
    /// Transport-level failure (connect, timeout, body read)
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),
    /// The API answered with a non-success status
    #[error("Upstream error ({status}): {message}")]
    UpstreamError { status: StatusCode, message: String },
    /// Response body did not match the expected shape
    #[error("Decode error: {0}")]
    DecodeError(String),
    /// The fetch task ended without a response (panicked or was cancelled)
    #[error("Fetch failed: {0}")]
    FetchFailed(String),
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// True for failures caused by the network or the remote API
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::HttpRequest(_)
                | Self::UpstreamError { .. }
                | Self::DecodeError(_)
                | Self::FetchFailed(_)
        )
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::DecodeError(format!("JSON error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}
