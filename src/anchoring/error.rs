//! Anchoring-specific error types

use thiserror::Error;

/// Calendar and block explorer errors
#[derive(Debug, Clone, Error)]
pub enum AnchorError {
    /// Network communication error
    #[error("network error: {0}")]
    Network(String),

    /// Service returned an error status
    #[error("service error: {0}")]
    ServiceError(String),

    /// Invalid response from service
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Request timeout
    #[error("timeout after {0} seconds")]
    Timeout(u64),

    /// Service not configured
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// Failed to fetch a block from every explorer provider
    #[error("Failed to fetch block {height}: {details}")]
    BlockFetchFailed { height: u64, details: String },
}

#[cfg(feature = "http")]
impl AnchorError {
    /// Map a reqwest failure, keeping timeouts distinct
    pub(crate) fn from_reqwest(e: &reqwest::Error, timeout_secs: u64) -> Self {
        if e.is_timeout() {
            AnchorError::Timeout(timeout_secs)
        } else {
            AnchorError::Network(e.to_string())
        }
    }
}
