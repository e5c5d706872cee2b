//! Error types for backing-store calls.

use thiserror::Error;

/// Errors that can occur while talking to the backing store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Network connectivity error (DNS, connection refused, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded deadline.
    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    /// Backing store returned an error response (4xx, 5xx).
    #[error("Backing store error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Response body doesn't match the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Client configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}
