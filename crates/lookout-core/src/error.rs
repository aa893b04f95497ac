// Error types for the event collector

use thiserror::Error;

/// Result type alias for collector operations
pub type Result<T> = std::result::Result<T, CollectorError>;

/// Errors surfaced by ingestion and queries
#[derive(Debug, Error)]
pub enum CollectorError {
    /// Candidate event failed validation; nothing was stored or broadcast
    #[error("invalid event: {0}")]
    InvalidEvent(String),

    /// Durability layer unreachable or the write failed; nothing was broadcast
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl CollectorError {
    /// Create a validation error
    pub fn invalid(msg: impl Into<String>) -> Self {
        CollectorError::InvalidEvent(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        CollectorError::StorageUnavailable(msg.into())
    }
}
