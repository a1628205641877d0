//! Cache error types

use thiserror::Error;

/// Errors that can occur during cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    /// Failed to connect to the cache backend
    #[error("Cache connection error: {0}")]
    Connection(String),

    /// The backend connection is permanently unusable for this client instance
    #[error("Cache connection closed: {0}")]
    ConnectionClosed(String),

    /// Failed to serialize or deserialize a cache payload or key source
    #[error("Cache serialization error: {0}")]
    Serialization(String),

    /// Cache operation timed out
    #[error("Cache operation timed out: {0}")]
    Timeout(String),

    /// Generic backend error for a single call; the client stays usable
    #[error("Cache backend error: {0}")]
    Backend(String),
}

impl CacheError {
    /// Whether this error belongs to the fatal-connectivity class that
    /// transitions a client instance to the closed state.
    ///
    /// Transient failures (timeouts, per-call backend errors) fail only the
    /// in-flight call.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CacheError::Connection(_) | CacheError::ConnectionClosed(_)
        )
    }
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_errors_are_fatal() {
        assert!(CacheError::Connection("refused".into()).is_fatal());
        assert!(CacheError::ConnectionClosed("dropped".into()).is_fatal());
    }

    #[test]
    fn test_per_call_errors_are_transient() {
        assert!(!CacheError::Backend("WRONGTYPE".into()).is_fatal());
        assert!(!CacheError::Timeout("GET".into()).is_fatal());
        assert!(!CacheError::Serialization("bad payload".into()).is_fatal());
    }
}
