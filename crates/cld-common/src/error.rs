//! Error types for CLD

use thiserror::Error;

/// Result type alias for CLD operations
pub type Result<T> = std::result::Result<T, CldError>;

/// Main error type for CLD
#[derive(Error, Debug)]
pub enum CldError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),

    #[error("Cache artifact too old: {0}")]
    CacheStale(String),

    #[error("Cache artifact unreadable: {0}")]
    CacheDecode(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} {status_text}: {body}")]
    HttpStatus {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("Page decode error: {0}")]
    PageDecode(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CldError {
    /// True for the cache-layer failures which degrade to a network fetch
    /// rather than failing a session.
    pub fn is_cache_soft(&self) -> bool {
        matches!(
            self,
            CldError::CacheMiss(_) | CldError::CacheStale(_) | CldError::CacheDecode(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_soft_classification() {
        assert!(CldError::CacheMiss("x".into()).is_cache_soft());
        assert!(CldError::CacheStale("x".into()).is_cache_soft());
        assert!(CldError::CacheDecode("x".into()).is_cache_soft());

        assert!(!CldError::Network("x".into()).is_cache_soft());
        assert!(!CldError::Parse("x".into()).is_cache_soft());
        assert!(!CldError::Io(std::io::Error::other("x")).is_cache_soft());
    }
}
