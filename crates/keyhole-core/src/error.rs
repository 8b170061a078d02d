use thiserror::Error;

/// Errors produced by core validation.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("invalid display code: {0}")]
    InvalidDisplayCode(String),
}

/// Errors surfaced by persistent record stores.
///
/// [`is_transient`](StorageError::is_transient) separates failures worth a
/// bounded retry (connectivity, timeouts) from failures that retrying cannot
/// fix.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("fingerprint {fingerprint} already maps to a different url: stored '{stored}', candidate '{candidate}'")]
    FingerprintCollision {
        fingerprint: String,
        stored: String,
        candidate: String,
    },
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage serialization failed: {0}")]
    Serialization(String),
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),
}

impl StorageError {
    /// Whether the failure may clear on its own and is worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            StorageError::Unavailable(_) | StorageError::Timeout(_) => true,
            StorageError::Cache(cache) => matches!(
                cache,
                CacheError::Unavailable(_) | CacheError::Timeout(_)
            ),
            _ => false,
        }
    }
}

/// Errors surfaced by resolution caches.
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),
    #[error("cache operation timed out: {0}")]
    Timeout(String),
    #[error("cache operation failed: {0}")]
    Operation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connectivity_failures_are_transient() {
        assert!(StorageError::Unavailable("connection refused".into()).is_transient());
        assert!(StorageError::Timeout("deadline exceeded".into()).is_transient());
    }

    #[test]
    fn data_failures_are_permanent() {
        let collision = StorageError::FingerprintCollision {
            fingerprint: "deadbeef".into(),
            stored: "a.example".into(),
            candidate: "b.example".into(),
        };
        assert!(!collision.is_transient());
        assert!(!StorageError::Query("syntax".into()).is_transient());
        assert!(!StorageError::InvalidData("bad json".into()).is_transient());
        assert!(!StorageError::Serialization("bad record".into()).is_transient());
    }
}
