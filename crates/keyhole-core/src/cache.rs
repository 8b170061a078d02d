use crate::base62::DisplayCode;
use crate::error::CacheError;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, CacheError>;

/// Process-local mapping from display code to original long URL.
///
/// Populated as a side effect of ingestion and read on every redirect.
/// Implementations must tolerate concurrent reads and writes, since
/// redirect lookups can race an in-flight bulk import. Entries hold the
/// original, non-normalized URL so redirects preserve the submitted
/// casing and formatting.
#[async_trait]
pub trait ResolutionCache: Send + Sync + 'static {
    /// Looks up the original URL for a code.
    ///
    /// Returns `Ok(None)` when the code is not cached.
    async fn get(&self, code: &DisplayCode) -> Result<Option<String>>;

    /// Inserts or replaces the entry for a code.
    async fn put(&self, code: &DisplayCode, original_url: &str) -> Result<()>;
}
