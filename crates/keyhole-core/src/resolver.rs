use crate::error::CacheError;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, CacheError>;

/// The redirect lookup exposed to transport collaborators.
#[async_trait]
pub trait Resolver: Send + Sync + 'static {
    /// Resolves a candidate short code to its original URL.
    ///
    /// `Ok(None)` is the normal miss outcome — the code was never ingested
    /// in this process's lifetime, or is not a well-formed display code.
    /// Callers render a not-found response from it; it is not an error.
    async fn resolve(&self, code: &str) -> Result<Option<String>>;
}
