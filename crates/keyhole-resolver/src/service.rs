use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, trace};

use keyhole_core::{
    CacheError, DisplayCode, RecordStore, ResolutionCache, Resolver, StorageError,
};

/// Service for resolving short codes to their original URLs.
///
/// Lookups never touch the record store, keeping the redirect path a
/// single in-process map read. The store is consulted only by
/// [`rehydrate`](Self::rehydrate), which rebuilds the cache after a
/// restart.
#[derive(Debug, Clone)]
pub struct ResolverService<C> {
    cache: Arc<C>,
}

impl<C: ResolutionCache> ResolverService<C> {
    /// Creates a resolver over the given cache.
    pub fn new(cache: C) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a resolver sharing an already-wrapped cache, so ingestion
    /// and resolution can operate on the same instance.
    pub fn from_shared(cache: Arc<C>) -> Self {
        Self { cache }
    }

    /// Resolves a candidate short code to its original URL.
    pub async fn resolve(&self, code: &str) -> Result<Option<String>, CacheError> {
        Resolver::resolve(self, code).await
    }

    /// Repopulates the cache from every record in the store.
    ///
    /// Returns the number of mappings loaded.
    pub async fn rehydrate<S: RecordStore>(&self, store: &S) -> Result<usize, StorageError> {
        let records = store.scan().await?;
        let count = records.len();

        for record in records {
            self.cache
                .put(&record.display_code, &record.original_url)
                .await?;
        }

        info!(count, "rehydrated resolution cache from record store");
        Ok(count)
    }
}

#[async_trait]
impl<C: ResolutionCache> Resolver for ResolverService<C> {
    async fn resolve(&self, code: &str) -> Result<Option<String>, CacheError> {
        trace!(code, "resolving short code");

        // Anything outside the base-62 alphabet can never have been
        // generated, so it misses without a cache lookup.
        let Ok(code) = DisplayCode::parse(code) else {
            debug!(code, "candidate is not a well-formed display code");
            return Ok(None);
        };

        match self.cache.get(&code).await? {
            Some(url) => {
                debug!(code = %code, url = %url, "resolved short code");
                Ok(Some(url))
            }
            None => {
                trace!(code = %code, "short code not found");
                Ok(None)
            }
        }
    }
}
