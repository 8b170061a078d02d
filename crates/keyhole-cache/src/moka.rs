use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;
use tracing::{debug, trace};
use typed_builder::TypedBuilder;

use keyhole_core::{CacheError, DisplayCode, ResolutionCache};

type Result<T> = std::result::Result<T, CacheError>;

/// Moka-backed resolution cache.
///
/// Concurrent reads and writes are safe, so redirect lookups can race an
/// in-flight bulk import. The default configuration is unbounded: when the
/// cache is the only redirect path, eviction would silently break
/// redirects. Deployments that treat the cache as an optimization layer can
/// bound it with a capacity or TTL instead.
#[derive(Debug, Clone)]
pub struct MokaResolutionCache {
    cache: Cache<String, String>,
}

impl MokaResolutionCache {
    /// Creates an unbounded cache.
    pub fn new() -> Self {
        Self {
            cache: Cache::builder().build(),
        }
    }

    /// Creates a cache bounded to `max_capacity` entries.
    pub fn with_capacity(max_capacity: u64) -> Self {
        Self {
            cache: Cache::builder().max_capacity(max_capacity).build(),
        }
    }

    /// Returns a builder for a custom configuration.
    pub fn builder() -> ResolutionCacheConfigBuilder {
        ResolutionCacheConfig::builder()
    }
}

impl Default for MokaResolutionCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResolutionCache for MokaResolutionCache {
    async fn get(&self, code: &DisplayCode) -> Result<Option<String>> {
        trace!(code = %code, "resolution cache lookup");

        let key = code.as_str().to_string();
        match self.cache.get(&key).await {
            Some(url) => {
                debug!(code = %code, "resolution cache hit");
                Ok(Some(url))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, code: &DisplayCode, original_url: &str) -> Result<()> {
        trace!(code = %code, "resolution cache upsert");

        self.cache
            .insert(code.as_str().to_string(), original_url.to_string())
            .await;
        Ok(())
    }
}

/// Configuration for a custom [`MokaResolutionCache`].
#[derive(Debug, TypedBuilder, Default)]
pub struct ResolutionCacheConfig {
    /// Maximum number of entries the cache can hold.
    #[builder(default, setter(strip_option))]
    max_capacity: Option<u64>,
    /// Time-to-live for cache entries.
    #[builder(default, setter(strip_option))]
    ttl: Option<Duration>,
}

impl From<ResolutionCacheConfig> for MokaResolutionCache {
    fn from(config: ResolutionCacheConfig) -> Self {
        let mut builder = Cache::builder();

        if let Some(capacity) = config.max_capacity {
            builder = builder.max_capacity(capacity);
        }

        if let Some(ttl) = config.ttl {
            builder = builder.time_to_live(ttl);
        }

        MokaResolutionCache {
            cache: builder.build(),
        }
    }
}
