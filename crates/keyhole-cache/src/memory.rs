use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use keyhole_core::{CacheError, DisplayCode, ResolutionCache};

type Result<T> = std::result::Result<T, CacheError>;

/// DashMap-backed resolution cache.
///
/// Sharded locks keep reads concurrent and mostly lock-free, with no
/// eviction: every ingested mapping stays resolvable for the process
/// lifetime. Cloning shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct DashMapResolutionCache {
    entries: Arc<DashMap<String, String>>,
}

impl DashMapResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached mappings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl ResolutionCache for DashMapResolutionCache {
    async fn get(&self, code: &DisplayCode) -> Result<Option<String>> {
        Ok(self
            .entries
            .get(code.as_str())
            .map(|entry| entry.value().clone()))
    }

    async fn put(&self, code: &DisplayCode, original_url: &str) -> Result<()> {
        self.entries
            .insert(code.as_str().to_string(), original_url.to_string());
        Ok(())
    }
}
