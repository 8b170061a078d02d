use crate::error::StorageError;
use crate::fingerprint::Fingerprint;
use crate::record::ShortUrlRecord;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, StorageError>;

/// Result of a conditional insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    /// No record existed for the fingerprint; this one was inserted.
    Inserted,
    /// A record for the same normalized URL already existed; nothing was
    /// written.
    Existing,
}

/// A durable, deduplicated mapping from fingerprint to short URL record.
///
/// The store is the source of truth for every mapping ever created; the
/// resolution cache is a rebuildable projection of it.
#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    /// Inserts the record unless one already exists for its fingerprint.
    ///
    /// The check-then-insert must be atomic with respect to concurrent
    /// callers sharing a fingerprint: of two concurrent first sightings,
    /// exactly one inserts. When a record already exists its stored
    /// normalized URL is compared with the candidate's, and a mismatch is
    /// reported as [`StorageError::FingerprintCollision`] rather than being
    /// silently treated as the same URL.
    async fn store_if_absent(&self, record: &ShortUrlRecord) -> Result<StoreOutcome>;

    /// Retrieves the record for a fingerprint, if any.
    async fn get(&self, fingerprint: &Fingerprint) -> Result<Option<ShortUrlRecord>>;

    /// Enumerates every stored record, for cache rehydration after a
    /// restart.
    async fn scan(&self) -> Result<Vec<ShortUrlRecord>>;
}
