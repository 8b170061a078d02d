use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

use keyhole_core::{Fingerprint, RecordStore, ShortUrlRecord, StorageError, StoreOutcome};

type Result<T> = std::result::Result<T, StorageError>;

/// In-memory implementation of the record store using DashMap.
///
/// The entry API makes the check-then-insert atomic per fingerprint, so two
/// concurrent first sightings of the same URL cannot both insert. Cloning
/// shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    records: Arc<DashMap<String, ShortUrlRecord>>,
}

impl InMemoryRecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn store_if_absent(&self, record: &ShortUrlRecord) -> Result<StoreOutcome> {
        match self.records.entry(record.fingerprint.as_str().to_owned()) {
            Entry::Occupied(existing) => {
                let stored = existing.get();
                if stored.normalized_url != record.normalized_url {
                    return Err(StorageError::FingerprintCollision {
                        fingerprint: record.fingerprint.to_string(),
                        stored: stored.normalized_url.to_string(),
                        candidate: record.normalized_url.to_string(),
                    });
                }
                Ok(StoreOutcome::Existing)
            }
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(StoreOutcome::Inserted)
            }
        }
    }

    async fn get(&self, fingerprint: &Fingerprint) -> Result<Option<ShortUrlRecord>> {
        Ok(self
            .records
            .get(fingerprint.as_str())
            .map(|entry| entry.value().clone()))
    }

    async fn scan(&self) -> Result<Vec<ShortUrlRecord>> {
        Ok(self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }
}
