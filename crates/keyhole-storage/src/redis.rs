use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::{debug, trace};

use keyhole_core::{Fingerprint, RecordStore, ShortUrlRecord, StorageError, StoreOutcome};

type Result<T> = std::result::Result<T, StorageError>;

const RECORD_KEY_PREFIX: &str = "kh:record:";

/// Generates the storage key for a fingerprint.
fn record_key(fingerprint: &Fingerprint) -> String {
    format!("{RECORD_KEY_PREFIX}{}", fingerprint.as_str())
}

/// Redis implementation of the record store.
///
/// One JSON-encoded record per fingerprint key. `SET NX` makes the
/// check-then-insert atomic on the server, so concurrent first sightings of
/// a URL across processes still produce exactly one record.
#[derive(Debug, Clone)]
pub struct RedisRecordStore {
    conn: redis::aio::MultiplexedConnection,
}

impl RedisRecordStore {
    /// Creates a store from an existing multiplexed connection.
    pub fn new(conn: redis::aio::MultiplexedConnection) -> Self {
        Self { conn }
    }

    /// Creates a store by opening a new connection to `redis_url`.
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url).map_err(map_redis_error)?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(map_redis_error)?;
        Ok(Self::new(conn))
    }
}

fn map_redis_error(err: redis::RedisError) -> StorageError {
    let message = err.to_string();

    if err.is_timeout() {
        StorageError::Timeout(message)
    } else if err.is_io_error() || err.is_connection_refusal() || err.is_connection_dropped() {
        StorageError::Unavailable(message)
    } else if err.kind() == redis::ErrorKind::UnexpectedReturnType {
        StorageError::InvalidData(message)
    } else {
        StorageError::Query(message)
    }
}

fn decode_record(json: &str) -> Result<ShortUrlRecord> {
    serde_json::from_str(json)
        .map_err(|e| StorageError::InvalidData(format!("undecodable record: {e}")))
}

#[async_trait]
impl RecordStore for RedisRecordStore {
    async fn store_if_absent(&self, record: &ShortUrlRecord) -> Result<StoreOutcome> {
        let key = record_key(&record.fingerprint);
        let json = serde_json::to_string(record)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let mut conn = self.conn.clone();
        let reply: Option<String> = redis::cmd("SET")
            .arg(&key)
            .arg(&json)
            .arg("NX")
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;

        if reply.is_some() {
            debug!(fingerprint = %record.fingerprint, code = %record.display_code, "stored new record");
            return Ok(StoreOutcome::Inserted);
        }

        // Key already present. Confirm the stored record really is the same
        // normalized URL before treating the fingerprint hit as a dedup.
        trace!(fingerprint = %record.fingerprint, "fingerprint already stored, verifying");
        let stored: Option<String> = conn.get(&key).await.map_err(map_redis_error)?;
        let Some(stored) = stored else {
            // Records are never deleted, so a vanished key means something
            // external mutated the keyspace.
            return Err(StorageError::InvalidData(format!(
                "record for {key} disappeared after conditional insert"
            )));
        };
        let stored = decode_record(&stored)?;

        if stored.normalized_url != record.normalized_url {
            return Err(StorageError::FingerprintCollision {
                fingerprint: record.fingerprint.to_string(),
                stored: stored.normalized_url.to_string(),
                candidate: record.normalized_url.to_string(),
            });
        }

        Ok(StoreOutcome::Existing)
    }

    async fn get(&self, fingerprint: &Fingerprint) -> Result<Option<ShortUrlRecord>> {
        let key = record_key(fingerprint);

        let mut conn = self.conn.clone();
        let json: Option<String> = conn.get(&key).await.map_err(map_redis_error)?;

        json.as_deref().map(decode_record).transpose()
    }

    async fn scan(&self) -> Result<Vec<ShortUrlRecord>> {
        let mut conn = self.conn.clone();
        let pattern = format!("{RECORD_KEY_PREFIX}*");

        let mut keys: Vec<String> = Vec::new();
        let mut cursor: u64 = 0;
        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(100)
                .query_async(&mut conn)
                .await
                .map_err(map_redis_error)?;
            keys.extend(batch);
            cursor = next;
            if cursor == 0 {
                break;
            }
        }

        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let values: Vec<Option<String>> = redis::cmd("MGET")
            .arg(&keys)
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;

        let mut records = Vec::with_capacity(values.len());
        for json in values.into_iter().flatten() {
            records.push(decode_record(&json)?);
        }

        debug!(count = records.len(), "scanned record store");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Behavior against a live server is covered by the integration suite in
    // tests/redis_record_store.rs.

    #[test]
    fn record_key_format() {
        let fingerprint = Fingerprint::from_digest(&[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(record_key(&fingerprint), "kh:record:deadbeef");
    }
}
