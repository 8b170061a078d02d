//! Integration tests for the Redis record store.
//!
//! These run against a real server named by `KEYHOLE_TEST_REDIS_URL`
//! (e.g. `redis://127.0.0.1:6379/15`) and skip when it is unset. Each test
//! uses its own URL corpus so runs don't interfere.

use keyhole_core::{NormalizedUrl, RecordStore, ShortUrlRecord, StorageError, StoreOutcome};
use keyhole_generator::{Generator, HashGenerator};
use keyhole_storage::RedisRecordStore;

const REDIS_URL_ENV: &str = "KEYHOLE_TEST_REDIS_URL";

async fn test_store() -> Option<RedisRecordStore> {
    let url = std::env::var(REDIS_URL_ENV).ok()?;
    Some(
        RedisRecordStore::connect(&url)
            .await
            .expect("failed to connect to the test Redis server"),
    )
}

fn record_for(raw: &str) -> ShortUrlRecord {
    let normalized = NormalizedUrl::normalize(raw);
    let triple = HashGenerator::with_prefix("http://short.ly/").generate(&normalized);
    ShortUrlRecord::new(triple, raw, normalized)
}

#[tokio::test]
async fn store_get_round_trip() {
    let Some(store) = test_store().await else {
        eprintln!("skipping: {REDIS_URL_ENV} not set");
        return;
    };

    let record = record_for("https://integration.example/round-trip");

    let outcome = store.store_if_absent(&record).await.unwrap();
    // A leftover record from an earlier run still satisfies the contract.
    assert!(matches!(
        outcome,
        StoreOutcome::Inserted | StoreOutcome::Existing
    ));

    let fetched = store.get(&record.fingerprint).await.unwrap().unwrap();
    assert_eq!(fetched, record);
}

#[tokio::test]
async fn second_store_is_a_dedup() {
    let Some(store) = test_store().await else {
        eprintln!("skipping: {REDIS_URL_ENV} not set");
        return;
    };

    let record = record_for("https://integration.example/dedup");

    store.store_if_absent(&record).await.unwrap();
    let outcome = store.store_if_absent(&record).await.unwrap();

    assert_eq!(outcome, StoreOutcome::Existing);
}

#[tokio::test]
async fn mismatched_normalized_url_is_a_collision() {
    let Some(store) = test_store().await else {
        eprintln!("skipping: {REDIS_URL_ENV} not set");
        return;
    };

    let record = record_for("https://integration.example/collision-a");
    let mut forged = record_for("https://integration.example/collision-b");
    forged.fingerprint = record.fingerprint.clone();

    store.store_if_absent(&record).await.unwrap();
    let err = store.store_if_absent(&forged).await.unwrap_err();

    assert!(matches!(err, StorageError::FingerprintCollision { .. }));
}

#[tokio::test]
async fn scan_includes_stored_records() {
    let Some(store) = test_store().await else {
        eprintln!("skipping: {REDIS_URL_ENV} not set");
        return;
    };

    let record = record_for("https://integration.example/scan-target");
    store.store_if_absent(&record).await.unwrap();

    let records = store.scan().await.unwrap();
    assert!(records.contains(&record));
}

#[tokio::test]
async fn connect_failure_is_transient() {
    // Nothing listens on this port; connecting must classify as retryable.
    let err = RedisRecordStore::connect("redis://127.0.0.1:1")
        .await
        .unwrap_err();
    assert!(err.is_transient(), "connection refusal should be transient, got {err}");
}
