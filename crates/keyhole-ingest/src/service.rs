use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::retry::{retry_transient, RetryPolicy};
use keyhole_core::{
    BulkImporter, ImportReport, ImportRow, NormalizedUrl, RecordStore, ResolutionCache,
    RowOutcome, ShortUrlRecord,
};
use keyhole_generator::Generator;

/// The bulk import pipeline.
///
/// For each row: normalize the URL, derive its code triple, insert the
/// record unless the fingerprint is already mapped, then upsert the
/// resolution cache with the original (non-normalized) URL. Rows are
/// processed sequentially; one row fully completes or fails before the
/// next begins, and no row failure ever aborts the batch.
#[derive(Debug, Clone)]
pub struct ImportService<S, C, G> {
    store: Arc<S>,
    cache: Arc<C>,
    generator: Arc<G>,
    retry: RetryPolicy,
}

impl<S: RecordStore, C: ResolutionCache, G: Generator> ImportService<S, C, G> {
    /// Creates a pipeline with the default retry policy.
    pub fn new(store: S, cache: C, generator: G) -> Self {
        Self {
            store: Arc::new(store),
            cache: Arc::new(cache),
            generator: Arc::new(generator),
            retry: RetryPolicy::default(),
        }
    }

    /// Overrides the store retry policy.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn process_row(&self, row: &ImportRow) -> RowOutcome {
        let Some(raw) = row.long_url.as_deref() else {
            return RowOutcome::SkippedInvalid;
        };

        let normalized = NormalizedUrl::normalize(raw);
        if normalized.is_empty() {
            debug!(raw, "row has no usable url, skipping");
            return RowOutcome::SkippedInvalid;
        }

        let triple = self.generator.generate(&normalized);
        let record = ShortUrlRecord::new(triple, raw, normalized);

        if let Err(err) =
            retry_transient(&self.retry, || self.store.store_if_absent(&record)).await
        {
            warn!(url = raw, error = %err, "row failed at the storage boundary");
            return RowOutcome::Failed(err);
        }

        // The cache maps the code to the URL exactly as submitted, so a
        // redirect reproduces the user-facing casing and formatting.
        if let Err(err) = self.cache.put(&record.display_code, raw).await {
            // The record is durable; only this process's redirect view is
            // stale until the next rehydration.
            warn!(code = %record.display_code, error = %err, "resolution cache upsert failed");
        }

        RowOutcome::Shortened {
            code: record.display_code,
            short_url: record.short_url,
        }
    }
}

#[async_trait]
impl<S: RecordStore, C: ResolutionCache, G: Generator> BulkImporter for ImportService<S, C, G> {
    async fn import_rows(&self, rows: Vec<ImportRow>) -> ImportReport {
        let mut outcomes = Vec::with_capacity(rows.len());
        for row in &rows {
            outcomes.push(self.process_row(row).await);
        }

        let report = ImportReport { outcomes };
        if report.has_failures() {
            warn!(
                failed = report.failed(),
                total = report.len(),
                "bulk import finished with storage failures"
            );
        }
        info!(
            total = report.len(),
            shortened = report.shortened(),
            invalid = report.invalid(),
            failed = report.failed(),
            "bulk import finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyhole_cache::DashMapResolutionCache;
    use keyhole_core::{Fingerprint, StorageError, StoreOutcome};
    use keyhole_generator::HashGenerator;
    use keyhole_storage::InMemoryRecordStore;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    fn test_service() -> ImportService<InMemoryRecordStore, DashMapResolutionCache, HashGenerator>
    {
        ImportService::new(
            InMemoryRecordStore::new(),
            DashMapResolutionCache::new(),
            HashGenerator::with_prefix("http://short.ly/"),
        )
    }

    fn rows(urls: &[Option<&str>]) -> Vec<ImportRow> {
        urls.iter()
            .map(|url| match url {
                Some(u) => ImportRow::new(*u),
                None => ImportRow::empty(),
            })
            .collect()
    }

    #[tokio::test]
    async fn shortens_a_valid_row() {
        let service = test_service();

        let report = service
            .import_rows(rows(&[Some("https://example.com/page")]))
            .await;

        assert_eq!(report.len(), 1);
        assert_eq!(report.shortened(), 1);
        let short_url = report.outcomes[0].short_url().unwrap();
        assert!(short_url.starts_with("http://short.ly/"));
    }

    #[tokio::test]
    async fn preserves_row_order_and_count() {
        let service = test_service();

        let report = service
            .import_rows(rows(&[
                Some("https://example.com/a"),
                None,
                Some(""),
                Some("https://example.com/b"),
                Some("   "),
            ]))
            .await;

        assert_eq!(report.len(), 5);
        assert!(report.outcomes[0].short_url().is_some());
        assert!(report.outcomes[1].short_url().is_none());
        assert!(report.outcomes[2].short_url().is_none());
        assert!(report.outcomes[3].short_url().is_some());
        assert!(report.outcomes[4].short_url().is_none());
        assert_eq!(report.invalid(), 3);
    }

    #[tokio::test]
    async fn equivalent_urls_dedup_to_one_record() {
        let service = test_service();

        let report = service
            .import_rows(rows(&[
                Some("Example.com/Page/"),
                Some("example.com/page"),
            ]))
            .await;

        let first = report.outcomes[0].short_url().unwrap();
        let second = report.outcomes[1].short_url().unwrap();
        assert_eq!(first, second);
        assert_eq!(service.store.len(), 1);
    }

    #[tokio::test]
    async fn reimporting_the_same_batch_is_idempotent() {
        let service = test_service();
        let batch = rows(&[Some("https://example.com/page")]);

        let first = service.import_rows(batch.clone()).await;
        let second = service.import_rows(batch).await;

        assert_eq!(
            first.outcomes[0].short_url(),
            second.outcomes[0].short_url()
        );
        assert_eq!(service.store.len(), 1);
    }

    #[tokio::test]
    async fn cache_holds_the_original_url_after_ingest() {
        let service = test_service();

        let report = service.import_rows(rows(&[Some("Example.com/Page/")])).await;

        let RowOutcome::Shortened { code, .. } = &report.outcomes[0] else {
            panic!("row should have been shortened");
        };
        assert_eq!(
            service.cache.get(code).await.unwrap().as_deref(),
            Some("Example.com/Page/")
        );
    }

    #[tokio::test]
    async fn slash_only_url_is_invalid_not_hashed() {
        let service = test_service();

        let report = service.import_rows(rows(&[Some("///")])).await;

        assert_eq!(report.invalid(), 1);
        assert!(service.store.is_empty());
    }

    /// Store double that fails a configurable number of calls before
    /// delegating to an in-memory store.
    struct FlakyStore {
        inner: InMemoryRecordStore,
        failures_left: AtomicU32,
        error: StorageError,
    }

    impl FlakyStore {
        fn new(failures: u32, error: StorageError) -> Self {
            Self {
                inner: InMemoryRecordStore::new(),
                failures_left: AtomicU32::new(failures),
                error,
            }
        }
    }

    #[async_trait]
    impl RecordStore for FlakyStore {
        async fn store_if_absent(
            &self,
            record: &ShortUrlRecord,
        ) -> Result<StoreOutcome, StorageError> {
            if self
                .failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Err(self.error.clone());
            }
            self.inner.store_if_absent(record).await
        }

        async fn get(
            &self,
            fingerprint: &Fingerprint,
        ) -> Result<Option<ShortUrlRecord>, StorageError> {
            self.inner.get(fingerprint).await
        }

        async fn scan(&self) -> Result<Vec<ShortUrlRecord>, StorageError> {
            self.inner.scan().await
        }
    }

    fn fast_retry() -> RetryPolicy {
        RetryPolicy::builder()
            .max_attempts(3)
            .initial_backoff(Duration::from_millis(1))
            .op_timeout(Duration::from_secs(1))
            .build()
    }

    #[tokio::test]
    async fn transient_store_failures_are_retried_away() {
        let store = FlakyStore::new(2, StorageError::Unavailable("blip".into()));
        let service = ImportService::new(
            store,
            DashMapResolutionCache::new(),
            HashGenerator::with_prefix("http://short.ly/"),
        )
        .with_retry_policy(fast_retry());

        let report = service
            .import_rows(rows(&[Some("https://example.com/page")]))
            .await;

        assert_eq!(report.shortened(), 1);
        assert_eq!(report.failed(), 0);
    }

    #[tokio::test]
    async fn exhausted_retries_fail_only_that_row() {
        let store = FlakyStore::new(u32::MAX, StorageError::Unavailable("down".into()));
        let service = ImportService::new(
            store,
            DashMapResolutionCache::new(),
            HashGenerator::with_prefix("http://short.ly/"),
        )
        .with_retry_policy(fast_retry());

        let report = service
            .import_rows(rows(&[
                Some("https://example.com/a"),
                None,
                Some("https://example.com/b"),
            ]))
            .await;

        assert_eq!(report.len(), 3);
        assert_eq!(report.failed(), 2);
        assert_eq!(report.invalid(), 1);
        assert!(report.has_failures());
        assert!(matches!(
            report.outcomes[0],
            RowOutcome::Failed(StorageError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn permanent_store_failure_is_not_retried() {
        let store = FlakyStore::new(u32::MAX, StorageError::Query("constraint".into()));
        let service = ImportService::new(
            store,
            DashMapResolutionCache::new(),
            HashGenerator::with_prefix("http://short.ly/"),
        )
        .with_retry_policy(fast_retry());

        let report = service
            .import_rows(rows(&[Some("https://example.com/page")]))
            .await;

        assert!(matches!(
            report.outcomes[0],
            RowOutcome::Failed(StorageError::Query(_))
        ));
    }

    #[tokio::test]
    async fn failed_rows_leave_no_cache_entry() {
        let store = FlakyStore::new(u32::MAX, StorageError::Unavailable("down".into()));
        let cache = DashMapResolutionCache::new();
        let service = ImportService::new(
            store,
            cache.clone(),
            HashGenerator::with_prefix("http://short.ly/"),
        )
        .with_retry_policy(fast_retry());

        service
            .import_rows(rows(&[Some("https://example.com/page")]))
            .await;

        assert!(cache.is_empty());
    }
}
