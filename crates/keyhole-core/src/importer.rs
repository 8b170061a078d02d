use crate::base62::DisplayCode;
use crate::error::StorageError;
use async_trait::async_trait;

/// One input row of a bulk import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportRow {
    /// The long URL cell, if the row had one.
    pub long_url: Option<String>,
}

impl ImportRow {
    pub fn new(long_url: impl Into<String>) -> Self {
        Self {
            long_url: Some(long_url.into()),
        }
    }

    /// A row with no usable URL cell.
    pub fn empty() -> Self {
        Self { long_url: None }
    }
}

/// Per-row result of the import pipeline.
///
/// A failed or invalid row is an outcome, not an error: it never aborts
/// processing of sibling rows, and callers can tell "the URL was blank"
/// apart from "storage briefly failed".
#[derive(Debug, Clone)]
pub enum RowOutcome {
    /// The row produced (or deduplicated onto) a short URL.
    Shortened {
        code: DisplayCode,
        short_url: String,
    },
    /// The row had no usable URL and was skipped.
    SkippedInvalid,
    /// Generation succeeded but the store rejected the row even after
    /// retries.
    Failed(StorageError),
}

impl RowOutcome {
    /// The short URL for the row, empty for skipped and failed rows.
    pub fn short_url(&self) -> Option<&str> {
        match self {
            RowOutcome::Shortened { short_url, .. } => Some(short_url),
            RowOutcome::SkippedInvalid | RowOutcome::Failed(_) => None,
        }
    }
}

/// Outcome of one bulk import, row-aligned with the input.
///
/// Output row *i* corresponds exactly to input row *i*; invalid rows are
/// kept in place with an empty short URL rather than dropped.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub outcomes: Vec<RowOutcome>,
}

impl ImportReport {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Rows that produced a short URL.
    pub fn shortened(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RowOutcome::Shortened { .. }))
            .count()
    }

    /// Rows skipped for having no usable URL.
    pub fn invalid(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RowOutcome::SkippedInvalid))
            .count()
    }

    /// Rows that failed at the storage boundary.
    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RowOutcome::Failed(_)))
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}

/// The bulk ingestion entry point exposed to transport collaborators.
#[async_trait]
pub trait BulkImporter: Send + Sync + 'static {
    /// Runs every row through normalize, generate, store, and cache upsert.
    ///
    /// Infallible as a batch: per-row problems are reported in the
    /// row-aligned [`ImportReport`], never by aborting.
    async fn import_rows(&self, rows: Vec<ImportRow>) -> ImportReport;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_counts_partition_the_outcomes() {
        let report = ImportReport {
            outcomes: vec![
                RowOutcome::Shortened {
                    code: DisplayCode::from_value(1),
                    short_url: "http://short.ly/1".into(),
                },
                RowOutcome::SkippedInvalid,
                RowOutcome::Failed(StorageError::Unavailable("down".into())),
                RowOutcome::SkippedInvalid,
            ],
        };

        assert_eq!(report.len(), 4);
        assert_eq!(report.shortened(), 1);
        assert_eq!(report.invalid(), 2);
        assert_eq!(report.failed(), 1);
        assert!(report.has_failures());
    }

    #[test]
    fn short_url_is_empty_for_non_shortened_rows() {
        assert!(RowOutcome::SkippedInvalid.short_url().is_none());
        assert!(RowOutcome::Failed(StorageError::Timeout("t".into()))
            .short_url()
            .is_none());
    }
}
