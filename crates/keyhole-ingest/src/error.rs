use thiserror::Error;

/// Batch-fatal import errors.
///
/// Per-row problems never surface here; they are reported through row
/// outcomes. Only a dataset that cannot be processed at all fails the
/// batch.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The input dataset has no usable URL column. Raised before any row
    /// is processed.
    #[error("input dataset has no '{column}' column (found: {headers})")]
    MissingColumn {
        column: &'static str,
        headers: String,
    },

    /// The tabular reader or writer failed.
    #[error("tabular i/o failed: {0}")]
    Csv(#[from] csv::Error),
}
