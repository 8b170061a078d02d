//! Bulk import pipeline for keyhole.
//!
//! This crate drives normalize → generate → store → cache over every row of
//! an ingested URL list, and provides the CSV adapter that reads `long_url`
//! columns and writes the augmented output dataset.

pub mod error;
pub mod retry;
pub mod service;
pub mod tabular;

pub use error::ImportError;
pub use retry::{retry_transient, RetryPolicy};
pub use service::ImportService;
pub use tabular::{import_csv, read_table, write_augmented, UrlTable};
