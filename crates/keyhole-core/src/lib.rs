//! Core types and traits for the keyhole URL shortener.
//!
//! This crate provides the shared vocabulary used by the ingest pipeline,
//! the resolver service, and the storage backends: normalized URLs,
//! fingerprints, base-62 display codes, the persistent record contract,
//! and the resolution-cache contract.

pub mod base62;
pub mod cache;
pub mod error;
pub mod fingerprint;
pub mod importer;
pub mod normalize;
pub mod record;
pub mod resolver;
pub mod store;

pub use base62::DisplayCode;
pub use cache::ResolutionCache;
pub use error::{CacheError, CoreError, StorageError};
pub use fingerprint::Fingerprint;
pub use importer::{BulkImporter, ImportReport, ImportRow, RowOutcome};
pub use normalize::NormalizedUrl;
pub use record::{CodeTriple, ShortUrlRecord};
pub use resolver::Resolver;
pub use store::{RecordStore, StoreOutcome};
