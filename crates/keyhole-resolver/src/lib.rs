//! Redirect resolution service for keyhole.
//!
//! Resolution is a pure cache read: the cache is populated during ingestion
//! and can be rebuilt from the persistent record store after a restart via
//! [`ResolverService::rehydrate`].

pub mod service;

pub use service::ResolverService;
