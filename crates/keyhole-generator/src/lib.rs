//! Short code generation for keyhole.
//!
//! This crate provides the [`Generator`] trait and the deterministic
//! [`HashGenerator`] implementation used by the ingest pipeline.

pub mod hash;

use keyhole_core::{CodeTriple, NormalizedUrl};

pub use hash::HashGenerator;

/// Trait for deriving short codes from normalized URLs.
///
/// Implementations are pure: no storage access, no randomness, no clock.
/// Calling `generate` twice with the same normalized URL must return the
/// identical triple, across calls and across process restarts.
pub trait Generator: Send + Sync + 'static {
    /// Derives the fingerprint, display code, and canonical short URL for
    /// a normalized URL.
    fn generate(&self, url: &NormalizedUrl) -> CodeTriple;
}
