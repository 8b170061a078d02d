use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt::Display;

/// Number of digest bytes retained in a fingerprint.
pub const FINGERPRINT_BYTES: usize = 4;

/// The dedup key identifying a normalized URL.
///
/// A fingerprint is the lowercase hex encoding of the leading bytes of a
/// 256-bit digest: 8 hex characters. Equal normalized URLs always produce
/// equal fingerprints. The truncation trades key size against a collision
/// probability that stays negligible at realistic corpus sizes; stores
/// verify the full normalized URL on every hit rather than trusting the
/// truncated key alone.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(SmolStr);

impl Fingerprint {
    /// Builds a fingerprint from a digest of at least [`FINGERPRINT_BYTES`]
    /// bytes.
    pub fn from_digest(digest: &[u8]) -> Self {
        let hex = format!(
            "{:02x}{:02x}{:02x}{:02x}",
            digest[0], digest[1], digest[2], digest[3]
        );
        Self(SmolStr::new(hex))
    }

    /// Returns the fingerprint as an 8-character hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Fingerprint").field(&self.0).finish()
    }
}

impl Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
