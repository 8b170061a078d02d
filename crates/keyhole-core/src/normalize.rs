use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A URL canonicalized for fingerprinting.
///
/// Two raw URLs that differ only in surrounding whitespace, trailing path
/// separators, or letter case normalize to the same value and therefore map
/// to the same short code. Normalization is idempotent.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedUrl(String);

impl NormalizedUrl {
    /// Canonicalizes a raw URL string.
    ///
    /// The input is whitespace-trimmed, stripped of all trailing `/`
    /// characters, and lowercased, in that order. An empty input passes
    /// through as an empty value; deciding whether an empty URL is
    /// acceptable is left to the caller. No scheme validation happens here.
    pub fn normalize(raw: &str) -> Self {
        Self(raw.trim().trim_end_matches('/').to_lowercase())
    }

    /// Returns the normalized URL as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the byte representation used for fingerprinting.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for NormalizedUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
