use crate::base62::DisplayCode;
use crate::fingerprint::Fingerprint;
use crate::normalize::NormalizedUrl;
use serde::{Deserialize, Serialize};

/// The deterministic output of code generation for one normalized URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTriple {
    /// Dedup key derived from the digest.
    pub fingerprint: Fingerprint,
    /// Base-62 code shown in the short URL path.
    pub code: DisplayCode,
    /// Domain prefix concatenated with the code.
    pub short_url: String,
}

/// A persisted short URL mapping.
///
/// Created once per distinct normalized URL and never mutated or deleted
/// afterwards. The record carries the normalized URL so a store can confirm
/// that a fingerprint hit really is the same URL before deduplicating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortUrlRecord {
    pub fingerprint: Fingerprint,
    pub display_code: DisplayCode,
    pub short_url: String,
    /// The URL exactly as submitted, preserving user-facing casing.
    pub original_url: String,
    pub normalized_url: NormalizedUrl,
}

impl ShortUrlRecord {
    /// Assembles a record from a generated triple and the submitted URL.
    pub fn new(triple: CodeTriple, original_url: impl Into<String>, normalized_url: NormalizedUrl) -> Self {
        Self {
            fingerprint: triple.fingerprint,
            display_code: triple.code,
            short_url: triple.short_url,
            original_url: original_url.into(),
            normalized_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_preserves_the_submitted_url_verbatim() {
        let normalized = NormalizedUrl::normalize("Example.com/Page/");
        let triple = CodeTriple {
            fingerprint: Fingerprint::from_digest(&[1, 2, 3, 4]),
            code: DisplayCode::from_value(42),
            short_url: "http://short.ly/g".to_string(),
        };

        let record = ShortUrlRecord::new(triple, "Example.com/Page/", normalized.clone());

        assert_eq!(record.original_url, "Example.com/Page/");
        assert_eq!(record.normalized_url, normalized);
    }

    #[test]
    fn record_round_trips_through_json() {
        let normalized = NormalizedUrl::normalize("example.com/page");
        let triple = CodeTriple {
            fingerprint: Fingerprint::from_digest(&[0xab, 0xcd, 0xef, 0x01]),
            code: DisplayCode::from_value(7),
            short_url: "http://short.ly/7".to_string(),
        };
        let record = ShortUrlRecord::new(triple, "example.com/page", normalized);

        let json = serde_json::to_string(&record).unwrap();
        let back: ShortUrlRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
