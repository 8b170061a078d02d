use crate::Generator;
use keyhole_core::{CodeTriple, DisplayCode, Fingerprint, NormalizedUrl};
use sha2::{Digest, Sha256};

/// Content-addressed code generator.
///
/// Hashes the normalized URL with SHA-256, takes the hex of the first
/// 4 digest bytes as the fingerprint, and base-62 encodes the first
/// 8 digest bytes (read as a big-endian u64) as the display code. The
/// canonical short URL is the domain prefix concatenated with the code.
///
/// Because the code is a function of the URL content alone, re-ingesting
/// the same URL on any node at any time reproduces the same triple.
#[derive(Debug, Clone)]
pub struct HashGenerator {
    domain_prefix: String,
}

impl HashGenerator {
    /// Creates a generator whose short URLs start with `domain_prefix`.
    ///
    /// The prefix is used verbatim; include the trailing `/` if the short
    /// URL should have one.
    pub fn with_prefix(domain_prefix: impl Into<String>) -> Self {
        Self {
            domain_prefix: domain_prefix.into(),
        }
    }

    pub fn domain_prefix(&self) -> &str {
        &self.domain_prefix
    }
}

impl Generator for HashGenerator {
    fn generate(&self, url: &NormalizedUrl) -> CodeTriple {
        let digest = Sha256::digest(url.as_bytes());

        let fingerprint = Fingerprint::from_digest(&digest);

        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&digest[..8]);
        let code = DisplayCode::from_value(u64::from_be_bytes(prefix));

        let short_url = format!("{}{}", self.domain_prefix, code);

        CodeTriple {
            fingerprint,
            code,
            short_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> HashGenerator {
        HashGenerator::with_prefix("http://short.ly/")
    }

    #[test]
    fn generation_is_deterministic() {
        let url = NormalizedUrl::normalize("example.com/page");

        let first = generator().generate(&url);
        let second = generator().generate(&url);

        assert_eq!(first, second);
    }

    #[test]
    fn equivalent_raw_urls_share_a_triple() {
        let a = generator().generate(&NormalizedUrl::normalize("Example.com/Page/"));
        let b = generator().generate(&NormalizedUrl::normalize("example.com/page"));
        assert_eq!(a, b);
    }

    #[test]
    fn fingerprint_matches_the_digest_prefix() {
        // SHA-256("example.com/page") begins with these bytes; the
        // fingerprint is their hex encoding.
        let url = NormalizedUrl::normalize("example.com/page");
        let digest = Sha256::digest(url.as_bytes());
        let expected = format!(
            "{:02x}{:02x}{:02x}{:02x}",
            digest[0], digest[1], digest[2], digest[3]
        );

        let triple = generator().generate(&url);
        assert_eq!(triple.fingerprint.as_str(), expected);
        assert_eq!(triple.fingerprint.as_str().len(), 8);
    }

    #[test]
    fn short_url_is_prefix_plus_code() {
        let triple = generator().generate(&NormalizedUrl::normalize("example.com/page"));
        assert_eq!(
            triple.short_url,
            format!("http://short.ly/{}", triple.code)
        );
    }

    #[test]
    fn distinct_urls_do_not_collide_across_a_corpus() {
        use std::collections::HashSet;

        let gen = generator();
        let mut fingerprints = HashSet::new();
        let mut codes = HashSet::new();

        for i in 0..1000 {
            let url = NormalizedUrl::normalize(&format!("https://example.com/item/{i}"));
            let triple = gen.generate(&url);
            assert!(
                fingerprints.insert(triple.fingerprint.as_str().to_string()),
                "fingerprint collision at item {i}"
            );
            assert!(
                codes.insert(triple.code.as_str().to_string()),
                "display code collision at item {i}"
            );
        }
    }

    #[test]
    fn code_uses_only_base62_symbols() {
        let triple = generator().generate(&NormalizedUrl::normalize("https://example.com"));
        assert!(triple.code.as_str().bytes().all(|b| b.is_ascii_alphanumeric()));
    }
}
