use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt::Display;

/// Base-62 alphabet: digits, then uppercase, then lowercase.
///
/// The symbol order is part of the data model; changing it would remap
/// every stored display code.
pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Encodes an unsigned integer in positional base-62.
///
/// Zero encodes to `"0"`, not the empty string. The encoding is bijective
/// over `u64`: equal inputs always produce equal codes.
pub fn encode_u64(mut value: u64) -> SmolStr {
    if value == 0 {
        return SmolStr::new_static("0");
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(ALPHABET[(value % 62) as usize]);
        value /= 62;
    }
    digits.reverse();

    // The alphabet is pure ASCII, so the digit buffer is valid UTF-8.
    SmolStr::new(String::from_utf8(digits).expect("base62 alphabet is ascii"))
}

/// A short code shown to end users as the path segment of a short URL.
///
/// Display codes contain only base-62 symbols (`[0-9A-Za-z]`), so they are
/// safe in a URL path without escaping.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DisplayCode(SmolStr);

impl DisplayCode {
    /// Encodes a numeric value as a display code.
    pub fn from_value(value: u64) -> Self {
        Self(encode_u64(value))
    }

    /// Validates a candidate code taken from an untrusted source, such as
    /// an incoming request path.
    pub fn parse(code: &str) -> Result<Self, CoreError> {
        if code.is_empty() {
            return Err(CoreError::InvalidDisplayCode("empty code".to_string()));
        }
        if !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(CoreError::InvalidDisplayCode(format!(
                "must contain only base62 symbols: '{code}'"
            )));
        }
        Ok(Self(SmolStr::new(code)))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for DisplayCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("DisplayCode").field(&self.0).finish()
    }
}

impl Display for DisplayCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for DisplayCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DisplayCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = SmolStr::deserialize(deserializer)?;
        DisplayCode::parse(&s).map_err(serde::de::Error::custom)
    }
}
