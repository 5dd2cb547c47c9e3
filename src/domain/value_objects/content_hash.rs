//! Content Hash Value Object
//!
//! SHA-256 digest of an output file. The build lock records these so that
//! `clean` only removes files that still hold what the pipeline wrote.

use std::fmt;

use sha2::{Digest, Sha256};

/// `sha256:<hex>` digest of file content
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    pub const PREFIX: &'static str = "sha256:";

    /// Wrap a stored hash string, adding the prefix if it is missing
    pub fn new(raw_hash: &str) -> Self {
        if raw_hash.starts_with(Self::PREFIX) {
            Self(raw_hash.to_string())
        } else {
            Self(format!("{}{}", Self::PREFIX, raw_hash))
        }
    }

    /// Hash raw bytes
    pub fn from_bytes(content: &[u8]) -> Self {
        Self(format!("{}{:x}", Self::PREFIX, Sha256::digest(content)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hex digest without the prefix
    pub fn hex(&self) -> &str {
        self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0)
    }

    /// Compare against a stored string (with or without prefix)
    pub fn matches_str(&self, s: &str) -> bool {
        if s.starts_with(Self::PREFIX) {
            self.0 == s
        } else {
            self.hex() == s
        }
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ContentHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
