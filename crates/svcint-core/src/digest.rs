//! # Content Digest — Config-Entry Fingerprints
//!
//! A fingerprint is the SHA-256 of an entry's [`CanonicalBytes`], rendered
//! `sha256:<hex>`. Operators compare fingerprints to tell whether a
//! converted entry and a stored one differ.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;

const PREFIX: &str = "sha256";

/// A SHA-256 digest of canonical bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex, without the algorithm prefix.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}:{}", self.to_hex())
    }
}

/// Digest canonical bytes. Raw byte slices are not accepted.
pub fn sha256_digest(data: &CanonicalBytes) -> ContentDigest {
    ContentDigest(Sha256::digest(data.as_bytes()).into())
}
