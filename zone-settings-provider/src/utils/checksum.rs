//! 字符串校验和
//!
//! Used to derive identifiers for read-only views whose remote object has no
//! identifier of its own. Equal inputs give equal outputs; the digest is not
//! meant as a security boundary.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest of `s`.
pub fn string_checksum(s: &str) -> String {
    hex::encode(Sha256::digest(s.as_bytes()))
}
