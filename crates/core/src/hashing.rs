//! Shared SHA-256 hex digest utility.
//!
//! Used by `prediction` (prediction identifiers) and by the API token
//! registry so the digest format stays identical in both places.

use sha2::{Digest, Sha256};

/// Compute a SHA-256 hex digest of the given bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}

/// Reduce the leading 8 bytes of a SHA-256 digest to a value below `modulus`.
///
/// Deterministic across processes and platforms, unlike `std` hashers.
pub fn sha256_mod(data: &[u8], modulus: u64) -> u64 {
    let hash = Sha256::digest(data);
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&hash[..8]);
    u64::from_be_bytes(prefix) % modulus
}
