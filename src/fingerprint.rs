// src/fingerprint.rs
use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of the extracted text. All normalization happens in
/// the filter; two fingerprints are compared by exact string equality.
pub fn digest(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
