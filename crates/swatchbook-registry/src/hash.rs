//! Content hashing for cache keys.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of the given content.
///
/// Cache entries key on the hash of the component's source and story file
/// contents, so any edit — whitespace included — is a cache miss.
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
