//! Token digests for storage and lookup.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};

/// Deterministic, unkeyed, one-way digest of a raw token.
///
/// Both managers store only the output of this trait and look records up by
/// exact match on it, so an implementation must be pure.
pub trait TokenHasher: Send + Sync {
    /// Returns the storage digest of `token`.
    fn hash(&self, token: &str) -> String;
}

/// SHA-256 digest encoded as unpadded base64url (43 characters).
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256TokenHasher;

impl TokenHasher for Sha256TokenHasher {
    fn hash(&self, token: &str) -> String {
        let digest = Sha256::digest(token.as_bytes());
        URL_SAFE_NO_PAD.encode(digest)
    }
}
