//! Random token generation.
//!
//! Raw bearer tokens are drawn from an injectable [`RandomSource`] and encoded
//! as unpadded base64url so they can be placed in cookies, headers, and links
//! without escaping.
//!
//! # Security
//!
//! - Requests for fewer than [`MIN_BYTES_PER_TOKEN`] bytes are raised to the
//!   minimum, never honoured
//! - A failing random source aborts the operation; there is no fallback to a
//!   weaker generator

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use rand::rngs::OsRng;

use crate::AuthResult;
use crate::error::AuthError;

/// Minimum entropy of every issued token, in bytes (256 bits).
pub const MIN_BYTES_PER_TOKEN: usize = 32;

/// Source of cryptographically secure random bytes.
///
/// The production implementation is [`OsRandom`]. Tests substitute
/// deterministic sources through this trait.
pub trait RandomSource: Send + Sync {
    /// Fills `dest` completely with random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EntropySource`] if the source cannot supply
    /// `dest.len()` bytes.
    fn fill_bytes(&self, dest: &mut [u8]) -> AuthResult<()>;
}

/// Operating-system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> AuthResult<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| AuthError::entropy_source(e.to_string()))
    }
}

/// Returns the number of bytes actually used for a request of `requested` bytes.
#[must_use]
pub fn effective_token_bytes(requested: usize) -> usize {
    requested.max(MIN_BYTES_PER_TOKEN)
}

/// Generates `bytes` random bytes (at least [`MIN_BYTES_PER_TOKEN`]).
///
/// # Errors
///
/// Returns [`AuthError::EntropySource`] if the random source fails.
pub fn generate_bytes(source: &dyn RandomSource, bytes: usize) -> AuthResult<Vec<u8>> {
    let mut buf = vec![0u8; effective_token_bytes(bytes)];
    source.fill_bytes(&mut buf)?;
    Ok(buf)
}

/// Generates a base64url (unpadded) token from `bytes` random bytes.
///
/// A 32-byte token encodes to 43 characters.
///
/// # Errors
///
/// Returns [`AuthError::EntropySource`] if the random source fails.
pub fn generate_token(source: &dyn RandomSource, bytes: usize) -> AuthResult<String> {
    let buf = generate_bytes(source, bytes)?;
    Ok(URL_SAFE_NO_PAD.encode(buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fills every byte with the same value.
    struct ConstantRandom(u8);

    impl RandomSource for ConstantRandom {
        fn fill_bytes(&self, dest: &mut [u8]) -> AuthResult<()> {
            dest.fill(self.0);
            Ok(())
        }
    }

    struct BrokenRandom;

    impl RandomSource for BrokenRandom {
        fn fill_bytes(&self, _dest: &mut [u8]) -> AuthResult<()> {
            Err(AuthError::entropy_source("device unavailable"))
        }
    }

    #[test]
    fn test_generate_token_length() {
        let token = generate_token(&OsRandom, 32).unwrap();
        // 32 bytes base64url encoded = 43 characters
        assert_eq!(token.len(), 43);

        let token = generate_token(&OsRandom, 64).unwrap();
        assert_eq!(token.len(), 86);
    }

    #[test]
    fn test_small_requests_are_raised_to_minimum() {
        for requested in [0, 1, 16, 31] {
            assert_eq!(effective_token_bytes(requested), MIN_BYTES_PER_TOKEN);
            assert_eq!(generate_bytes(&OsRandom, requested).unwrap().len(), 32);
            assert_eq!(generate_token(&OsRandom, requested).unwrap().len(), 43);
        }
        assert_eq!(effective_token_bytes(48), 48);
    }

    #[test]
    fn test_token_is_url_safe() {
        let token = generate_token(&OsRandom, 32).unwrap();
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );

        // 0xff bytes exercise the '-' / '_' alphabet positions
        let token = generate_token(&ConstantRandom(0xff), 32).unwrap();
        assert!(!token.contains('+') && !token.contains('/') && !token.contains('='));
    }

    #[test]
    fn test_generate_token_uniqueness() {
        let tokens: Vec<String> = (0..100)
            .map(|_| generate_token(&OsRandom, 32).unwrap())
            .collect();

        let mut unique = tokens.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(tokens.len(), unique.len());
    }

    #[test]
    fn test_deterministic_source_is_used() {
        let a = generate_token(&ConstantRandom(7), 32).unwrap();
        let b = generate_token(&ConstantRandom(7), 32).unwrap();
        assert_eq!(a, b);
        assert_eq!(generate_bytes(&ConstantRandom(7), 32).unwrap(), vec![7u8; 32]);
    }

    #[test]
    fn test_entropy_failure_is_propagated() {
        let err = generate_token(&BrokenRandom, 32).unwrap_err();
        assert!(matches!(err, AuthError::EntropySource { .. }));
    }
}
