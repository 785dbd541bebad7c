//! Opaque token generation and hashing.
//!
//! - [`generator`] - Secure random bearer tokens
//! - [`hasher`] - One-way digests used as storage keys

pub mod generator;
pub mod hasher;

pub use generator::{
    MIN_BYTES_PER_TOKEN, OsRandom, RandomSource, effective_token_bytes, generate_bytes,
    generate_token,
};
pub use hasher::{Sha256TokenHasher, TokenHasher};
