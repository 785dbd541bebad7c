//! Password hashing.
//!
//! Argon2id with default parameters and a fresh OS-random salt per hash.
//! Hashes are PHC strings, so the parameters travel with the stored value.
//!
//! # Example
//!
//! ```
//! use lenslocked_auth::password::{hash_password, verify_password};
//!
//! let hash = hash_password("hunter2").unwrap();
//! assert!(hash.starts_with("$argon2id$"));
//! assert!(verify_password("hunter2", &hash).unwrap());
//! assert!(!verify_password("hunter3", &hash).unwrap());
//! ```

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::AuthResult;
use crate::error::AuthError;

/// Hashes a password for storage.
///
/// # Errors
///
/// Returns [`AuthError::Internal`] if the hash primitive fails.
pub fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::internal(format!("password hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// Checks a password against a stored PHC hash.
///
/// Returns `Ok(false)` on mismatch.
///
/// # Errors
///
/// Returns [`AuthError::Internal`] if `hash` is not a valid PHC string.
pub fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AuthError::internal(format!("stored password hash is malformed: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
