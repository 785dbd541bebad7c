//! # lenslocked-auth
//!
//! Credential lifecycle for the Lenslocked web application.
//!
//! This crate provides:
//! - Opaque session tokens, one session per user
//! - Single-use, expiring password reset tokens
//! - Hash-only token persistence behind storage traits
//! - Password hashing and reset email composition
//!
//! ## Overview
//!
//! Raw tokens exist only in the value returned to the caller at issue time.
//! Storage keeps a SHA-256 digest, and every lookup hashes the presented
//! token and matches the digest exactly. Randomness, hashing and time are
//! injected as trait objects so tests can drive them deterministically.
//!
//! ## Modules
//!
//! - [`session`] - Session issue, authentication and revocation
//! - [`password_reset`] - Password reset issue, redemption and purge
//! - [`token`] - Random token generation and hashing
//! - [`storage`] - Storage traits and the in-memory backend
//! - [`email`] - Reset link and email composition
//! - [`password`] - Argon2 password hashing
//! - [`clock`] - Injectable time source
//! - [`config`] - Session and password reset configuration

pub mod clock;
pub mod config;
pub mod email;
pub mod error;
pub mod password;
pub mod password_reset;
pub mod session;
pub mod storage;
pub mod token;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AuthConfig, ConfigError, PasswordResetConfig, SessionConfig};
pub use email::{Email, EmailSender, forgot_password_email, reset_url};
pub use error::{AuthError, ErrorCategory};
pub use password_reset::PasswordResetManager;
pub use session::SessionManager;
pub use storage::{
    InMemoryAuthStorage, NewPasswordReset, PasswordResetStorage, SessionStorage, UserStorage,
};
pub use token::{OsRandom, RandomSource, Sha256TokenHasher, TokenHasher};
pub use types::{PasswordReset, Session, User, UserId};

/// Type alias for credential lifecycle results.
pub type AuthResult<T> = Result<T, AuthError>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use lenslocked_auth::prelude::*;
/// ```
pub mod prelude {
    pub use crate::AuthResult;
    pub use crate::clock::{Clock, SystemClock};
    pub use crate::config::{AuthConfig, PasswordResetConfig, SessionConfig};
    pub use crate::error::{AuthError, ErrorCategory};
    pub use crate::password_reset::PasswordResetManager;
    pub use crate::session::SessionManager;
    pub use crate::storage::{PasswordResetStorage, SessionStorage, UserStorage};
    pub use crate::types::{PasswordReset, Session, User, UserId};
}
