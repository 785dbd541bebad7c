//! Storage traits for credential data.
//!
//! This module defines storage interfaces for:
//!
//! - User records (read-only)
//! - Login sessions
//! - Password reset tokens
//!
//! # Implementations
//!
//! - [`memory`] - In-process backend with the same atomicity guarantees
//! - `lenslocked-auth-postgres` - PostgreSQL storage backend

pub mod memory;
pub mod password_reset;
pub mod session;
pub mod user;

pub use memory::InMemoryAuthStorage;
pub use password_reset::{NewPasswordReset, PasswordResetStorage};
pub use session::SessionStorage;
pub use user::UserStorage;
