//! Domain types shared by the managers and storage backends.
//!
//! - [`User`] - Authenticated identity (read-only)
//! - [`Session`] - Login session, one per user
//! - [`PasswordReset`] - Single-use, expiring reset token record

pub mod password_reset;
pub mod session;
pub mod user;

pub use password_reset::PasswordReset;
pub use session::Session;
pub use user::{User, UserId};
