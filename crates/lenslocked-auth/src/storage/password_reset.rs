//! Password reset token storage trait.
//!
//! # Security Considerations
//!
//! - Tokens are stored as hashes only
//! - Consumption must be atomic: two concurrent consumes of the same token
//!   may not both succeed
//! - Expired rows should be purged periodically

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::AuthResult;
use crate::types::{PasswordReset, UserId};

/// Values for a reset row about to be inserted.
#[derive(Debug, Clone)]
pub struct NewPasswordReset {
    /// User whose password may be reset.
    pub user_id: UserId,
    /// Digest of the raw token.
    pub token_hash: String,
    /// Instant after which the token is rejected.
    pub expires_at: OffsetDateTime,
    /// When the reset was requested.
    pub created_at: OffsetDateTime,
}

/// Storage trait for password reset tokens.
///
/// # Implementations
///
/// - [`InMemoryAuthStorage`](super::memory::InMemoryAuthStorage)
/// - PostgreSQL (in `lenslocked-auth-postgres` crate)
#[async_trait]
pub trait PasswordResetStorage: Send + Sync {
    /// Stores a new reset.
    ///
    /// # Arguments
    ///
    /// * `reset` - The row to insert
    /// * `supersede` - When `true`, every other reset belonging to the same
    ///   user is deleted in the same atomic operation
    ///
    /// # Returns
    ///
    /// Returns the stored reset. Its `token` field is always `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the reset cannot be stored.
    async fn create(&self, reset: &NewPasswordReset, supersede: bool) -> AuthResult<PasswordReset>;

    /// Atomically consumes an unexpired reset.
    ///
    /// Deletes the reset matching `token_hash` if it has not expired at
    /// `now`, together with every other reset for the same user, and returns
    /// the matched row.
    ///
    /// # Returns
    ///
    /// Returns `Some(reset)` if a reset was consumed. Returns `None` if no
    /// row matched or the matching row has expired; an expired row is left
    /// in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    ///
    /// # Atomicity
    ///
    /// The read and the delete must be one operation:
    ///
    /// ```sql
    /// DELETE FROM password_resets
    /// WHERE token_hash = $1 AND expires_at > $2
    /// RETURNING *
    /// ```
    async fn consume(
        &self,
        token_hash: &str,
        now: OffsetDateTime,
    ) -> AuthResult<Option<PasswordReset>>;

    /// Finds a reset by token hash regardless of expiry.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_token_hash(&self, token_hash: &str) -> AuthResult<Option<PasswordReset>>;

    /// Deletes resets that have expired at `now`.
    ///
    /// # Returns
    ///
    /// Returns the number of resets deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the cleanup operation fails.
    async fn delete_expired(&self, now: OffsetDateTime) -> AuthResult<u64>;
}
