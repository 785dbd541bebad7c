//! Login session storage trait.
//!
//! # Implementation Notes
//!
//! Implementations must:
//!
//! - Keep at most one row per user (unique `user_id`)
//! - Keep `token_hash` unique
//! - Make [`SessionStorage::upsert`] a single atomic insert-or-update so that
//!   two concurrent logins for one user can neither create two rows nor lose
//!   an update
//!
//! # Security Considerations
//!
//! - Only token hashes reach this layer; never log them
//! - Lookups return `None` for every kind of miss, including a session whose
//!   user record has disappeared

use async_trait::async_trait;

use crate::AuthResult;
use crate::types::{Session, User, UserId};

/// Storage trait for login sessions.
///
/// # Implementations
///
/// - [`InMemoryAuthStorage`](super::memory::InMemoryAuthStorage)
/// - PostgreSQL (in `lenslocked-auth-postgres` crate)
///
/// # Example Implementation
///
/// ```ignore
/// use lenslocked_auth::storage::SessionStorage;
///
/// struct MySessionStorage { /* pool */ }
///
/// #[async_trait::async_trait]
/// impl SessionStorage for MySessionStorage {
///     async fn upsert(&self, user_id: i64, token_hash: &str) -> AuthResult<Session> {
///         // INSERT INTO sessions (user_id, token_hash) VALUES ($1, $2)
///         // ON CONFLICT (user_id) DO UPDATE SET token_hash = EXCLUDED.token_hash
///         // RETURNING ...
///     }
///     // ... other methods
/// }
/// ```
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Inserts the user's session or replaces its token hash.
    ///
    /// # Returns
    ///
    /// Returns the stored session. Its `token` field is always `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails. No partial write may
    /// remain on failure.
    ///
    /// # Atomicity
    ///
    /// This must be one conditional write:
    ///
    /// ```sql
    /// INSERT INTO sessions (user_id, token_hash) VALUES ($1, $2)
    /// ON CONFLICT (user_id) DO UPDATE SET token_hash = EXCLUDED.token_hash
    /// RETURNING *
    /// ```
    ///
    /// An update followed by an insert on zero rows is not acceptable.
    async fn upsert(&self, user_id: UserId, token_hash: &str) -> AuthResult<Session>;

    /// Finds the user owning the session with this token hash.
    ///
    /// # Returns
    ///
    /// Returns `Some(user)` if a session matches and its user exists,
    /// `None` otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_user_by_token_hash(&self, token_hash: &str) -> AuthResult<Option<User>>;

    /// Deletes the session with this token hash.
    ///
    /// # Returns
    ///
    /// Returns `true` if a session was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails. A missing session is
    /// not an error.
    async fn delete_by_token_hash(&self, token_hash: &str) -> AuthResult<bool>;

    /// Deletes the session belonging to a user.
    ///
    /// Used when a user's credentials change and every outstanding login
    /// must end.
    ///
    /// # Returns
    ///
    /// Returns `true` if a session was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn delete_by_user(&self, user_id: UserId) -> AuthResult<bool>;
}
