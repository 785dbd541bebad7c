//! User record storage trait.
//!
//! User records belong to the host application. The credential managers only
//! read them, to resolve an email address during a reset request and to turn
//! a consumed reset back into an identity.

use async_trait::async_trait;

use crate::AuthResult;
use crate::types::{User, UserId};

/// Read-only access to user records.
///
/// # Implementations
///
/// - [`InMemoryAuthStorage`](super::memory::InMemoryAuthStorage)
/// - PostgreSQL (in `lenslocked-auth-postgres` crate)
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Finds a user by primary key.
    ///
    /// # Returns
    ///
    /// Returns `Some(user)` if found, `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>>;

    /// Finds a user by email address.
    ///
    /// # Arguments
    ///
    /// * `email` - Address already normalised with [`User::normalize_email`]
    ///
    /// # Returns
    ///
    /// Returns `Some(user)` if found, `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>>;
}
