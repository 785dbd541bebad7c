//! Arc-owning storage adapters for the credential managers.
//!
//! These adapters wrap the lifetime-based storage types and own an
//! `Arc<PgPool>`, so they can be handed to the managers as
//! `Arc<dyn SessionStorage>` and friends. Errors are converted to
//! [`AuthError::Storage`] tagged with the operation name.

use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;

use lenslocked_auth::storage::{
    NewPasswordReset, PasswordResetStorage as PasswordResetStorageTrait,
    SessionStorage as SessionStorageTrait, UserStorage as UserStorageTrait,
};
use lenslocked_auth::types::{PasswordReset, Session, User, UserId};
use lenslocked_auth::{AuthError, AuthResult};

use crate::PgPool;
use crate::password_reset::PasswordResetStorage;
use crate::session::SessionStorage;
use crate::user::UserStorage;

// =============================================================================
// Arc-Owning User Storage
// =============================================================================

/// Arc-owning PostgreSQL user storage adapter.
#[derive(Clone)]
pub struct ArcUserStorage {
    pool: Arc<PgPool>,
}

impl ArcUserStorage {
    /// Create a new Arc-owning user storage.
    #[must_use]
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStorageTrait for ArcUserStorage {
    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        UserStorage::new(&self.pool)
            .find_by_id(id)
            .await
            .map_err(|e| AuthError::storage("user.find_by_id", e))
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        UserStorage::new(&self.pool)
            .find_by_email(email)
            .await
            .map_err(|e| AuthError::storage("user.find_by_email", e))
    }
}

// =============================================================================
// Arc-Owning Session Storage
// =============================================================================

/// Arc-owning PostgreSQL session storage adapter.
#[derive(Clone)]
pub struct ArcSessionStorage {
    pool: Arc<PgPool>,
}

impl ArcSessionStorage {
    /// Create a new Arc-owning session storage.
    #[must_use]
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStorageTrait for ArcSessionStorage {
    async fn upsert(&self, user_id: UserId, token_hash: &str) -> AuthResult<Session> {
        SessionStorage::new(&self.pool)
            .upsert(user_id, token_hash)
            .await
            .map_err(|e| AuthError::storage("session.upsert", e))
    }

    async fn find_user_by_token_hash(&self, token_hash: &str) -> AuthResult<Option<User>> {
        SessionStorage::new(&self.pool)
            .find_user_by_token_hash(token_hash)
            .await
            .map_err(|e| AuthError::storage("session.find_user", e))
    }

    async fn delete_by_token_hash(&self, token_hash: &str) -> AuthResult<bool> {
        SessionStorage::new(&self.pool)
            .delete_by_token_hash(token_hash)
            .await
            .map_err(|e| AuthError::storage("session.delete", e))
    }

    async fn delete_by_user(&self, user_id: UserId) -> AuthResult<bool> {
        SessionStorage::new(&self.pool)
            .delete_by_user(user_id)
            .await
            .map_err(|e| AuthError::storage("session.delete_by_user", e))
    }
}

// =============================================================================
// Arc-Owning Password Reset Storage
// =============================================================================

/// Arc-owning PostgreSQL password reset storage adapter.
#[derive(Clone)]
pub struct ArcPasswordResetStorage {
    pool: Arc<PgPool>,
}

impl ArcPasswordResetStorage {
    /// Create a new Arc-owning password reset storage.
    #[must_use]
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PasswordResetStorageTrait for ArcPasswordResetStorage {
    async fn create(&self, reset: &NewPasswordReset, supersede: bool) -> AuthResult<PasswordReset> {
        PasswordResetStorage::new(&self.pool)
            .create(reset, supersede)
            .await
            .map_err(|e| AuthError::storage("reset.create", e))
    }

    async fn consume(
        &self,
        token_hash: &str,
        now: OffsetDateTime,
    ) -> AuthResult<Option<PasswordReset>> {
        PasswordResetStorage::new(&self.pool)
            .consume(token_hash, now)
            .await
            .map_err(|e| AuthError::storage("reset.consume", e))
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> AuthResult<Option<PasswordReset>> {
        PasswordResetStorage::new(&self.pool)
            .find_by_token_hash(token_hash)
            .await
            .map_err(|e| AuthError::storage("reset.find", e))
    }

    async fn delete_expired(&self, now: OffsetDateTime) -> AuthResult<u64> {
        PasswordResetStorage::new(&self.pool)
            .delete_expired(now)
            .await
            .map_err(|e| AuthError::storage("reset.delete_expired", e))
    }
}
