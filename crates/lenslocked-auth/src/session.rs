//! Session manager.
//!
//! Issues, resolves and revokes login sessions. Each user has at most one
//! session; issuing a new one rotates the token and the previous token stops
//! working immediately.
//!
//! # Usage
//!
//! ```ignore
//! use lenslocked_auth::session::SessionManager;
//!
//! let sessions = SessionManager::new(storage, config.session.clone());
//!
//! // On sign-in
//! let session = sessions.create(user.id).await?;
//! set_cookie("session", session.token.as_deref().unwrap_or_default());
//!
//! // On every authenticated request
//! let user = sessions.authenticate(&cookie_value).await?;
//!
//! // On sign-out
//! sessions.revoke(&cookie_value).await?;
//! ```

use std::sync::Arc;

use crate::AuthResult;
use crate::config::SessionConfig;
use crate::error::AuthError;
use crate::storage::SessionStorage;
use crate::token::{OsRandom, RandomSource, Sha256TokenHasher, TokenHasher, generate_token};
use crate::types::{Session, User, UserId};

/// Issues and validates session tokens.
///
/// Holds no per-request state and can be shared behind an `Arc`.
pub struct SessionManager {
    /// Session persistence.
    storage: Arc<dyn SessionStorage>,

    /// Entropy for new tokens.
    random: Arc<dyn RandomSource>,

    /// Digest used for storage and lookup.
    hasher: Arc<dyn TokenHasher>,

    config: SessionConfig,
}

impl SessionManager {
    /// Creates a manager using the OS random source and SHA-256 hashing.
    #[must_use]
    pub fn new(storage: Arc<dyn SessionStorage>, config: SessionConfig) -> Self {
        Self {
            storage,
            random: Arc::new(OsRandom),
            hasher: Arc::new(Sha256TokenHasher),
            config,
        }
    }

    /// Replaces the random source.
    #[must_use]
    pub fn with_random_source(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    /// Replaces the token hasher.
    #[must_use]
    pub fn with_hasher(mut self, hasher: Arc<dyn TokenHasher>) -> Self {
        self.hasher = hasher;
        self
    }

    /// Returns the manager's configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Issues a session for `user_id`, replacing any existing one.
    ///
    /// The returned session carries the raw token in `token`; this is the
    /// only place it is ever available.
    ///
    /// # Errors
    ///
    /// - [`AuthError::EntropySource`] if no token could be generated
    /// - [`AuthError::Storage`] if the upsert failed (nothing was written)
    pub async fn create(&self, user_id: UserId) -> AuthResult<Session> {
        let token = generate_token(self.random.as_ref(), self.config.bytes_per_token)?;
        let token_hash = self.hasher.hash(&token);

        let mut session = self.storage.upsert(user_id, &token_hash).await?;
        session.token = Some(token);

        tracing::debug!(user_id, session_id = session.id, "Session issued");
        Ok(session)
    }

    /// Resolves a raw session token to its user.
    ///
    /// # Errors
    ///
    /// - [`AuthError::NotFound`] for an empty token, an unknown token, or a
    ///   session whose user no longer exists
    /// - [`AuthError::Storage`] if the lookup failed
    pub async fn authenticate(&self, token: &str) -> AuthResult<User> {
        if token.is_empty() {
            return Err(AuthError::NotFound);
        }

        let token_hash = self.hasher.hash(token);
        match self.storage.find_user_by_token_hash(&token_hash).await? {
            Some(user) => Ok(user),
            None => {
                tracing::debug!("Session token did not match");
                Err(AuthError::NotFound)
            }
        }
    }

    /// Ends the session identified by a raw token.
    ///
    /// Revoking an unknown or already revoked token succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] if the delete failed.
    pub async fn revoke(&self, token: &str) -> AuthResult<()> {
        if token.is_empty() {
            return Ok(());
        }

        let token_hash = self.hasher.hash(token);
        let deleted = self.storage.delete_by_token_hash(&token_hash).await?;
        tracing::debug!(deleted, "Session revoked");
        Ok(())
    }

    /// Ends the session of a user, whatever its token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] if the delete failed.
    pub async fn revoke_user(&self, user_id: UserId) -> AuthResult<()> {
        let deleted = self.storage.delete_by_user(user_id).await?;
        tracing::debug!(user_id, deleted, "User sessions revoked");
        Ok(())
    }
}
