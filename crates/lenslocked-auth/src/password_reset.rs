//! Password reset manager.
//!
//! A reset token is a single-use bearer credential with a fixed lifetime.
//! Requesting a reset stores only the token's digest and hands the raw token
//! back for delivery by email; consuming it deletes the row in the same
//! storage operation that reads it, so a token can be redeemed at most once.
//!
//! # Flow
//!
//! ```text
//! "forgot password" form     -> create(email)     -> email reset_url(token)
//! reset link + new password  -> consume(token)    -> user to update
//! periodic job               -> purge_expired()
//! ```

use std::sync::Arc;

use time::Duration;

use crate::AuthResult;
use crate::clock::{Clock, SystemClock};
use crate::config::{MAX_RESET_DURATION, PasswordResetConfig};
use crate::error::AuthError;
use crate::storage::{NewPasswordReset, PasswordResetStorage, UserStorage};
use crate::token::{OsRandom, RandomSource, Sha256TokenHasher, TokenHasher, generate_token};
use crate::types::{PasswordReset, User, UserId};

/// Issues and redeems password reset tokens.
pub struct PasswordResetManager {
    users: Arc<dyn UserStorage>,
    resets: Arc<dyn PasswordResetStorage>,
    random: Arc<dyn RandomSource>,
    hasher: Arc<dyn TokenHasher>,
    clock: Arc<dyn Clock>,
    /// Token lifetime, converted once from the configuration.
    duration: Duration,
    config: PasswordResetConfig,
}

impl PasswordResetManager {
    /// Creates a manager using the OS random source, SHA-256 hashing and the
    /// system clock.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Configuration`] if the configured duration is zero
    /// or longer than [`MAX_RESET_DURATION`].
    pub fn new(
        users: Arc<dyn UserStorage>,
        resets: Arc<dyn PasswordResetStorage>,
        config: PasswordResetConfig,
    ) -> AuthResult<Self> {
        if config.duration.is_zero() {
            return Err(AuthError::configuration(
                "password reset duration must be greater than zero",
            ));
        }
        if config.duration > MAX_RESET_DURATION {
            return Err(AuthError::configuration(
                "password reset duration exceeds the maximum",
            ));
        }
        let duration = Duration::try_from(config.duration).map_err(|e| {
            AuthError::configuration(format!("password reset duration out of range: {e}"))
        })?;

        Ok(Self {
            users,
            resets,
            random: Arc::new(OsRandom),
            hasher: Arc::new(Sha256TokenHasher),
            clock: Arc::new(SystemClock),
            duration,
            config,
        })
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

    /// Replaces the clock used for expiry.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the manager's configuration.
    #[must_use]
    pub fn config(&self) -> &PasswordResetConfig {
        &self.config
    }

    /// Starts a reset for the user registered under `email`.
    ///
    /// The address is trimmed and lowercased before the lookup. The returned
    /// reset carries the raw token in `token`.
    ///
    /// # Errors
    ///
    /// - [`AuthError::NotFound`] if no user has this email
    /// - [`AuthError::EntropySource`] if no token could be generated
    /// - [`AuthError::Storage`] if a lookup or the insert failed
    pub async fn create(&self, email: &str) -> AuthResult<PasswordReset> {
        let email = User::normalize_email(email);
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::NotFound)?;

        self.issue(user.id).await
    }

    /// Starts a reset for a known user id.
    ///
    /// # Errors
    ///
    /// Same as [`create`](Self::create); `NotFound` if the id is unknown.
    pub async fn create_for_user(&self, user_id: UserId) -> AuthResult<PasswordReset> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AuthError::NotFound);
        }
        self.issue(user_id).await
    }

    async fn issue(&self, user_id: UserId) -> AuthResult<PasswordReset> {
        let token = generate_token(self.random.as_ref(), self.config.bytes_per_token)?;
        let now = self.clock.now();
        let expires_at = now.checked_add(self.duration).ok_or_else(|| {
            AuthError::configuration("password reset expiry is out of the timestamp range")
        })?;

        let new_reset = NewPasswordReset {
            user_id,
            token_hash: self.hasher.hash(&token),
            expires_at,
            created_at: now,
        };
        let mut reset = self
            .resets
            .create(&new_reset, self.config.supersede_outstanding)
            .await?;
        reset.token = Some(token);

        tracing::info!(
            user_id,
            reset_id = reset.id,
            expires_at = %reset.expires_at,
            "Password reset issued"
        );
        Ok(reset)
    }

    /// Redeems a raw reset token and returns its user.
    ///
    /// On success the token and every other outstanding reset for the same
    /// user are gone.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Expired`] if the token matched but its lifetime has
    ///   passed (the row stays until [`purge_expired`](Self::purge_expired))
    /// - [`AuthError::NotFound`] for an empty, unknown or already consumed
    ///   token, or if the user no longer exists
    /// - [`AuthError::Storage`] if a storage call failed
    pub async fn consume(&self, token: &str) -> AuthResult<User> {
        if token.is_empty() {
            return Err(AuthError::NotFound);
        }

        let token_hash = self.hasher.hash(token);
        let now = self.clock.now();

        let Some(reset) = self.resets.consume(&token_hash, now).await? else {
            return match self.resets.find_by_token_hash(&token_hash).await? {
                Some(stale) if stale.is_expired_at(now) => {
                    tracing::debug!(user_id = stale.user_id, "Password reset token expired");
                    Err(AuthError::Expired)
                }
                _ => Err(AuthError::NotFound),
            };
        };

        let user = self
            .users
            .find_by_id(reset.user_id)
            .await?
            .ok_or(AuthError::NotFound)?;

        tracing::info!(user_id = user.id, reset_id = reset.id, "Password reset consumed");
        Ok(user)
    }

    /// Deletes resets whose lifetime has passed.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] if the delete failed.
    pub async fn purge_expired(&self) -> AuthResult<u64> {
        let purged = self.resets.delete_expired(self.clock.now()).await?;
        if purged > 0 {
            tracing::info!(purged, "Expired password resets purged");
        }
        Ok(purged)
    }
}
