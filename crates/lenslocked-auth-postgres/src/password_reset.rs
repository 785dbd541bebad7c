//! Password reset storage.
//!
//! Creation with supersession and consumption are each one statement built
//! from data-modifying CTEs, so they need no explicit transaction. Two
//! concurrent consumes of the same hash both target the same row; the second
//! one finds it gone once the first commits and returns nothing.

use lenslocked_auth::storage::NewPasswordReset;
use lenslocked_auth::types::PasswordReset;
use sqlx_core::query::query;
use sqlx_core::query_as::query_as;
use time::OffsetDateTime;

use crate::{PgPool, StorageError, StorageResult};

type ResetTuple = (i64, i64, String, OffsetDateTime, OffsetDateTime);

fn reset_from_tuple(row: ResetTuple) -> PasswordReset {
    PasswordReset {
        id: row.0,
        user_id: row.1,
        token: None,
        token_hash: row.2,
        expires_at: row.3,
        created_at: row.4,
    }
}

/// Password reset storage operations.
pub struct PasswordResetStorage<'a> {
    pool: &'a PgPool,
}

impl<'a> PasswordResetStorage<'a> {
    /// Create a new password reset storage with a connection pool reference.
    #[must_use]
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a reset, optionally deleting the user's other resets.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` on a token hash collision, or a database error.
    pub async fn create(
        &self,
        reset: &NewPasswordReset,
        supersede: bool,
    ) -> StorageResult<PasswordReset> {
        let row: ResetTuple = query_as(
            r#"
            WITH superseded AS (
                DELETE FROM password_resets
                WHERE user_id = $1 AND $5
            )
            INSERT INTO password_resets (user_id, token_hash, expires_at, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, token_hash, expires_at, created_at
            "#,
        )
        .bind(reset.user_id)
        .bind(&reset.token_hash)
        .bind(reset.expires_at)
        .bind(reset.created_at)
        .bind(supersede)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from_insert(e, || "reset token hash collision".to_string()))?;

        Ok(reset_from_tuple(row))
    }

    /// Delete and return the unexpired reset with this hash, along with the
    /// rest of its user's resets.
    ///
    /// # Errors
    ///
    /// Returns an error if the database statement fails.
    pub async fn consume(
        &self,
        token_hash: &str,
        now: OffsetDateTime,
    ) -> StorageResult<Option<PasswordReset>> {
        let row: Option<ResetTuple> = query_as(
            r#"
            WITH consumed AS (
                DELETE FROM password_resets
                WHERE token_hash = $1 AND expires_at > $2
                RETURNING id, user_id, token_hash, expires_at, created_at
            ), siblings AS (
                DELETE FROM password_resets
                WHERE user_id IN (SELECT user_id FROM consumed)
                  AND token_hash <> $1
            )
            SELECT id, user_id, token_hash, expires_at, created_at
            FROM consumed
            "#,
        )
        .bind(token_hash)
        .bind(now)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(reset_from_tuple))
    }

    /// Find a reset by hash, expired or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_token_hash(&self, token_hash: &str) -> StorageResult<Option<PasswordReset>> {
        let row: Option<ResetTuple> = query_as(
            r#"
            SELECT id, user_id, token_hash, expires_at, created_at
            FROM password_resets
            WHERE token_hash = $1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(reset_from_tuple))
    }

    /// Delete resets that have expired at `now`.
    ///
    /// # Returns
    ///
    /// Returns the number of rows deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete_expired(&self, now: OffsetDateTime) -> StorageResult<u64> {
        let result = query("DELETE FROM password_resets WHERE expires_at <= $1")
            .bind(now)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
