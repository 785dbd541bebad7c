//! Login session storage.
//!
//! One row per user, enforced by `UNIQUE (user_id)`. Issuing a session is a
//! single upsert, so concurrent logins for the same user cannot leave two
//! rows behind.

use lenslocked_auth::types::{Session, User, UserId};
use sqlx_core::query::query;
use sqlx_core::query_as::query_as;
use time::OffsetDateTime;

use crate::{PgPool, StorageError, StorageResult};

type SessionTuple = (i64, i64, String, OffsetDateTime, OffsetDateTime);

fn session_from_tuple(row: SessionTuple) -> Session {
    Session {
        id: row.0,
        user_id: row.1,
        token: None,
        token_hash: row.2,
        created_at: row.3,
        updated_at: row.4,
    }
}

/// Session storage operations.
pub struct SessionStorage<'a> {
    pool: &'a PgPool,
}

impl<'a> SessionStorage<'a> {
    /// Create a new session storage with a connection pool reference.
    #[must_use]
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert the user's session or replace its token hash.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the hash is already used by another session, or
    /// a database error (including a foreign key violation for an unknown
    /// user).
    pub async fn upsert(&self, user_id: UserId, token_hash: &str) -> StorageResult<Session> {
        let row: SessionTuple = query_as(
            r#"
            INSERT INTO sessions (user_id, token_hash)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE
            SET token_hash = EXCLUDED.token_hash,
                updated_at = NOW()
            RETURNING id, user_id, token_hash, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(token_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from_insert(e, || "session token hash collision".to_string()))?;

        Ok(session_from_tuple(row))
    }

    /// Find the user owning a session token hash.
    ///
    /// Joins `users`, so a session is only returned with its user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_user_by_token_hash(&self, token_hash: &str) -> StorageResult<Option<User>> {
        let row: Option<(i64, String, String)> = query_as(
            r#"
            SELECT users.id, users.email, users.password_hash
            FROM sessions
            JOIN users ON users.id = sessions.user_id
            WHERE sessions.token_hash = $1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|(id, email, password_hash)| User {
            id,
            email,
            password_hash,
        }))
    }

    /// Find the session of a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_user(&self, user_id: UserId) -> StorageResult<Option<Session>> {
        let row: Option<SessionTuple> = query_as(
            r#"
            SELECT id, user_id, token_hash, created_at, updated_at
            FROM sessions
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(session_from_tuple))
    }

    /// Delete the session with this token hash.
    ///
    /// # Returns
    ///
    /// Returns `true` if a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete_by_token_hash(&self, token_hash: &str) -> StorageResult<bool> {
        let result = query("DELETE FROM sessions WHERE token_hash = $1")
            .bind(token_hash)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete the session of a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete_by_user(&self, user_id: UserId) -> StorageResult<bool> {
        let result = query("DELETE FROM sessions WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
