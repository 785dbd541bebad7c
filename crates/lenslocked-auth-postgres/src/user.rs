//! User storage.
//!
//! The `users` table belongs to the host application; the credential managers
//! only read it. Creation and password updates are here for the admin CLI.

use lenslocked_auth::types::{User, UserId};
use sqlx_core::query::query;
use sqlx_core::query_as::query_as;

use crate::{PgPool, StorageError, StorageResult};

type UserTuple = (i64, String, String);

fn user_from_tuple(row: UserTuple) -> User {
    User {
        id: row.0,
        email: row.1,
        password_hash: row.2,
    }
}

/// User storage operations.
pub struct UserStorage<'a> {
    pool: &'a PgPool,
}

impl<'a> UserStorage<'a> {
    /// Create a new user storage with a connection pool reference.
    #[must_use]
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: UserId) -> StorageResult<Option<User>> {
        let row: Option<UserTuple> = query_as(
            r#"
            SELECT id, email, password_hash
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(user_from_tuple))
    }

    /// Find a user by (normalised) email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let row: Option<UserTuple> = query_as(
            r#"
            SELECT id, email, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(user_from_tuple))
    }

    /// Create a user. The email is normalised before insert.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty email, `Conflict` if the email is
    /// taken, or a database error.
    pub async fn create(&self, email: &str, password_hash: &str) -> StorageResult<User> {
        let email = User::normalize_email(email);
        if email.is_empty() {
            return Err(StorageError::invalid_input("email must not be empty"));
        }

        let row: UserTuple = query_as(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash
            "#,
        )
        .bind(&email)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from_insert(e, || format!("email '{email}' already registered")))?;

        Ok(user_from_tuple(row))
    }

    /// Replace a user's password hash.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no user has this ID, or a database error.
    pub async fn update_password_hash(&self, id: UserId, password_hash: &str) -> StorageResult<()> {
        let result = query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::not_found(format!("User {id}")));
        }
        Ok(())
    }
}
