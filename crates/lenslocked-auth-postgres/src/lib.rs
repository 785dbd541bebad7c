//! PostgreSQL storage backend for Lenslocked Auth
//!
//! Provides persistent storage for:
//!
//! - Users (`users` table, read by the credential managers)
//! - Login sessions (`sessions` table, one row per user)
//! - Password resets (`password_resets` table)
//!
//! Only token digests are stored. The schema ships as embedded migrations;
//! call [`migrations::run`] once at startup.
//!
//! # Example
//!
//! ```ignore
//! use lenslocked_auth_postgres::{PostgresAuthStorage, migrations};
//!
//! let storage = PostgresAuthStorage::connect("postgres://localhost/lenslocked").await?;
//! migrations::run(storage.pool()).await?;
//!
//! let user = storage.users().find_by_email("a@b.com").await?;
//! ```

pub mod migrations;
pub mod password_reset;
pub mod session;
pub mod storage_adapters;
pub mod user;

use std::sync::Arc;

use sqlx_core::pool::Pool;
use sqlx_postgres::Postgres;

/// PostgreSQL connection pool type alias.
pub type PgPool = Pool<Postgres>;

pub use password_reset::PasswordResetStorage;
pub use session::SessionStorage;
pub use storage_adapters::{ArcPasswordResetStorage, ArcSessionStorage, ArcUserStorage};
pub use user::UserStorage;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur during auth storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx_core::Error),

    /// Applying the embedded migrations failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx_core::migrate::MigrateError),

    /// Requested row was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Row already exists (unique violation).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Invalid input data.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl StorageError {
    // -------------------------------------------------------------------------
    // Constructor Methods
    // -------------------------------------------------------------------------

    /// Create a `NotFound` error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    /// Create a `Conflict` error.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Create an `InvalidInput` error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Maps a unique violation to `Conflict`, anything else to `Database`.
    pub(crate) fn from_insert(err: sqlx_core::Error, what: impl FnOnce() -> String) -> Self {
        if let sqlx_core::Error::Database(ref db_err) = err
            && db_err.is_unique_violation()
        {
            return Self::Conflict(what());
        }
        Self::Database(err)
    }

    // -------------------------------------------------------------------------
    // Predicate Methods
    // -------------------------------------------------------------------------

    /// Returns `true` if this is a `NotFound` error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns `true` if this is a `Conflict` error.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// Returns `true` if this is a database error.
    #[must_use]
    pub fn is_database_error(&self) -> bool {
        matches!(self, Self::Database(_))
    }

    /// Returns `true` if this is an invalid input error.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Returns `true` if this is a client error (4xx equivalent).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::Conflict(_) | Self::InvalidInput(_)
        )
    }

    /// Returns `true` if this is a server error (5xx equivalent).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Migration(_))
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

// =============================================================================
// PostgreSQL Auth Storage
// =============================================================================

/// PostgreSQL storage backend for credential data.
///
/// Holds a connection pool and hands out borrowed storages per table, or
/// Arc-owning adapters for use as `Arc<dyn Trait>` in the managers.
#[derive(Debug, Clone)]
pub struct PostgresAuthStorage {
    pool: Arc<PgPool>,
}

impl PostgresAuthStorage {
    /// Create new storage with an existing connection pool.
    #[must_use]
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Create new storage by connecting to the database.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        use sqlx_core::pool::PoolOptions;
        let pool = PoolOptions::<Postgres>::new().connect(database_url).await?;
        Ok(Self::new(Arc::new(pool)))
    }

    /// Get a reference to the connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get a reference to the Arc-wrapped pool.
    #[must_use]
    pub fn pool_arc(&self) -> Arc<PgPool> {
        Arc::clone(&self.pool)
    }

    // -------------------------------------------------------------------------
    // Storage Accessors
    // -------------------------------------------------------------------------

    /// Get user storage operations.
    #[must_use]
    pub fn users(&self) -> UserStorage<'_> {
        UserStorage::new(&self.pool)
    }

    /// Get session storage operations.
    #[must_use]
    pub fn sessions(&self) -> SessionStorage<'_> {
        SessionStorage::new(&self.pool)
    }

    /// Get password reset storage operations.
    #[must_use]
    pub fn password_resets(&self) -> PasswordResetStorage<'_> {
        PasswordResetStorage::new(&self.pool)
    }

    // -------------------------------------------------------------------------
    // Trait Object Adapters
    // -------------------------------------------------------------------------

    /// Arc-owning user storage implementing the core trait.
    #[must_use]
    pub fn user_adapter(&self) -> ArcUserStorage {
        ArcUserStorage::new(self.pool_arc())
    }

    /// Arc-owning session storage implementing the core trait.
    #[must_use]
    pub fn session_adapter(&self) -> ArcSessionStorage {
        ArcSessionStorage::new(self.pool_arc())
    }

    /// Arc-owning password reset storage implementing the core trait.
    #[must_use]
    pub fn password_reset_adapter(&self) -> ArcPasswordResetStorage {
        ArcPasswordResetStorage::new(self.pool_arc())
    }
}

// =============================================================================
// Tests
// =============================================================================
