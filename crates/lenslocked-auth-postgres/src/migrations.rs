//! Embedded schema migrations.
//!
//! SQL files under `migrations/` are compiled into the binary, so deployment
//! needs no migration files on disk. Applied versions are tracked in
//! `_sqlx_migrations`.

use std::borrow::Cow;

use sqlx_core::migrate::{Migration, MigrationType, Migrator};
use tracing::{info, instrument};

use crate::{PgPool, StorageResult};

/// (version, description, sql), oldest first. New migrations go at the end.
const MIGRATIONS: &[(i64, &str, &str)] = &[(
    20240301000001,
    "credentials",
    include_str!("../migrations/20240301000001_credentials.sql"),
)];

fn build_migrations() -> Vec<Migration> {
    MIGRATIONS
        .iter()
        .map(|(version, description, sql)| Migration {
            version: *version,
            description: Cow::Borrowed(description),
            migration_type: MigrationType::Simple,
            sql: Cow::Borrowed(sql),
            checksum: Cow::Borrowed(&[]),
            no_tx: false,
        })
        .collect()
}

/// Number of embedded migrations.
#[must_use]
pub fn count() -> usize {
    MIGRATIONS.len()
}

/// Applies all pending migrations.
///
/// # Errors
///
/// Returns [`StorageError::Migration`](crate::StorageError::Migration) if a
/// migration fails; it is rolled back.
#[instrument(skip(pool))]
pub async fn run(pool: &PgPool) -> StorageResult<()> {
    let migrations = build_migrations();
    info!(count = migrations.len(), "Running embedded migrations");

    let migrator = Migrator {
        migrations: Cow::Owned(migrations),
        ignore_missing: false,
        locking: true,
        no_tx: false,
    };
    migrator.run(pool).await?;

    info!("Database migrations completed");
    Ok(())
}
