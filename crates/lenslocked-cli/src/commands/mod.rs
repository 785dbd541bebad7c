pub mod login;
pub mod migrate;
pub mod reset;
pub mod session;
pub mod user;

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use lenslocked_auth::{AuthError, PasswordResetManager, SessionManager, User};
use lenslocked_auth_postgres::PostgresAuthStorage;

use crate::cli::{OutputFormat, UserSelector};
use crate::config::AppConfig;

/// Shared state for commands that talk to the database.
pub struct App {
    pub storage: PostgresAuthStorage,
    pub config: AppConfig,
    pub format: OutputFormat,
}

impl App {
    pub async fn connect(config: AppConfig, format: OutputFormat) -> Result<Self> {
        let url = config.database.resolve_url()?;
        let storage = PostgresAuthStorage::connect(&url)
            .await
            .context("failed to connect to database")?;
        Ok(Self {
            storage,
            config,
            format,
        })
    }

    pub fn sessions(&self) -> SessionManager {
        SessionManager::new(
            Arc::new(self.storage.session_adapter()),
            self.config.auth.session.clone(),
        )
    }

    pub fn resets(&self) -> Result<PasswordResetManager> {
        Ok(PasswordResetManager::new(
            Arc::new(self.storage.user_adapter()),
            Arc::new(self.storage.password_reset_adapter()),
            self.config.auth.password_reset.clone(),
        )?)
    }

    pub async fn resolve_user(&self, selector: &UserSelector) -> Result<User> {
        let users = self.storage.users();
        let found = match (&selector.user_id, &selector.email) {
            (Some(id), _) => users.find_by_id(*id).await?,
            (None, Some(email)) => users.find_by_email(&User::normalize_email(email)).await?,
            (None, None) => anyhow::bail!("--user-id or --email is required"),
        };
        found.context("user not found")
    }
}

/// Shown for a reset request whichever way the address lookup went.
pub const RESET_REQUESTED_MESSAGE: &str =
    "If an account exists for that address, a reset link has been sent";

/// Hides which of "unknown" and "expired" a token was, like a web handler would.
pub fn token_error(err: AuthError) -> anyhow::Error {
    if err.is_invalid_token() {
        anyhow!(err.public_message())
    } else {
        anyhow!(err)
    }
}

/// Reset requests name no account in their failures.
pub fn reset_request_error(err: AuthError) -> anyhow::Error {
    if err.is_not_found() {
        anyhow!("no password reset was issued")
    } else {
        anyhow!(err)
    }
}
