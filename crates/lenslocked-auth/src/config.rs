//! Credential lifecycle configuration.
//!
//! # Example (TOML)
//!
//! ```toml
//! [auth.session]
//! bytes_per_token = 32
//!
//! [auth.password_reset]
//! bytes_per_token = 32
//! duration = "1h"
//! supersede_outstanding = true
//! reset_url = "https://www.lenslocked.com/reset-pw"
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::token::MIN_BYTES_PER_TOKEN;

/// Default lifetime of a password reset token.
pub const DEFAULT_RESET_DURATION: Duration = Duration::from_secs(3600);

/// Longest lifetime a password reset token may be configured with.
pub const MAX_RESET_DURATION: Duration = Duration::from_secs(30 * 24 * 3600);

/// Root configuration for session and password reset handling.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Session token settings.
    pub session: SessionConfig,

    /// Password reset settings.
    pub password_reset: PasswordResetConfig,
}

impl AuthConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first invalid value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.password_reset.validate()
    }
}

/// Session token configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Random bytes per session token.
    /// Values below 32 are raised to 32 when tokens are generated.
    pub bytes_per_token: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            bytes_per_token: MIN_BYTES_PER_TOKEN,
        }
    }
}

/// Password reset configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PasswordResetConfig {
    /// Random bytes per reset token.
    /// Values below 32 are raised to 32 when tokens are generated.
    pub bytes_per_token: usize,

    /// How long a reset token stays valid.
    #[serde(with = "humantime_serde")]
    pub duration: Duration,

    /// Delete a user's outstanding resets when a new one is requested.
    pub supersede_outstanding: bool,

    /// Page that accepts the reset token in its `token` query parameter.
    pub reset_url: String,
}

impl Default for PasswordResetConfig {
    fn default() -> Self {
        Self {
            bytes_per_token: MIN_BYTES_PER_TOKEN,
            duration: DEFAULT_RESET_DURATION,
            supersede_outstanding: true,
            reset_url: "http://localhost:3000/reset-pw".to_string(),
        }
    }
}

impl PasswordResetConfig {
    /// Validates the reset configuration.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero duration, a duration above
    /// [`MAX_RESET_DURATION`] or an unparsable reset URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.duration.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "password_reset.duration",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.duration > MAX_RESET_DURATION {
            return Err(ConfigError::InvalidValue {
                field: "password_reset.duration",
                message: format!("must not exceed {}s", MAX_RESET_DURATION.as_secs()),
            });
        }
        url::Url::parse(&self.reset_url).map_err(|e| ConfigError::InvalidValue {
            field: "password_reset.reset_url",
            message: e.to_string(),
        })?;
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A field holds an unusable value.
    #[error("Invalid value for {field}: {message}")]
    InvalidValue {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        message: String,
    },
}
