//! Credential lifecycle error types.
//!
//! This module defines every error the session and password-reset managers
//! can return. `NotFound` and `Expired` are deliberately indistinguishable
//! through [`AuthError::public_message`] so that callers rendering responses
//! cannot be used as an account or token oracle.

use std::fmt;

/// Errors that can occur while issuing, validating, or revoking credentials.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The operating-system random source could not supply the requested bytes.
    #[error("Entropy source error: {message}")]
    EntropySource {
        /// Description of the random source failure.
        message: String,
    },

    /// A persistence operation failed.
    #[error("Storage error during {operation}: {message}")]
    Storage {
        /// Name of the operation that was in progress (e.g. `session.create`).
        operation: &'static str,
        /// Description of the underlying storage failure.
        message: String,
    },

    /// No session, reset token, or user matched the presented credential.
    #[error("Not found")]
    NotFound,

    /// A reset token matched but its expiry has passed.
    #[error("Token expired")]
    Expired,

    /// The auth configuration is invalid.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },

    /// An unexpected internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl AuthError {
    /// Creates a new `EntropySource` error.
    #[must_use]
    pub fn entropy_source(message: impl Into<String>) -> Self {
        Self::EntropySource {
            message: message.into(),
        }
    }

    /// Creates a new `Storage` error tagged with the operation name.
    #[must_use]
    pub fn storage(operation: &'static str, message: impl fmt::Display) -> Self {
        Self::Storage {
            operation,
            message: message.to_string(),
        }
    }

    /// Creates a new `Configuration` error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` for `NotFound`.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Returns `true` for `Expired`.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired)
    }

    /// Returns `true` if the presented token was rejected (`NotFound` or `Expired`).
    ///
    /// HTTP callers should map both to the same "invalid credentials" or
    /// "invalid or expired link" response.
    #[must_use]
    pub fn is_invalid_token(&self) -> bool {
        matches!(self, Self::NotFound | Self::Expired)
    }

    /// Returns `true` if this is a client error (4xx category).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.is_invalid_token()
    }

    /// Returns `true` if this is a server error (5xx category).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::EntropySource { .. }
                | Self::Storage { .. }
                | Self::Configuration { .. }
                | Self::Internal { .. }
        )
    }

    /// Returns the error category for logging/monitoring purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EntropySource { .. } => ErrorCategory::Entropy,
            Self::Storage { .. } => ErrorCategory::Infrastructure,
            Self::NotFound => ErrorCategory::Token,
            Self::Expired => ErrorCategory::Token,
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Message that is safe to show to an end user.
    ///
    /// Token rejections share one message; every server-side failure shares
    /// another. Storage and entropy details are never included.
    #[must_use]
    pub fn public_message(&self) -> &'static str {
        if self.is_invalid_token() {
            "invalid or expired token"
        } else {
            "internal server error"
        }
    }
}

/// Categories of credential errors for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Token lookup or expiry failures.
    Token,
    /// Random source failures.
    Entropy,
    /// Infrastructure/storage errors.
    Infrastructure,
    /// Configuration errors.
    Configuration,
    /// Internal server errors.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token => write!(f, "token"),
            Self::Entropy => write!(f, "entropy"),
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Configuration => write!(f, "configuration"),
            Self::Internal => write!(f, "internal"),
        }
    }
}
