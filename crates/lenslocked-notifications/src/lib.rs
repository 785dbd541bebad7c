//! Outbound email for Lenslocked.
//!
//! [`EmailService`] implements the [`EmailSender`](lenslocked_auth::email::EmailSender)
//! trait from `lenslocked-auth` on top of an SMTP relay.

pub mod config;
pub mod error;
pub mod smtp;

pub use config::{DEFAULT_SMTP_PORT, SmtpConfig, SmtpSecurity};
pub use error::NotificationError;
pub use smtp::{DEFAULT_SENDER, EmailService};
