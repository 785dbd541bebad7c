use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_SMTP_PORT: u16 = 587;

/// How the SMTP connection is secured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SmtpSecurity {
    /// Plain connection upgraded with STARTTLS.
    #[default]
    StartTls,
    /// Implicit TLS from the first byte (usually port 465).
    Tls,
    /// No encryption. Only for local test servers.
    None,
}

/// SMTP relay settings.
///
/// ```toml
/// [smtp]
/// host = "sandbox.smtp.mailtrap.io"
/// port = 2525
/// username = "user"
/// password = "secret"
/// default_sender = "support@lenslocked.com"
/// ```
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Used when a message has no `from`.
    pub default_sender: Option<String>,
    pub security: SmtpSecurity,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: DEFAULT_SMTP_PORT,
            username: None,
            password: None,
            default_sender: None,
            security: SmtpSecurity::default(),
        }
    }
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("default_sender", &self.default_sender)
            .field("security", &self.security)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SmtpConfig::default();
        assert_eq!(config.port, 587);
        assert_eq!(config.security, SmtpSecurity::StartTls);
        assert!(config.default_sender.is_none());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: SmtpConfig = toml::from_str(
            r#"
            host = "sandbox.smtp.mailtrap.io"
            port = 2525
            security = "none"
            "#,
        )
        .unwrap();
        assert_eq!(config.host, "sandbox.smtp.mailtrap.io");
        assert_eq!(config.port, 2525);
        assert_eq!(config.security, SmtpSecurity::None);
        assert!(config.username.is_none());
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = SmtpConfig {
            password: Some("hunter2".to_string()),
            ..SmtpConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }
}
