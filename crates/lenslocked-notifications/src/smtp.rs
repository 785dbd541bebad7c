use async_trait::async_trait;
use lenslocked_auth::email::{Email, EmailSender, forgot_password_email};
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use url::Url;

use crate::config::{SmtpConfig, SmtpSecurity};
use crate::error::NotificationError;

/// Sender used when neither the message nor the service names one.
pub const DEFAULT_SENDER: &str = "support@lenslocked.com";

/// Delivers [`Email`] messages through an SMTP relay.
pub struct EmailService {
    default_sender: Option<String>,
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailService {
    /// Builds the transport. No connection is made until the first send.
    pub fn new(config: &SmtpConfig) -> Result<Self, NotificationError> {
        let builder = match config.security {
            SmtpSecurity::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| NotificationError::InvalidConfig(e.to_string()))?,
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| NotificationError::InvalidConfig(e.to_string()))?,
            SmtpSecurity::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host),
        };

        let mut builder = builder.port(config.port);
        match (&config.username, &config.password) {
            (Some(username), Some(password)) => {
                builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
            }
            (Some(_), None) | (None, Some(_)) => {
                return Err(NotificationError::InvalidConfig(
                    "smtp username and password must be set together".into(),
                ));
            }
            (None, None) => {}
        }

        Ok(Self {
            default_sender: config.default_sender.clone().filter(|s| !s.is_empty()),
            mailer: builder.build(),
        })
    }

    /// Message `from`, then the configured default, then [`DEFAULT_SENDER`].
    pub fn sender_for<'a>(&'a self, email: &'a Email) -> &'a str {
        email
            .from
            .as_deref()
            .filter(|from| !from.is_empty())
            .or(self.default_sender.as_deref())
            .unwrap_or(DEFAULT_SENDER)
    }

    /// Converts an [`Email`] into a MIME message.
    ///
    /// Both bodies give `multipart/alternative`; a single body is sent alone.
    pub fn build_message(&self, email: &Email) -> Result<Message, NotificationError> {
        let builder = Message::builder()
            .from(parse_mailbox(self.sender_for(email))?)
            .to(parse_mailbox(&email.to)?)
            .subject(email.subject.clone());

        let message = match (email.plaintext.is_empty(), email.html.is_empty()) {
            (false, false) => builder.multipart(MultiPart::alternative_plain_html(
                email.plaintext.clone(),
                email.html.clone(),
            )),
            (true, false) => builder
                .header(ContentType::TEXT_HTML)
                .body(email.html.clone()),
            _ => builder
                .header(ContentType::TEXT_PLAIN)
                .body(email.plaintext.clone()),
        };

        message.map_err(|e| NotificationError::Build(e.to_string()))
    }

    /// Sends the password reset email for `reset_url` to `to`.
    pub async fn forgot_password(&self, to: &str, reset_url: &Url) -> Result<(), NotificationError> {
        self.send(&forgot_password_email(to, reset_url)).await
    }
}

#[async_trait]
impl EmailSender for EmailService {
    type Error = NotificationError;

    async fn send(&self, email: &Email) -> Result<(), NotificationError> {
        let message = self.build_message(email)?;
        self.mailer.send(message).await.map_err(|e| {
            tracing::warn!(subject = %email.subject, error = %e, "SMTP delivery failed");
            NotificationError::SendFailed(e.to_string())
        })?;

        tracing::info!(subject = %email.subject, "Email sent");
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, NotificationError> {
    address
        .parse()
        .map_err(|e: lettre::address::AddressError| NotificationError::InvalidAddress {
            address: address.to_string(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(default_sender: Option<&str>) -> EmailService {
        EmailService::new(&SmtpConfig {
            default_sender: default_sender.map(String::from),
            security: SmtpSecurity::None,
            ..SmtpConfig::default()
        })
        .unwrap()
    }

    fn formatted(service: &EmailService, email: &Email) -> String {
        String::from_utf8(service.build_message(email).unwrap().formatted()).unwrap()
    }

    fn email() -> Email {
        Email {
            from: None,
            to: "a@b.com".to_string(),
            subject: "Hello".to_string(),
            plaintext: "plain body".to_string(),
            html: "<p>html body</p>".to_string(),
        }
    }

    #[test]
    fn test_sender_fallback_chain() {
        let mut message = email();

        assert_eq!(service(None).sender_for(&message), "support@lenslocked.com");
        assert_eq!(
            service(Some("team@lenslocked.com")).sender_for(&message),
            "team@lenslocked.com"
        );

        message.from = Some("me@lenslocked.com".to_string());
        assert_eq!(
            service(Some("team@lenslocked.com")).sender_for(&message),
            "me@lenslocked.com"
        );

        message.from = Some(String::new());
        assert_eq!(service(None).sender_for(&message), "support@lenslocked.com");
    }

    #[test]
    fn test_both_bodies_make_alternative() {
        let raw = formatted(&service(None), &email());
        assert!(raw.contains("From: support@lenslocked.com"));
        assert!(raw.contains("To: a@b.com"));
        assert!(raw.contains("Subject: Hello"));
        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("text/plain"));
        assert!(raw.contains("text/html"));
    }

    #[test]
    fn test_single_body() {
        let svc = service(None);

        let plain_only = Email {
            html: String::new(),
            ..email()
        };
        let raw = formatted(&svc, &plain_only);
        assert!(raw.contains("Content-Type: text/plain"));
        assert!(!raw.contains("multipart"));

        let html_only = Email {
            plaintext: String::new(),
            ..email()
        };
        let raw = formatted(&svc, &html_only);
        assert!(raw.contains("Content-Type: text/html"));
        assert!(!raw.contains("multipart"));
    }

    #[test]
    fn test_invalid_recipient() {
        let bad = Email {
            to: "not an address".to_string(),
            ..email()
        };
        let err = service(None).build_message(&bad).unwrap_err();
        assert!(matches!(err, NotificationError::InvalidAddress { .. }));
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn test_send_rejects_bad_address_before_dialing() {
        let service = service(None);
        let err = service
            .forgot_password(
                "not an address",
                &lenslocked_auth::email::reset_url("http://localhost:3000/reset-pw", "t0k")
                    .unwrap(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, NotificationError::InvalidAddress { .. }));

        let sender: &dyn EmailSender<Error = NotificationError> = &service;
        let bad_sender = Email {
            from: Some("nope".to_string()),
            ..email()
        };
        assert!(matches!(
            sender.send(&bad_sender).await,
            Err(NotificationError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_forgot_password_message() {
        let url = lenslocked_auth::email::reset_url("http://localhost:3000/reset-pw", "t0k").unwrap();
        let raw = formatted(&service(None), &forgot_password_email("a@b.com", &url));
        assert!(raw.contains("Subject: Reset your password"));
        assert!(raw.contains("multipart/alternative"));
    }

    #[test]
    fn test_half_configured_credentials_rejected() {
        let result = EmailService::new(&SmtpConfig {
            username: Some("user".to_string()),
            security: SmtpSecurity::None,
            ..SmtpConfig::default()
        });
        assert!(matches!(result, Err(NotificationError::InvalidConfig(_))));
    }
}
