//! Outbound email composition.
//!
//! The core builds the password reset link and message; delivering it is the
//! job of an [`EmailSender`] implementation such as the SMTP service in the
//! `lenslocked-notifications` crate.

use async_trait::async_trait;
use url::Url;

use crate::AuthResult;
use crate::error::AuthError;

/// Subject line of the password reset email.
pub const FORGOT_PASSWORD_SUBJECT: &str = "Reset your password";

/// An email message.
///
/// At least one of `plaintext` and `html` should be non-empty; senders pick
/// the MIME layout from which bodies are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Email {
    /// Sender address. `None` lets the sender apply its default.
    pub from: Option<String>,
    pub to: String,
    pub subject: String,
    pub plaintext: String,
    pub html: String,
}

/// Delivers [`Email`] messages.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Error returned when delivery fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Sends one message.
    ///
    /// # Errors
    ///
    /// Returns an error if the message could not be built or delivered.
    async fn send(&self, email: &Email) -> Result<(), Self::Error>;
}

/// Builds the link a user follows to reset their password.
///
/// The raw token is appended as the `token` query parameter, keeping any
/// query the base URL already carries.
///
/// # Errors
///
/// Returns [`AuthError::Configuration`] if `base` is not an absolute URL.
pub fn reset_url(base: &str, token: &str) -> AuthResult<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| AuthError::configuration(format!("invalid reset URL '{base}': {e}")))?;
    url.query_pairs_mut().append_pair("token", token);
    Ok(url)
}

/// Composes the "forgot password" email for `to`.
#[must_use]
pub fn forgot_password_email(to: &str, reset_url: &Url) -> Email {
    let link = reset_url.as_str();
    let href = link.replace('&', "&amp;");

    Email {
        from: None,
        to: to.to_string(),
        subject: FORGOT_PASSWORD_SUBJECT.to_string(),
        plaintext: format!("To reset your password, please visit the following link: {link}"),
        html: format!(
            r#"<p>To reset your password, please visit the following link: <a href="{href}">{href}</a></p>"#
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_url_appends_token() {
        let url = reset_url("https://www.lenslocked.com/reset-pw", "abc_DEF-123").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.lenslocked.com/reset-pw?token=abc_DEF-123"
        );
    }

    #[test]
    fn test_reset_url_keeps_existing_query() {
        let url = reset_url("http://localhost:3000/reset-pw?lang=en", "t0k").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/reset-pw?lang=en&token=t0k");
    }

    #[test]
    fn test_reset_url_rejects_relative_base() {
        let err = reset_url("/reset-pw", "t0k").unwrap_err();
        assert!(matches!(err, AuthError::Configuration { .. }));
    }

    #[test]
    fn test_forgot_password_email() {
        let url = reset_url("http://localhost:3000/reset-pw", "t0k").unwrap();
        let email = forgot_password_email("a@b.com", &url);

        assert_eq!(email.to, "a@b.com");
        assert!(email.from.is_none());
        assert_eq!(email.subject, "Reset your password");
        assert!(email.plaintext.ends_with("http://localhost:3000/reset-pw?token=t0k"));
        assert!(
            email
                .html
                .contains(r#"<a href="http://localhost:3000/reset-pw?token=t0k">"#)
        );
    }

    #[test]
    fn test_html_body_escapes_ampersand() {
        let url = reset_url("http://localhost:3000/reset-pw?lang=en", "t0k").unwrap();
        let email = forgot_password_email("a@b.com", &url);
        assert!(email.html.contains("lang=en&amp;token=t0k"));
        assert!(email.plaintext.contains("lang=en&token=t0k"));
    }
}
