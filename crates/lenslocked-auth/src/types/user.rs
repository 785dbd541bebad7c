//! User identity as seen by the credential managers.
//!
//! User records are owned by the host application. This crate only reads the
//! fields needed to authenticate a request.

use std::fmt;

use serde::Serialize;

/// Identifier of a user record.
pub type UserId = i64;

/// Authenticated identity returned by session and reset lookups.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Primary key of the user record.
    pub id: UserId,

    /// Login email address, stored lowercase.
    pub email: String,

    /// Adaptive password hash (PHC string). Never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    /// Normalises an email address the way user records store it.
    #[must_use]
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(User::normalize_email("  Jon@Calhoun.IO "), "jon@calhoun.io");
        assert_eq!(User::normalize_email("a@b.com"), "a@b.com");
    }

    #[test]
    fn test_debug_redacts_password_hash() {
        let user = User {
            id: 1,
            email: "a@b.com".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
        };
        let debug = format!("{user:?}");
        assert!(debug.contains("a@b.com"));
        assert!(!debug.contains("argon2id"));
    }

    #[test]
    fn test_serialization_skips_password_hash() {
        let user = User {
            id: 7,
            email: "a@b.com".to_string(),
            password_hash: "hash".to_string(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 7);
        assert!(json.get("password_hash").is_none());
    }
}
