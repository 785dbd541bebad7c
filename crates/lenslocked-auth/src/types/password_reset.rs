//! Password reset domain type.
//!
//! # Security
//!
//! - Reset tokens are stored as hashes only
//! - A reset is single-use: consuming it deletes the row
//! - Expired rows are rejected and purged periodically

use std::fmt;

use serde::Serialize;
use time::OffsetDateTime;

use super::user::UserId;

/// An outstanding password reset.
#[derive(Clone, Serialize)]
pub struct PasswordReset {
    /// Storage identifier of this reset row.
    pub id: i64,

    /// User whose password may be reset.
    pub user_id: UserId,

    /// Raw reset token. `Some` only on the value returned when the reset is
    /// created, for embedding in the emailed link.
    #[serde(skip_serializing)]
    pub token: Option<String>,

    /// Digest of the raw token, unique across resets.
    #[serde(skip_serializing)]
    pub token_hash: String,

    /// Instant after which the token is rejected.
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,

    /// When the reset was requested.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl PasswordReset {
    /// Returns `true` if the reset has expired at `now`.
    ///
    /// A token is valid strictly before `expires_at`.
    #[must_use]
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        now >= self.expires_at
    }
}

impl fmt::Debug for PasswordReset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordReset")
            .field("id", &self.id)
            .field("user_id", &self.user_id)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("expires_at", &self.expires_at)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;
    use time::macros::datetime;

    fn reset_expiring_at(expires_at: OffsetDateTime) -> PasswordReset {
        PasswordReset {
            id: 1,
            user_id: 7,
            token: Some("raw-token".to_string()),
            token_hash: "hash".to_string(),
            expires_at,
            created_at: expires_at - Duration::hours(1),
        }
    }

    #[test]
    fn test_is_expired_at() {
        let expires_at = datetime!(2024-03-01 13:00 UTC);
        let reset = reset_expiring_at(expires_at);

        assert!(!reset.is_expired_at(expires_at - Duration::seconds(1)));
        assert!(reset.is_expired_at(expires_at));
        assert!(reset.is_expired_at(expires_at + Duration::seconds(1)));
    }

    #[test]
    fn test_debug_redacts_token() {
        let reset = reset_expiring_at(datetime!(2024-03-01 13:00 UTC));
        let debug = format!("{reset:?}");
        assert!(!debug.contains("raw-token"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_serialization_skips_token_and_hash() {
        let reset = reset_expiring_at(datetime!(2024-03-01 13:00 UTC));
        let json = serde_json::to_value(&reset).unwrap();
        assert!(json.get("token").is_none());
        assert!(json.get("token_hash").is_none());
        assert_eq!(json["expires_at"], "2024-03-01T13:00:00Z");
    }
}
