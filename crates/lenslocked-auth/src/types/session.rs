//! Session domain type.
//!
//! # Security
//!
//! - Only the token hash is persisted; the raw token exists on a `Session`
//!   value solely when it has just been issued
//! - A user has at most one session; logging in again rotates its token

use std::fmt;

use serde::Serialize;
use time::OffsetDateTime;

use super::user::UserId;

/// A user's login session.
#[derive(Clone, Serialize)]
pub struct Session {
    /// Storage identifier of this session row.
    pub id: i64,

    /// User that owns the session.
    pub user_id: UserId,

    /// Raw bearer token. `Some` only on the value returned by
    /// `SessionManager::create`; lookups never recover it.
    #[serde(skip_serializing)]
    pub token: Option<String>,

    /// Digest of the raw token, unique across sessions.
    #[serde(skip_serializing)]
    pub token_hash: String,

    /// When the row was first inserted.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,

    /// When the token was last rotated.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("user_id", &self.user_id)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_serialization_skips_token_and_hash() {
        let session = Session {
            id: 3,
            user_id: 7,
            token: Some("raw-token".to_string()),
            token_hash: "stored-digest".to_string(),
            created_at: datetime!(2024-03-01 12:00 UTC),
            updated_at: datetime!(2024-03-01 12:30 UTC),
        };
        let json = serde_json::to_value(&session).unwrap();
        assert!(json.get("token").is_none());
        assert!(json.get("token_hash").is_none());
        assert_eq!(json["user_id"], 7);
        assert_eq!(json["updated_at"], "2024-03-01T12:30:00Z");
        assert!(!format!("{session:?}").contains("raw-token"));
    }
}
