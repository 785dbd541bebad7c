//! In-process storage backend.
//!
//! [`InMemoryAuthStorage`] implements every storage trait in this crate over
//! plain maps behind a single async mutex. Each trait call runs in one
//! critical section, which gives it the same atomicity the PostgreSQL backend
//! gets from single statements: a session upsert cannot race another upsert
//! for the same user, and a reset can be consumed at most once.
//!
//! Uniqueness of `user_id` (sessions) and `token_hash` (sessions and resets)
//! is enforced like the database constraints would.

use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;

use crate::AuthResult;
use crate::error::AuthError;
use crate::storage::{NewPasswordReset, PasswordResetStorage, SessionStorage, UserStorage};
use crate::types::{PasswordReset, Session, User, UserId};

#[derive(Default)]
struct State {
    users: HashMap<UserId, User>,
    /// Sessions keyed by owning user.
    sessions: HashMap<UserId, Session>,
    /// token_hash -> user_id
    session_hashes: HashMap<String, UserId>,
    resets: HashMap<i64, PasswordReset>,
    /// token_hash -> reset id
    reset_hashes: HashMap<String, i64>,
    next_session_id: i64,
    next_reset_id: i64,
}

impl State {
    fn remove_reset(&mut self, id: i64) -> Option<PasswordReset> {
        let reset = self.resets.remove(&id)?;
        self.reset_hashes.remove(&reset.token_hash);
        Some(reset)
    }

    fn remove_resets_for_user(&mut self, user_id: UserId) {
        let ids: Vec<i64> = self
            .resets
            .values()
            .filter(|r| r.user_id == user_id)
            .map(|r| r.id)
            .collect();
        for id in ids {
            self.remove_reset(id);
        }
    }
}

/// In-memory implementation of [`UserStorage`], [`SessionStorage`] and
/// [`PasswordResetStorage`].
#[derive(Default)]
pub struct InMemoryAuthStorage {
    state: Mutex<State>,
}

impl InMemoryAuthStorage {
    /// Creates an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage pre-populated with user records.
    #[must_use]
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let state = State {
            users: users.into_iter().map(|u| (u.id, u)).collect(),
            ..State::default()
        };
        Self {
            state: Mutex::new(state),
        }
    }

    /// Inserts or replaces a user record.
    pub async fn insert_user(&self, user: User) {
        self.state.lock().await.users.insert(user.id, user);
    }

    /// Removes a user record, leaving any sessions or resets dangling.
    pub async fn remove_user(&self, id: UserId) -> Option<User> {
        self.state.lock().await.users.remove(&id)
    }

    /// Number of stored sessions.
    pub async fn session_count(&self) -> usize {
        self.state.lock().await.sessions.len()
    }

    /// Number of stored resets, expired ones included.
    pub async fn reset_count(&self) -> usize {
        self.state.lock().await.resets.len()
    }

    /// Returns the session of a user, if any.
    pub async fn session_for_user(&self, user_id: UserId) -> Option<Session> {
        self.state.lock().await.sessions.get(&user_id).cloned()
    }
}

#[async_trait]
impl UserStorage for InMemoryAuthStorage {
    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        Ok(self.state.lock().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        Ok(self
            .state
            .lock()
            .await
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}

#[async_trait]
impl SessionStorage for InMemoryAuthStorage {
    async fn upsert(&self, user_id: UserId, token_hash: &str) -> AuthResult<Session> {
        let mut state = self.state.lock().await;

        if let Some(owner) = state.session_hashes.get(token_hash) {
            if *owner != user_id {
                return Err(AuthError::storage("session.upsert", "duplicate token hash"));
            }
        }

        let now = OffsetDateTime::now_utc();
        let session = match state.sessions.get(&user_id).cloned() {
            Some(mut existing) => {
                state.session_hashes.remove(&existing.token_hash);
                existing.token_hash = token_hash.to_string();
                existing.updated_at = now;
                existing
            }
            None => {
                state.next_session_id += 1;
                Session {
                    id: state.next_session_id,
                    user_id,
                    token: None,
                    token_hash: token_hash.to_string(),
                    created_at: now,
                    updated_at: now,
                }
            }
        };

        state
            .session_hashes
            .insert(session.token_hash.clone(), user_id);
        state.sessions.insert(user_id, session.clone());
        Ok(session)
    }

    async fn find_user_by_token_hash(&self, token_hash: &str) -> AuthResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state
            .session_hashes
            .get(token_hash)
            .and_then(|user_id| state.users.get(user_id))
            .cloned())
    }

    async fn delete_by_token_hash(&self, token_hash: &str) -> AuthResult<bool> {
        let mut state = self.state.lock().await;
        match state.session_hashes.remove(token_hash) {
            Some(user_id) => {
                state.sessions.remove(&user_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_user(&self, user_id: UserId) -> AuthResult<bool> {
        let mut state = self.state.lock().await;
        match state.sessions.remove(&user_id) {
            Some(session) => {
                state.session_hashes.remove(&session.token_hash);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl PasswordResetStorage for InMemoryAuthStorage {
    async fn create(&self, reset: &NewPasswordReset, supersede: bool) -> AuthResult<PasswordReset> {
        let mut state = self.state.lock().await;

        if state.reset_hashes.contains_key(&reset.token_hash) {
            return Err(AuthError::storage("reset.create", "duplicate token hash"));
        }

        if supersede {
            state.remove_resets_for_user(reset.user_id);
        }

        state.next_reset_id += 1;
        let stored = PasswordReset {
            id: state.next_reset_id,
            user_id: reset.user_id,
            token: None,
            token_hash: reset.token_hash.clone(),
            expires_at: reset.expires_at,
            created_at: reset.created_at,
        };
        state
            .reset_hashes
            .insert(stored.token_hash.clone(), stored.id);
        state.resets.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn consume(
        &self,
        token_hash: &str,
        now: OffsetDateTime,
    ) -> AuthResult<Option<PasswordReset>> {
        let mut state = self.state.lock().await;

        let Some(id) = state.reset_hashes.get(token_hash).copied() else {
            return Ok(None);
        };
        let expired = state
            .resets
            .get(&id)
            .is_none_or(|reset| reset.is_expired_at(now));
        if expired {
            return Ok(None);
        }

        let consumed = state.remove_reset(id);
        if let Some(ref reset) = consumed {
            state.remove_resets_for_user(reset.user_id);
        }
        Ok(consumed)
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> AuthResult<Option<PasswordReset>> {
        let state = self.state.lock().await;
        Ok(state
            .reset_hashes
            .get(token_hash)
            .and_then(|id| state.resets.get(id))
            .cloned())
    }

    async fn delete_expired(&self, now: OffsetDateTime) -> AuthResult<u64> {
        let mut state = self.state.lock().await;
        let expired: Vec<i64> = state
            .resets
            .values()
            .filter(|r| r.is_expired_at(now))
            .map(|r| r.id)
            .collect();
        for id in &expired {
            state.remove_reset(*id);
        }
        Ok(expired.len() as u64)
    }
}
