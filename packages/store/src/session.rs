//! # Token store: the persisted session
//!
//! [`TokenStore`] is the only place the client reads or writes session
//! credentials. It sits on top of a [`KeyValueStore`] backend (browser
//! `localStorage` on the web, [`crate::MemoryStore`] natively and in tests)
//! and keeps three keys:
//!
//! | Key | Value |
//! |-----|-------|
//! | `token` | raw auth token, sent as the `authorization` header |
//! | `refreshToken` | refresh token from the last login |
//! | `user` | [`UserProfile`] serialised as JSON |
//!
//! Nothing here enforces expiry. A stale token is only discovered by the next
//! call to the backend's check endpoint.
//!
//! A `user` value that fails to parse is reported as "no user" by
//! [`TokenStore::user`] but does not hide the token: [`TokenStore::token`]
//! looks at the `token` key alone.

use crate::models::{Session, UserProfile};

pub const TOKEN_KEY: &str = "token";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_KEY: &str = "user";

/// Keys owned by the token store, in the order they are written.
pub const SESSION_KEYS: [&str; 3] = [TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY];

/// String key/value persistence.
///
/// `remove_all` must drop every given key before returning, so callers never
/// observe a half-cleared session.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_all(&self, keys: &[&str]);
}

/// Session credentials on top of a [`KeyValueStore`].
#[derive(Clone, Debug, Default)]
pub struct TokenStore<K: KeyValueStore> {
    backend: K,
}

impl<K: KeyValueStore> TokenStore<K> {
    pub fn new(backend: K) -> Self {
        Self { backend }
    }

    /// Persist a freshly issued session, replacing whatever was stored.
    pub fn set(&self, session: &Session) {
        // A profile always serialises; fall back to an empty object rather
        // than leaving the previous user behind.
        let user = serde_json::to_string(&session.user).unwrap_or_else(|_| "{}".to_string());
        self.backend.set_item(TOKEN_KEY, &session.token);
        self.backend.set_item(REFRESH_TOKEN_KEY, &session.refresh_token);
        self.backend.set_item(USER_KEY, &user);
    }

    /// The full session, if a token and a readable profile are both present.
    pub fn get(&self) -> Option<Session> {
        let token = self.token()?;
        let user = self.user()?;
        Some(Session {
            token,
            refresh_token: self.backend.get_item(REFRESH_TOKEN_KEY).unwrap_or_default(),
            user,
        })
    }

    /// The stored auth token. Empty strings count as absent.
    pub fn token(&self) -> Option<String> {
        self.backend
            .get_item(TOKEN_KEY)
            .filter(|token| !token.is_empty())
    }

    /// The stored profile, or `None` when missing or malformed.
    pub fn user(&self) -> Option<UserProfile> {
        let raw = self.backend.get_item(USER_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    /// Erase the whole session.
    pub fn clear(&self) {
        self.backend.remove_all(&SESSION_KEYS);
    }
}
