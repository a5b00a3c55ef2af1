use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::session::KeyValueStore;

/// In-memory KeyValueStore for testing and native builds.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.insert(key.to_string(), value.to_string());
        }
    }

    fn remove_all(&self, keys: &[&str]) {
        // One lock for the whole batch.
        if let Ok(mut items) = self.items.lock() {
            for key in keys {
                items.remove(*key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, ServerTimestamp, Session, UserProfile};
    use crate::session::{TokenStore, REFRESH_TOKEN_KEY, TOKEN_KEY, USER_KEY};

    fn session() -> Session {
        Session {
            token: "tok-1".to_string(),
            refresh_token: "ref-1".to_string(),
            user: UserProfile {
                id: Some("u1".to_string()),
                name: "Sari".to_string(),
                email: "sari@example.com".to_string(),
                phone: Some("62811".to_string()),
                role: Role::Admin,
                is_verified: true,
                verified_date: Some(ServerTimestamp {
                    seconds: 1_720_000_000,
                    nanoseconds: 0,
                }),
            },
        }
    }

    #[test]
    fn test_set_and_get_session() {
        let backend = MemoryStore::new();
        let store = TokenStore::new(backend.clone());

        // Initially empty
        assert!(store.get().is_none());
        assert!(store.token().is_none());

        store.set(&session());

        assert_eq!(backend.len(), 3);
        assert_eq!(store.token().as_deref(), Some("tok-1"));
        assert_eq!(store.get(), Some(session()));
        assert_eq!(
            backend.get_item(REFRESH_TOKEN_KEY).as_deref(),
            Some("ref-1")
        );
    }

    #[test]
    fn test_clear_removes_all_keys() {
        let backend = MemoryStore::new();
        backend.set_item("theme", "dark");
        let store = TokenStore::new(backend.clone());
        store.set(&session());

        store.clear();

        for key in [TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
            assert!(backend.get_item(key).is_none(), "{key} survived clear");
        }
        assert!(store.get().is_none());
        // Unrelated keys are left alone
        assert_eq!(backend.get_item("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_malformed_user_keeps_token() {
        let backend = MemoryStore::new();
        backend.set_item(TOKEN_KEY, "tok-2");
        backend.set_item(USER_KEY, "{not json");
        let store = TokenStore::new(backend);

        assert!(store.user().is_none());
        assert_eq!(store.token().as_deref(), Some("tok-2"));
        assert!(store.get().is_none());
    }

    #[test]
    fn test_empty_token_is_absent() {
        let backend = MemoryStore::new();
        backend.set_item(TOKEN_KEY, "");
        let store = TokenStore::new(backend);
        assert!(store.token().is_none());
    }

    #[test]
    fn test_set_replaces_previous_session() {
        let store = TokenStore::new(MemoryStore::new());
        store.set(&session());

        let mut next = session();
        next.token = "tok-9".to_string();
        next.user.name = "Dewi".to_string();
        store.set(&next);

        assert_eq!(store.token().as_deref(), Some("tok-9"));
        assert_eq!(store.user().map(|u| u.name), Some("Dewi".to_string()));
    }
}
