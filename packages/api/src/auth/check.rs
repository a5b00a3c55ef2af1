//! Server-side validation of the stored session token.

use store::{KeyValueStore, TokenStore};

use super::AuthBackend;

/// Ask the server whether the stored token is still good.
///
/// Without a token this resolves to `false` and nothing is sent. Any
/// failure, whether a rejection or a transport error, clears the store so
/// the next guard sees a signed-out client.
pub async fn verify_session<B, K>(backend: &B, store: &TokenStore<K>) -> bool
where
    B: AuthBackend,
    K: KeyValueStore,
{
    let Some(token) = store.token() else {
        tracing::debug!("no stored token, skipping auth check");
        return false;
    };

    match backend.check_token(&token).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("auth check failed, clearing session: {e}");
            store.clear();
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::fake::{session, user, FakeBackend};
    use crate::error::ApiError;
    use store::{MemoryStore, Session};

    #[tokio::test]
    async fn test_no_token_skips_network() {
        let backend = FakeBackend::new();
        let store = TokenStore::new(MemoryStore::new());

        assert!(!verify_session(&backend, &store).await);
        assert_eq!(backend.check_calls.get(), 0);
    }

    #[tokio::test]
    async fn test_valid_token_keeps_store() {
        let backend = FakeBackend::new();
        let store = TokenStore::new(MemoryStore::new());
        store.set(&session(user(true, None)));

        assert!(verify_session(&backend, &store).await);
        assert_eq!(backend.check_calls.get(), 1);
        assert!(store.get().is_some());
    }

    #[tokio::test]
    async fn test_rejected_token_clears_store() {
        let backend = FakeBackend::new();
        let memory = MemoryStore::new();
        let store = TokenStore::new(memory.clone());
        let mut stale = session(user(true, None));
        stale.token = "expired".into();
        store.set(&stale);

        assert!(!verify_session(&backend, &store).await);
        assert!(store.token().is_none());
        assert!(store.user().is_none());
        assert!(memory.is_empty());
    }

    struct Offline;

    impl AuthBackend for Offline {
        async fn check_token(&self, _token: &str) -> Result<(), ApiError> {
            Err(ApiError::Network("offline".into()))
        }
        async fn login(
            &self,
            _credentials: &crate::auth::Credentials,
        ) -> Result<Session, ApiError> {
            Err(ApiError::Network("offline".into()))
        }
        async fn send_otp(&self, _contact: &str) -> Result<(), ApiError> {
            Err(ApiError::Network("offline".into()))
        }
        async fn verify_otp(&self, _contact: &str, _otp: &str) -> Result<Session, ApiError> {
            Err(ApiError::Network("offline".into()))
        }
    }

    #[tokio::test]
    async fn test_transport_error_clears_store() {
        let store = TokenStore::new(MemoryStore::new());
        store.set(&session(user(true, None)));

        assert!(!verify_session(&Offline, &store).await);
        assert!(store.get().is_none());
    }

    #[tokio::test]
    async fn test_each_check_hits_the_server() {
        let backend = FakeBackend::new();
        let store = TokenStore::new(MemoryStore::new());
        store.set(&session(user(true, None)));

        assert!(verify_session(&backend, &store).await);
        assert!(verify_session(&backend, &store).await);
        assert_eq!(backend.check_calls.get(), 2);
    }
}
