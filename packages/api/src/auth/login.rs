//! Credential login.
//!
//! A correct password is not always enough: the account must also have been
//! verified within the last seven days, otherwise the user is sent through
//! the [`OtpChallenge`] first. The recency check runs on this side with the
//! client clock and the server's `verified_date`, so it is a convenience
//! gate rather than a security boundary.

use chrono::{DateTime, Utc};
use store::{KeyValueStore, TokenStore, UserProfile};

use super::otp::OtpChallenge;
use super::{AuthBackend, Credentials};

/// Accounts verified fewer than this many days ago skip the OTP step.
pub const REVERIFY_AFTER_DAYS: i64 = 7;

const LOGIN_FAILED: &str = "Login failed";
const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoginState {
    #[default]
    Idle,
    Submitting,
    /// Session persisted; go home.
    Authenticated,
    OtpRequired(OtpChallenge),
    Failed(String),
}

/// Whole days between `verified_at` and `now`, rounded up.
pub fn verified_days(verified_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let secs = (now - verified_at).num_seconds().abs();
    (secs + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY
}

pub fn is_recently_verified(user: &UserProfile, now: DateTime<Utc>) -> bool {
    user.is_verified
        && user
            .verified_at()
            .is_some_and(|at| verified_days(at, now) < REVERIFY_AFTER_DAYS)
}

/// Submit the login form. The session is persisted only when no OTP step
/// is needed.
pub async fn submit_login<B, K>(
    backend: &B,
    store: &TokenStore<K>,
    credentials: &Credentials,
    now: DateTime<Utc>,
) -> LoginState
where
    B: AuthBackend,
    K: KeyValueStore,
{
    match backend.login(credentials).await {
        Ok(session) if is_recently_verified(&session.user, now) => {
            store.set(&session);
            tracing::info!("login succeeded");
            LoginState::Authenticated
        }
        Ok(session) => {
            tracing::info!("login needs otp verification");
            LoginState::OtpRequired(OtpChallenge::new(session.user))
        }
        Err(e) => {
            tracing::warn!("login failed: {e}");
            LoginState::Failed(e.user_message(LOGIN_FAILED))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::fake::{session, user, FakeBackend};
    use crate::auth::otp::OtpStage;
    use crate::error::{ApiError, GENERIC_FAILURE};
    use chrono::TimeDelta;
    use store::MemoryStore;

    fn credentials() -> Credentials {
        Credentials::new("dewi@example.com", "secret")
    }

    #[test]
    fn test_verified_days_rounds_up() {
        let now = Utc::now();
        assert_eq!(verified_days(now, now), 0);
        assert_eq!(verified_days(now - TimeDelta::hours(1), now), 1);
        assert_eq!(verified_days(now - TimeDelta::days(3), now), 3);
        assert_eq!(
            verified_days(now - TimeDelta::days(6) - TimeDelta::minutes(1), now),
            7
        );
        // A verification date in the future still counts its distance
        assert_eq!(verified_days(now + TimeDelta::days(2), now), 2);
    }

    #[test]
    fn test_recency_rule() {
        let now = Utc::now();
        assert!(is_recently_verified(
            &user(true, Some(now - TimeDelta::days(3))),
            now
        ));
        assert!(!is_recently_verified(
            &user(true, Some(now - TimeDelta::days(10))),
            now
        ));
        assert!(!is_recently_verified(
            &user(false, Some(now - TimeDelta::days(1))),
            now
        ));
        assert!(!is_recently_verified(&user(true, None), now));
    }

    #[tokio::test]
    async fn test_recent_login_is_authenticated() {
        let now = Utc::now();
        let issued = session(user(true, Some(now - TimeDelta::days(3))));
        let backend = FakeBackend::new().with_login(Ok(issued.clone()));
        let store = TokenStore::new(MemoryStore::new());

        let state = submit_login(&backend, &store, &credentials(), now).await;
        assert_eq!(state, LoginState::Authenticated);
        assert_eq!(store.get(), Some(issued));
    }

    #[tokio::test]
    async fn test_stale_login_requires_otp() {
        let now = Utc::now();
        for is_verified in [true, false] {
            let issued = session(user(is_verified, Some(now - TimeDelta::days(10))));
            let backend = FakeBackend::new().with_login(Ok(issued));
            let store = TokenStore::new(MemoryStore::new());

            let state = submit_login(&backend, &store, &credentials(), now).await;
            let LoginState::OtpRequired(challenge) = state else {
                panic!("expected otp, got {state:?}");
            };
            assert_eq!(challenge.stage(), OtpStage::ChoosingMethod);
            assert_eq!(challenge.contact(), "dewi@example.com");
            assert!(store.get().is_none());
        }
    }

    #[tokio::test]
    async fn test_failed_login_messages() {
        let store = TokenStore::new(MemoryStore::new());

        let backend = FakeBackend::new();
        let state = submit_login(&backend, &store, &credentials(), Utc::now()).await;
        assert_eq!(state, LoginState::Failed("Invalid credentials".into()));

        let backend = FakeBackend::new().with_login(Err(ApiError::Rejected {
            status: 500,
            message: None,
        }));
        let state = submit_login(&backend, &store, &credentials(), Utc::now()).await;
        assert_eq!(state, LoginState::Failed("Login failed".into()));

        let backend = FakeBackend::new().with_login(Err(ApiError::Network("offline".into())));
        let state = submit_login(&backend, &store, &credentials(), Utc::now()).await;
        assert_eq!(state, LoginState::Failed(GENERIC_FAILURE.into()));
        assert!(store.get().is_none());
    }

    #[test]
    fn test_credentials_wire_shape() {
        let body = serde_json::to_value(Credentials::new(" 0812 ", "pw")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"emailOrPhone": "0812", "password": "pw"})
        );
    }
}
