//! Session context shared by every view.
//!
//! The token store, the API client and the build-time configuration are
//! created once by [`SessionProvider`] and handed out through
//! [`use_session`], so no view touches storage directly.
//!
//! The key/value backend depends on the platform:
//! - **Web** (WASM + `web` feature): browser localStorage via [`store::LocalStore`]
//! - **Anything else**: in-memory [`store::MemoryStore`]

use api::auth::LOGIN_ROUTE;
use api::ApiClient;
use dioxus::prelude::*;
use store::{ClientConfig, TokenStore, UserProfile};

use crate::timer::hard_redirect;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type AppStore = store::LocalStore;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type AppStore = store::MemoryStore;

pub type AppTokenStore = TokenStore<AppStore>;

#[derive(Clone, Debug)]
pub struct SessionContext {
    pub tokens: AppTokenStore,
    pub client: ApiClient,
    pub config: ClientConfig,
}

impl SessionContext {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            tokens: TokenStore::new(AppStore::new()),
            client: ApiClient::new(config.api.clone()),
            config,
        }
    }

    /// The stored token, or an empty string which the backend rejects.
    pub fn token(&self) -> String {
        self.tokens.token().unwrap_or_default()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.tokens.user()
    }

    /// Forget the session and reload the login page.
    pub fn sign_out(&self) {
        tracing::info!("signing out");
        self.tokens.clear();
        hard_redirect(LOGIN_ROUTE);
    }
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
}

/// Wrap the router with this so every view can reach the session.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    use_context_provider(|| {
        let config = ClientConfig::from_build_env();
        tracing::info!(api = %config.api.base_url, "client configured");
        SessionContext::new(config)
    });

    rsx! {
        {children}
    }
}
