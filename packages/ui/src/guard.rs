//! Route guards.
//!
//! Each guard runs exactly one auth check when it mounts. Remounting it
//! (navigating to another guarded page) runs a fresh check; nothing is
//! cached between mounts.

use api::auth::{verify_session, GuardDecision, GuardKind, GuardState};
use dioxus::prelude::*;

use crate::session::use_session;
use crate::views::Loading;

/// Renders `children` only for a signed-in user; everyone else goes to
/// the login page.
#[component]
pub fn ProtectedRoute(children: Element) -> Element {
    rsx! {
        Guard { kind: GuardKind::Protected, {children} }
    }
}

/// Renders `children` only for a signed-out user; a signed-in user goes
/// home.
#[component]
pub fn PublicRoute(children: Element) -> Element {
    rsx! {
        Guard { kind: GuardKind::Public, {children} }
    }
}

#[component]
fn Guard(kind: GuardKind, children: Element) -> Element {
    let session = use_session();
    let mut state = use_signal(GuardState::default);
    let nav = use_navigator();

    use_hook(move || {
        spawn(async move {
            let authenticated = verify_session(&session.client, &session.tokens).await;
            state.set(authenticated.into());
        })
    });

    let decision = kind.decide(state());
    use_effect(move || {
        if let GuardDecision::Redirect(path) = kind.decide(state()) {
            nav.replace(path);
        }
    });

    match decision {
        GuardDecision::Render => rsx! {
            {children}
        },
        GuardDecision::Loading | GuardDecision::Redirect(_) => rsx! {
            Loading {}
        },
    }
}
