//! What a guarded route renders while, and after, the auth check runs.

pub const LOGIN_ROUTE: &str = "/login";
pub const HOME_ROUTE: &str = "/";

/// Result of the mount-time auth check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GuardState {
    #[default]
    Pending,
    Authenticated,
    Unauthenticated,
}

impl From<bool> for GuardState {
    fn from(authenticated: bool) -> Self {
        if authenticated {
            GuardState::Authenticated
        } else {
            GuardState::Unauthenticated
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardKind {
    /// Only signed-in users get through.
    Protected,
    /// Only signed-out users get through (login, register, reset).
    Public,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Loading,
    Render,
    Redirect(&'static str),
}

impl GuardKind {
    pub fn decide(self, state: GuardState) -> GuardDecision {
        match (self, state) {
            (_, GuardState::Pending) => GuardDecision::Loading,
            (GuardKind::Protected, GuardState::Authenticated) => GuardDecision::Render,
            (GuardKind::Protected, GuardState::Unauthenticated) => {
                GuardDecision::Redirect(LOGIN_ROUTE)
            }
            (GuardKind::Public, GuardState::Authenticated) => GuardDecision::Redirect(HOME_ROUTE),
            (GuardKind::Public, GuardState::Unauthenticated) => GuardDecision::Render,
        }
    }
}
