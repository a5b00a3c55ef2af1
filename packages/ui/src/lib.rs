//! This crate contains all shared UI for the workspace.

pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

pub mod geolocation;
pub mod timer;

mod session;
pub use session::{use_session, AppTokenStore, SessionContext, SessionProvider};

mod guard;
pub use guard::{ProtectedRoute, PublicRoute};

mod navbar;
pub use navbar::Navbar;
