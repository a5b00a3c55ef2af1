use api::auth::WatchdogSlot;
use dioxus::prelude::*;
use ui::{Navbar, ProtectedRoute, PublicRoute};

use crate::Route;

/// Signed-in shell. The navbar and the session clock stay mounted across
/// pages; only the guard around the page is keyed by route, so every page
/// visit runs a fresh auth check.
#[component]
pub fn AppLayout() -> Element {
    use_context_provider(WatchdogSlot::new);
    let route = use_route::<Route>();
    rsx! {
        Navbar {}
        main {
            class: "page",
            ProtectedRoute {
                key: "{route}",
                Outlet::<Route> {}
            }
        }
    }
}

/// Pages only a signed-out visitor should see.
#[component]
pub fn PublicLayout() -> Element {
    let route = use_route::<Route>();
    rsx! {
        PublicRoute {
            key: "{route}",
            Outlet::<Route> {}
        }
    }
}
