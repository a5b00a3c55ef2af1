//! Top bar of the signed-in shell: greeting, navigation menu, sign-out and
//! the session timeout prompt.

use api::auth::watchdog::{WatchdogSlot, WATCHDOG_POLL};
use api::auth::LOGIN_ROUTE;
use chrono::Utc;
use dioxus::prelude::*;

use crate::session::use_session;
use crate::timer::use_interval;
use crate::views::ModalOverlay;

const ADMIN_LINKS: [(&str, &str); 5] = [
    ("Dashboard", "/"),
    ("Manage User", "/users"),
    ("Manage Customer", "/manageCustomer"),
    ("Add Customer", "/addCustomer"),
    ("Bulk Add Customer", "/bulkAddCustomer"),
];

#[component]
pub fn Navbar() -> Element {
    let session = use_session();
    let user = session.user();
    let greeting = user
        .as_ref()
        .map(|u| u.name.trim())
        .filter(|name| !name.is_empty())
        .unwrap_or("there")
        .to_string();
    let is_admin = user.as_ref().is_some_and(|u| u.is_admin());

    let mut menu_open = use_signal(|| false);

    // The shell owns the clock so it survives this bar being remounted
    let slot = try_use_context::<WatchdogSlot>().unwrap_or_default();
    let watchdog = use_hook(move || slot.start_or_resume(Utc::now()));
    let mut expired = use_signal(|| watchdog.is_expired(Utc::now()));
    use_interval(WATCHDOG_POLL, move || {
        if !expired() && watchdog.is_expired(Utc::now()) {
            tracing::info!("session older than the client timeout");
            expired.set(true);
        }
    });

    let sign_out = move |_| session.sign_out();

    rsx! {
        header {
            class: "navbar",
            Link { to: "/", class: "brand", "CekSekitarMu" }
            div {
                class: "navbar-user",
                span { class: "greeting", "Hi, {greeting}" }
                button {
                    class: "menu-toggle",
                    aria_expanded: "{menu_open}",
                    onclick: move |_| menu_open.toggle(),
                    "Menu"
                }
                if menu_open() {
                    nav {
                        class: "menu",
                        onclick: move |_| menu_open.set(false),
                        if is_admin {
                            for (label, href) in ADMIN_LINKS {
                                Link { key: "{href}", to: href, class: "menu-item", "{label}" }
                            }
                        }
                        button {
                            class: "menu-item",
                            onclick: sign_out,
                            "Sign out"
                        }
                    }
                }
            }
        }

        if expired() {
            ModalOverlay {
                div {
                    class: "modal-body",
                    h3 { "Session expired" }
                    p { "Your session has expired. Please log in again to continue." }
                    Link { class: "btn primary", to: LOGIN_ROUTE, "Relogin" }
                }
            }
        }
    }
}
