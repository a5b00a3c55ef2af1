use dioxus::prelude::*;

/// Spinner shown while a guard or a page is waiting on the backend.
#[component]
pub fn Loading() -> Element {
    rsx! {
        div {
            class: "loading",
            div { class: "spinner" }
        }
    }
}
