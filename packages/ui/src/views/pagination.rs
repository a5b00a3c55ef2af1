use dioxus::prelude::*;
use store::listing::visible_pages;

/// Previous/next buttons around a window of at most five page numbers.
/// Pages are 1-based.
#[component]
pub fn Pagination(current: usize, total: usize, on_change: EventHandler<usize>) -> Element {
    if total <= 1 {
        return rsx! {};
    }

    rsx! {
        nav {
            class: "pagination",
            button {
                disabled: current <= 1,
                onclick: move |_| on_change.call(current - 1),
                "Previous"
            }
            for page in visible_pages(current, total) {
                button {
                    key: "{page}",
                    class: if page == current { "page active" } else { "page" },
                    onclick: move |_| on_change.call(page),
                    "{page}"
                }
            }
            button {
                disabled: current >= total,
                onclick: move |_| on_change.call(current + 1),
                "Next"
            }
        }
    }
}
