//! Timers tied to component lifetime, plus full-page navigation.

use std::time::Duration;

use dioxus::prelude::*;

/// Sleep on whichever timer the platform has.
pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Call `tick` every `period` for as long as the calling component is
/// mounted. The task is started once on mount and cancelled on unmount.
pub fn use_interval(period: Duration, mut tick: impl FnMut() + 'static) {
    let task = use_hook(move || {
        spawn(async move {
            loop {
                sleep(period).await;
                tick();
            }
        })
    });
    use_drop(move || task.cancel());
}

/// Leave the SPA and load `path` from scratch, dropping all in-memory state.
pub fn hard_redirect(path: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(path) {
                tracing::error!("Failed to navigate to {path}: {e:?}");
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::warn!("hard redirect to {path} is only supported in the browser");
}
