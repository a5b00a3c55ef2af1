//! # Browser localStorage backend
//!
//! [`LocalStore`] is the [`KeyValueStore`] used on the **web platform**. It
//! goes through `gloo-storage`, storing raw strings so the keys stay readable
//! from the browser dev tools and compatible with older builds of the client.
//!
//! Errors (storage disabled, quota exceeded) are swallowed: a read failure
//! looks like "no session" and the user is sent back to the login page.

use gloo_storage::{LocalStorage, Storage};
use wasm_bindgen::JsValue;

use crate::session::KeyValueStore;

/// localStorage-backed KeyValueStore for the web platform.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }
}

impl KeyValueStore for LocalStore {
    fn get_item(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Err(e) = LocalStorage::raw().set_item(key, value) {
            log_error(key, e);
        }
    }

    fn remove_all(&self, keys: &[&str]) {
        let storage = LocalStorage::raw();
        for key in keys {
            if let Err(e) = storage.remove_item(key) {
                log_error(key, e);
            }
        }
    }
}

fn log_error(key: &str, e: JsValue) {
    tracing::error!("localStorage error on {key}: {e:?}");
}
