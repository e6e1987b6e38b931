//! Durable key-value storage for session persistence.
//!
//! SYSTEM CONTEXT
//! ==============
//! The auth store is the only writer. `BrowserStorage` wraps
//! `window.localStorage` under `hydrate` and behaves as an empty, read-only
//! store elsewhere so server rendering stays deterministic.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Storage key holding the raw access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Minimal string key-value store with `localStorage` semantics.
///
/// Writes are best-effort: failures (quota, disabled storage) are logged by
/// implementations and never surfaced to callers.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// Type-erased storage handle, so one store type can run against the
/// browser or an in-memory map.
pub type SharedStorage = Arc<dyn KeyValueStorage + Send + Sync>;

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Arc<T> {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) {
        (**self).set_item(key, value);
    }

    fn remove_item(&self, key: &str) {
        (**self).remove_item(key);
    }
}

/// `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(any(test, feature = "hydrate"))]
fn storage_unavailable_message(key: &str) -> String {
    format!("localStorage unavailable for {key}")
}

#[cfg(any(test, feature = "hydrate"))]
fn storage_failed_message(op: &str, key: &str) -> String {
    format!("localStorage {op} failed for {key}")
}

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set_item(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = local_storage() else {
                leptos::logging::warn!("{}", storage_unavailable_message(key));
                return;
            };
            if storage.set_item(key, value).is_err() {
                leptos::logging::warn!("{}", storage_failed_message("write", key));
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove_item(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = local_storage() else {
                leptos::logging::warn!("{}", storage_unavailable_message(key));
                return;
            };
            if storage.remove_item(key).is_err() {
                leptos::logging::warn!("{}", storage_failed_message("remove", key));
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// In-memory storage shared between clones.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with one entry.
    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.set_item(key, value);
        storage
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove_item(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}
