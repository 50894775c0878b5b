//! Key-value persistence
//!
//! Features:
//! - `PersistedStore` trait over string keys and string values
//! - In-memory store for tests and the native build
//! - LocalStorage store on web
//! - JSON list helpers that fall back to empty on missing or corrupt data

#[cfg(target_arch = "wasm32")]
pub mod local;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use std::collections::HashMap;

/// Durable string storage (last write wins)
pub trait PersistedStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str);
}

impl<S: PersistedStore + ?Sized> PersistedStore for &mut S {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) {
        (**self).set_item(key, value)
    }
}

/// HashMap-backed store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistedStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }
}

/// Names of the persisted entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageKeys {
    /// Calendar-day string of the last successful reveal
    pub last_reveal_date: &'static str,
    /// JSON array of answered prompts
    pub answered: &'static str,
    /// JSON array of saved memories
    pub memories: &'static str,
}

impl StorageKeys {
    pub const STANDARD: StorageKeys = StorageKeys {
        last_reveal_date: "last_spin_date",
        answered: "answered_questions",
        memories: "saved_memories",
    };

    /// Keys written by the first release of the page
    pub const LEGACY: StorageKeys = StorageKeys {
        last_reveal_date: "holiday_heart_spin_last_spin",
        answered: "holiday_answered_questions",
        memories: "holiday_saved_memories",
    };
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Read a JSON string list; absent or unreadable entries load as empty
pub fn load_list(store: &impl PersistedStore, key: &str) -> Vec<String> {
    let Some(json) = store.get_item(key) else {
        log::debug!("No entry for '{}', starting empty", key);
        return Vec::new();
    };
    match serde_json::from_str::<Option<Vec<String>>>(&json) {
        Ok(list) => list.unwrap_or_default(),
        Err(e) => {
            log::warn!("Discarding unreadable '{}': {}", key, e);
            Vec::new()
        }
    }
}

/// Write a string list as JSON
pub fn save_list(store: &mut impl PersistedStore, key: &str, list: &[String]) {
    match serde_json::to_string(list) {
        Ok(json) => store.set_item(key, &json),
        Err(e) => log::warn!("Failed to serialize '{}': {}", key, e),
    }
}
