//! User preferences
//!
//! Persisted separately from reveal progress.

use serde::{Deserialize, Serialize};

use crate::consts::{EXTRA_SPINS, MAX_EXTRA_SPINS, REVEAL_DELAY_MS};
use crate::persistence::{PersistedStore, StorageKeys};

/// Which set of storage keys progress lives under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum KeyScheme {
    #[default]
    Standard,
    /// Keys used by the first release of the page
    Legacy,
}

impl KeyScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyScheme::Standard => "Standard",
            KeyScheme::Legacy => "Legacy",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard" => Some(KeyScheme::Standard),
            "legacy" => Some(KeyScheme::Legacy),
            _ => None,
        }
    }

    pub fn keys(&self) -> StorageKeys {
        match self {
            KeyScheme::Standard => StorageKeys::STANDARD,
            KeyScheme::Legacy => StorageKeys::LEGACY,
        }
    }
}

/// Page preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Delay between committing a reveal and showing it (ms)
    pub reveal_delay_ms: u32,
    /// Full wheel turns before landing
    pub extra_spins: u32,
    /// Storage keys for progress
    pub key_scheme: KeyScheme,
    /// Skip the reveal delay
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reveal_delay_ms: REVEAL_DELAY_MS,
            extra_spins: EXTRA_SPINS,
            key_scheme: KeyScheme::Standard,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "holiday_heart_spin_settings";

    /// Display delay actually applied (respects reduced_motion)
    pub fn effective_delay_ms(&self) -> u32 {
        if self.reduced_motion {
            0
        } else {
            self.reveal_delay_ms
        }
    }

    /// Extra spins clamped to a sane range
    pub fn effective_extra_spins(&self) -> u32 {
        self.extra_spins.min(MAX_EXTRA_SPINS)
    }

    /// Apply overrides from a page query string such as `?keys=legacy&spins=3`.
    ///
    /// Returns true if anything changed. Unknown or malformed values are ignored.
    pub fn apply_query(&mut self, query: &str) -> bool {
        let query = query.trim_start_matches('?');
        if query.is_empty() {
            return false;
        }
        let overrides: QueryOverrides = match serde_urlencoded::from_str(query) {
            Ok(o) => o,
            Err(e) => {
                log::warn!("Ignoring settings query: {}", e);
                return false;
            }
        };

        let before = self.clone();
        if let Some(name) = overrides.keys {
            match KeyScheme::from_str(&name) {
                Some(scheme) => self.key_scheme = scheme,
                None => log::warn!("Unknown key scheme '{}'", name),
            }
        }
        if let Some(spins) = overrides.spins {
            self.extra_spins = spins;
        }
        if let Some(delay) = overrides.delay {
            self.reveal_delay_ms = delay;
        }
        if let Some(reduced) = overrides.reduced_motion {
            self.reduced_motion = reduced;
        }

        let changed = *self != before;
        if changed {
            log::info!(
                "Settings from query: keys {}, {} spins, {}ms delay",
                self.key_scheme.as_str(),
                self.effective_extra_spins(),
                self.effective_delay_ms()
            );
        }
        changed
    }

    /// Load settings, falling back to defaults
    pub fn load(store: &impl PersistedStore) -> Self {
        if let Some(json) = store.get_item(Self::STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, store: &mut impl PersistedStore) {
        if let Ok(json) = serde_json::to_string(self) {
            store.set_item(Self::STORAGE_KEY, &json);
            log::info!("Settings saved");
        }
    }
}

/// Query-string fields accepted by `Settings::apply_query`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QueryOverrides {
    keys: Option<String>,
    spins: Option<u32>,
    delay: Option<u32>,
    reduced_motion: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_defaults_when_missing_or_corrupt() {
        let mut store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());
        store.set_item(Settings::STORAGE_KEY, "][");
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            reveal_delay_ms: 1500,
            extra_spins: 3,
            key_scheme: KeyScheme::Legacy,
            reduced_motion: true,
        };
        settings.save(&mut store);
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let mut store = MemoryStore::new();
        store.set_item(Settings::STORAGE_KEY, r#"{"key_scheme":"Legacy"}"#);
        let settings = Settings::load(&store);
        assert_eq!(settings.key_scheme, KeyScheme::Legacy);
        assert_eq!(settings.reveal_delay_ms, REVEAL_DELAY_MS);
    }

    #[test]
    fn test_effective_values() {
        let mut settings = Settings::default();
        assert_eq!(settings.effective_delay_ms(), 3000);
        settings.reduced_motion = true;
        assert_eq!(settings.effective_delay_ms(), 0);
        settings.extra_spins = 500;
        assert_eq!(settings.effective_extra_spins(), MAX_EXTRA_SPINS);
    }

    #[test]
    fn test_query_overrides() {
        let mut settings = Settings::default();
        assert!(settings.apply_query("?keys=Legacy&spins=2&delay=500&reduced_motion=true"));
        assert_eq!(settings.key_scheme, KeyScheme::Legacy);
        assert_eq!(settings.extra_spins, 2);
        assert_eq!(settings.reveal_delay_ms, 500);
        assert!(settings.reduced_motion);

        // Same values again: nothing to save
        assert!(!settings.apply_query("keys=legacy&spins=2"));
    }

    #[test]
    fn test_query_ignores_bad_input() {
        let mut settings = Settings::default();
        assert!(!settings.apply_query(""));
        assert!(!settings.apply_query("?"));
        assert!(!settings.apply_query("?keys=sideways"));
        assert!(!settings.apply_query("?spins=lots"));
        assert!(!settings.apply_query("?utm_source=mail"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_query_then_save_round_trip() {
        let mut store = MemoryStore::new();
        let mut settings = Settings::load(&store);
        assert!(settings.apply_query("?keys=legacy"));
        settings.save(&mut store);
        assert_eq!(Settings::load(&store).key_scheme, KeyScheme::Legacy);
    }

    #[test]
    fn test_key_scheme_parse() {
        assert_eq!(KeyScheme::from_str("LEGACY"), Some(KeyScheme::Legacy));
        assert_eq!(KeyScheme::from_str("standard"), Some(KeyScheme::Standard));
        assert_eq!(KeyScheme::from_str("other"), None);
        assert_eq!(KeyScheme::Legacy.keys(), StorageKeys::LEGACY);
        assert_eq!(KeyScheme::Standard.as_str(), "Standard");
    }
}
