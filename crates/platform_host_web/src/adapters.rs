use platform_host::{MemoryPrefsStore, PrefsStore};

use crate::WebPrefsStore;

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Compile-time selected host strategy for `platform_host_web` adapters.
pub enum HostStrategy {
    /// `localStorage`-backed adapters.
    Browser,
    /// In-memory adapters that forget everything on reload (demos and browser e2e runs).
    Ephemeral,
}

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "ephemeral-prefs")]
    {
        HostStrategy::Ephemeral
    }

    #[cfg(not(feature = "ephemeral-prefs"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    match selected_host_strategy() {
        HostStrategy::Browser => "browser",
        HostStrategy::Ephemeral => "ephemeral",
    }
}

/// Adapter enum that erases the concrete prefs backend behind [`PrefsStore`].
#[derive(Debug, Clone)]
pub enum PrefsStoreAdapter {
    /// Browser `localStorage` persistence.
    Browser(WebPrefsStore),
    /// Process-local persistence.
    Ephemeral(MemoryPrefsStore),
}

impl PrefsStore for PrefsStoreAdapter {
    fn load_pref(&self, key: &str) -> Result<Option<String>, String> {
        match self {
            Self::Browser(store) => store.load_pref(key),
            Self::Ephemeral(store) => store.load_pref(key),
        }
    }

    fn save_pref(&self, key: &str, raw_json: &str) -> Result<(), String> {
        match self {
            Self::Browser(store) => store.save_pref(key, raw_json),
            Self::Ephemeral(store) => store.save_pref(key, raw_json),
        }
    }

    fn delete_pref(&self, key: &str) -> Result<(), String> {
        match self {
            Self::Browser(store) => store.delete_pref(key),
            Self::Ephemeral(store) => store.delete_pref(key),
        }
    }
}

/// Builds the prefs store for the selected host strategy.
pub fn prefs_store() -> PrefsStoreAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => PrefsStoreAdapter::Browser(WebPrefsStore),
        HostStrategy::Ephemeral => PrefsStoreAdapter::Ephemeral(MemoryPrefsStore::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_build_selects_browser_strategy() {
        #[cfg(not(feature = "ephemeral-prefs"))]
        {
            assert_eq!(selected_host_strategy(), HostStrategy::Browser);
            assert_eq!(host_strategy_name(), "browser");
            assert!(matches!(prefs_store(), PrefsStoreAdapter::Browser(_)));
        }
    }

    #[test]
    fn ephemeral_adapter_round_trips() {
        let store = PrefsStoreAdapter::Ephemeral(MemoryPrefsStore::default());
        store.save_pref("k", "[1]").expect("save");
        assert_eq!(store.load_pref("k").expect("load"), Some("[1]".to_string()));
        store.delete_pref("k").expect("delete");
        assert_eq!(store.load_pref("k").expect("load"), None);
    }
}
