//! Lightweight preference storage contracts and adapters.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

/// Host service for lightweight preference values (JSON stored as text per key).
///
/// Calls complete on the caller's thread; there is no deferred write queue.
pub trait PrefsStore {
    /// Loads a raw JSON string for a preference key.
    fn load_pref(&self, key: &str) -> Result<Option<String>, String>;

    /// Saves a raw JSON string for a preference key.
    fn save_pref(&self, key: &str, raw_json: &str) -> Result<(), String>;

    /// Deletes a preference key.
    fn delete_pref(&self, key: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op preference store for unsupported targets and baseline tests.
pub struct NoopPrefsStore;

impl PrefsStore for NoopPrefsStore {
    fn load_pref(&self, _key: &str) -> Result<Option<String>, String> {
        Ok(None)
    }

    fn save_pref(&self, _key: &str, _raw_json: &str) -> Result<(), String> {
        Ok(())
    }

    fn delete_pref(&self, _key: &str) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory preference store keyed by string.
///
/// Clones share the same backing map.
pub struct MemoryPrefsStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryPrefsStore {
    /// Returns a copy of every stored key/value pair.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.inner.borrow().clone()
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn load_pref(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn save_pref(&self, key: &str, raw_json: &str) -> Result<(), String> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), raw_json.to_string());
        Ok(())
    }

    fn delete_pref(&self, key: &str) -> Result<(), String> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}

/// Loads and deserializes a typed preference value through a [`PrefsStore`] implementation.
///
/// # Errors
///
/// Returns an error when the store or JSON deserialization fails.
pub fn load_pref_with<S: PrefsStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, String> {
    let Some(raw) = store.load_pref(key)? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).map_err(|e| e.to_string())?;
    Ok(Some(value))
}

/// Serializes and saves a typed preference value through a [`PrefsStore`] implementation.
///
/// # Errors
///
/// Returns an error when serialization or store save fails.
pub fn save_pref_with<S: PrefsStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
    store.save_pref(key, &raw)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct DockThing {
        x: i32,
        y: i32,
    }

    #[test]
    fn memory_prefs_store_round_trip_and_delete() {
        let store = MemoryPrefsStore::default();
        let store_obj: &dyn PrefsStore = &store;

        store_obj.save_pref("pref.key", "{\"k\":1}").expect("save");
        assert_eq!(
            store_obj.load_pref("pref.key").expect("load"),
            Some("{\"k\":1}".to_string())
        );
        store_obj.delete_pref("pref.key").expect("delete");
        assert_eq!(store_obj.load_pref("pref.key").expect("load"), None);
    }

    #[test]
    fn memory_prefs_store_clones_share_backing_map() {
        let store = MemoryPrefsStore::default();
        let other = store.clone();
        store.save_pref("shared", "1").expect("save");
        assert_eq!(other.load_pref("shared").expect("load"), Some("1".into()));
        assert_eq!(other.snapshot().len(), 1);
    }

    #[test]
    fn typed_pref_helpers_round_trip() {
        let store = MemoryPrefsStore::default();
        save_pref_with(&store, "dock", &DockThing { x: 4, y: 9 }).expect("save typed pref");

        let loaded: Option<DockThing> = load_pref_with(&store, "dock").expect("load typed pref");
        assert_eq!(loaded, Some(DockThing { x: 4, y: 9 }));
    }

    #[test]
    fn typed_load_reports_corrupt_json_as_error() {
        let store = MemoryPrefsStore::default();
        store.save_pref("dock", "{not json").expect("save");
        let loaded: Result<Option<DockThing>, String> = load_pref_with(&store, "dock");
        assert!(loaded.is_err());
    }

    #[test]
    fn noop_prefs_store_is_empty_and_successful() {
        let store = NoopPrefsStore;
        let store_obj: &dyn PrefsStore = &store;
        assert_eq!(store_obj.load_pref("k").expect("load"), None);
        store_obj.save_pref("k", "{}").expect("save");
        store_obj.delete_pref("k").expect("delete");
    }
}
