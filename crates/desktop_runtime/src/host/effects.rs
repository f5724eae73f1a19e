//! Runtime-effect dispatch for the desktop host boundary.

use leptos::logging;

use crate::{
    host::{host_ui, DesktopHostContext},
    model::DesktopState,
    persistence,
    reducer::RuntimeEffect,
};

pub(super) fn run_runtime_effect(
    host: &DesktopHostContext,
    state: &DesktopState,
    effect: RuntimeEffect,
) {
    match effect {
        RuntimeEffect::Alert(message) => host_ui::alert(&message),
        effect => {
            if let Err(err) = persistence::persist_effect(host.prefs.as_ref(), state, &effect) {
                logging::warn!("{effect:?} failed, keeping in-memory state: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use platform_host::{MemoryPrefsStore, PrefsStore, CLOCK_KEY, DOCK_KEY};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::DockPosition;

    struct FullStore;

    impl PrefsStore for FullStore {
        fn load_pref(&self, _key: &str) -> Result<Option<String>, String> {
            Ok(None)
        }

        fn save_pref(&self, _key: &str, _raw_json: &str) -> Result<(), String> {
            Err("QuotaExceededError".to_string())
        }

        fn delete_pref(&self, _key: &str) -> Result<(), String> {
            Ok(())
        }
    }

    #[test]
    fn persistence_effects_write_only_their_own_key() {
        let store = MemoryPrefsStore::default();
        let host = DesktopHostContext::new(Rc::new(store.clone()), "test");
        let mut state = DesktopState::default();
        state.dock = DockPosition { x: 40, y: 50 };

        host.run_runtime_effect(&state, RuntimeEffect::PersistDock);
        let stored = store.snapshot();
        assert_eq!(stored.len(), 1);
        assert_eq!(
            stored.get(DOCK_KEY).map(String::as_str),
            Some(r#"{"x":40,"y":50}"#)
        );
        assert!(!stored.contains_key(CLOCK_KEY));
    }

    #[test]
    fn failed_writes_keep_in_memory_state() {
        let host = DesktopHostContext::new(Rc::new(FullStore), "test");
        let state = DesktopState::default();
        let before = state.clone();
        host.run_runtime_effect(&state, RuntimeEffect::PersistShortcuts);
        assert_eq!(state, before);
    }
}
