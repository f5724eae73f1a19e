//! Frame bridge request handling on behalf of the embedded app in the active window.

use desktop_app_contract::{
    handle_bridge_request, is_bridge_message, parse_bridge_request, BridgeResponse,
    EmbeddedAppInfo,
};
use leptos::logging;
use platform_host::PrefsStore;
use serde_json::Value;

pub(super) fn respond(
    prefs: &dyn PrefsStore,
    app: &EmbeddedAppInfo,
    message: &Value,
) -> Option<BridgeResponse> {
    if !is_bridge_message(message) {
        return None;
    }
    match parse_bridge_request(message) {
        Ok(request) => Some(handle_bridge_request(app, request, prefs)),
        Err(err) => {
            logging::warn!("ignoring frame message from `{}`: {err}", app.app_id);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use platform_host::MemoryPrefsStore;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn game() -> EmbeddedAppInfo {
        EmbeddedAppInfo {
            app_id: "game-1".into(),
            name: "Game".into(),
            url: "https://game.example".into(),
        }
    }

    #[test]
    fn save_then_load_round_trips_with_request_ids() {
        let store = MemoryPrefsStore::default();
        let saved = respond(
            &store,
            &game(),
            &json!({"type": "SAVE", "requestId": 7, "key": "score", "value": {"best": 12}}),
        );
        assert_eq!(
            serde_json::to_value(saved).expect("json"),
            json!({"type": "SAVE_ACK", "requestId": 7, "key": "score", "success": true})
        );
        let loaded = respond(
            &store,
            &game(),
            &json!({"type": "LOAD", "requestId": "r2", "key": "score"}),
        );
        assert_eq!(
            serde_json::to_value(loaded).expect("json"),
            json!({"type": "LOAD_RESPONSE", "requestId": "r2", "key": "score", "value": {"best": 12}})
        );
    }

    #[test]
    fn unrelated_and_response_messages_are_ignored() {
        let store = MemoryPrefsStore::default();
        assert_eq!(respond(&store, &game(), &json!({"hello": "world"})), None);
        assert_eq!(respond(&store, &game(), &json!("READY")), None);
        assert_eq!(
            respond(&store, &game(), &json!({"type": "SAVE_ACK", "key": "k", "success": true})),
            None
        );
        assert!(store.snapshot().is_empty());
    }
}
