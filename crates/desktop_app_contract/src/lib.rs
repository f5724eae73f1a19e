//! Shared contract between the desktop shell and external pages embedded in its frame window.
//!
//! Embedded pages talk to the shell through structured `postMessage` payloads carrying a `type`
//! tag from a fixed set. Requests may carry a `requestId`, which is echoed verbatim in the
//! matching response. Storage is namespaced per embedded app id, so apps cannot read each
//! other's keys.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use platform_host::{app_data_key, PrefsStore};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Every `type` tag the bridge understands, requests and responses alike.
pub const BRIDGE_MESSAGE_TYPES: [&str; 7] = [
    "READY",
    "SAVE",
    "SAVE_ACK",
    "LOAD",
    "LOAD_RESPONSE",
    "GET_INFO",
    "INFO_RESPONSE",
];

/// Identity of the embedded app currently hosted in the frame window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedAppInfo {
    /// Desktop item id of the shortcut that opened the frame.
    pub app_id: String,
    /// Display name.
    pub name: String,
    /// URL loaded in the frame.
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
/// Requests an embedded page may send to the shell.
pub enum BridgeRequest {
    /// Store `value` under the app-private `key`.
    Save {
        /// Correlation id echoed in the acknowledgement.
        #[serde(rename = "requestId", default, skip_serializing_if = "Option::is_none")]
        request_id: Option<Value>,
        /// App-private key.
        key: String,
        /// Arbitrary JSON value.
        value: Value,
    },
    /// Read the value stored under the app-private `key`.
    Load {
        /// Correlation id echoed in the response.
        #[serde(rename = "requestId", default, skip_serializing_if = "Option::is_none")]
        request_id: Option<Value>,
        /// App-private key.
        key: String,
    },
    /// Ask the shell who the embedded app is.
    GetInfo {
        /// Correlation id echoed in the response.
        #[serde(rename = "requestId", default, skip_serializing_if = "Option::is_none")]
        request_id: Option<Value>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
/// Messages the shell sends to an embedded page.
pub enum BridgeResponse {
    /// Handshake sent once after the frame finishes loading.
    Ready {
        /// Embedded app id.
        #[serde(rename = "appId")]
        app_id: String,
    },
    /// Acknowledges a [`BridgeRequest::Save`].
    SaveAck {
        /// Echoed correlation id.
        #[serde(rename = "requestId", default, skip_serializing_if = "Option::is_none")]
        request_id: Option<Value>,
        /// Key that was written.
        key: String,
        /// Whether the write reached storage.
        success: bool,
    },
    /// Answers a [`BridgeRequest::Load`]; `value` is `null` when nothing is stored.
    LoadResponse {
        /// Echoed correlation id.
        #[serde(rename = "requestId", default, skip_serializing_if = "Option::is_none")]
        request_id: Option<Value>,
        /// Key that was read.
        key: String,
        /// Stored value or `null`.
        value: Value,
    },
    /// Answers a [`BridgeRequest::GetInfo`].
    InfoResponse {
        /// Echoed correlation id.
        #[serde(rename = "requestId", default, skip_serializing_if = "Option::is_none")]
        request_id: Option<Value>,
        /// Embedded app id.
        #[serde(rename = "appId")]
        app_id: String,
        /// Display name.
        name: String,
        /// Frame URL.
        url: String,
    },
}

/// Returns `true` when `message` is an object whose `type` tag belongs to the bridge protocol.
///
/// Pages and browser extensions post unrelated messages to every window; those are filtered out
/// before parsing.
pub fn is_bridge_message(message: &Value) -> bool {
    message
        .get("type")
        .and_then(Value::as_str)
        .is_some_and(|tag| BRIDGE_MESSAGE_TYPES.contains(&tag))
}

/// Parses an inbound request.
///
/// # Errors
///
/// Returns an error for payloads that are not bridge requests, including response tags echoed
/// back by a confused page and requests missing required fields.
pub fn parse_bridge_request(message: &Value) -> Result<BridgeRequest, String> {
    if !is_bridge_message(message) {
        return Err("not a bridge message".to_string());
    }
    BridgeRequest::deserialize(message).map_err(|err| format!("invalid bridge request: {err}"))
}

/// The `READY` handshake for `app`.
pub fn ready_message(app: &EmbeddedAppInfo) -> BridgeResponse {
    BridgeResponse::Ready {
        app_id: app.app_id.clone(),
    }
}

/// Executes `request` on behalf of `app` against the app-namespaced region of `store`.
///
/// Storage failures never escape: a failed save is acknowledged with `success: false` and a
/// failed or corrupt load answers `null`.
pub fn handle_bridge_request<S: PrefsStore + ?Sized>(
    app: &EmbeddedAppInfo,
    request: BridgeRequest,
    store: &S,
) -> BridgeResponse {
    match request {
        BridgeRequest::Save {
            request_id,
            key,
            value,
        } => {
            let storage_key = app_data_key(&app.app_id, &key);
            let success = serde_json::to_string(&value)
                .map_err(|err| err.to_string())
                .and_then(|raw| store.save_pref(&storage_key, &raw))
                .is_ok();
            BridgeResponse::SaveAck {
                request_id,
                key,
                success,
            }
        }
        BridgeRequest::Load { request_id, key } => {
            let storage_key = app_data_key(&app.app_id, &key);
            let value = store
                .load_pref(&storage_key)
                .ok()
                .flatten()
                .and_then(|raw| serde_json::from_str(&raw).ok())
                .unwrap_or(Value::Null);
            BridgeResponse::LoadResponse {
                request_id,
                key,
                value,
            }
        }
        BridgeRequest::GetInfo { request_id } => BridgeResponse::InfoResponse {
            request_id,
            app_id: app.app_id.clone(),
            name: app.name.clone(),
            url: app.url.clone(),
        },
    }
}
