//! `postMessage` transport between the shell window and embedded frame pages.
//!
//! Payloads cross the JS boundary as plain JSON objects so embedded pages never see `Map`
//! instances where they expect objects.

use serde::Serialize;
use serde_json::Value;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
fn to_js<T: Serialize>(payload: &T) -> Result<wasm_bindgen::JsValue, String> {
    payload
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| e.to_string())
}

/// Target origin for replies; sandboxed frames without `allow-same-origin` report `"null"`.
pub fn reply_target_origin(origin: &str) -> &str {
    if origin.is_empty() || origin == "null" {
        "*"
    } else {
        origin
    }
}

/// Converts the `data` of a message event into JSON, or `None` when it is not JSON-shaped.
pub fn message_event_payload(ev: &web_sys::MessageEvent) -> Option<Value> {
    #[cfg(target_arch = "wasm32")]
    {
        serde_wasm_bindgen::from_value::<Value>(ev.data()).ok()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = ev;
        None
    }
}

/// Posts `payload` back to the window that sent `ev`.
///
/// # Errors
///
/// Returns an error when the source is not a window or the post fails.
pub fn reply_to_message_source<T: Serialize>(
    ev: &web_sys::MessageEvent,
    payload: &T,
) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        let source = ev
            .source()
            .ok_or_else(|| "message has no source window".to_string())?;
        let window = source
            .dyn_into::<web_sys::Window>()
            .map_err(|_| "message source is not a window".to_string())?;
        let origin = ev.origin();
        window
            .post_message(&to_js(payload)?, reply_target_origin(&origin))
            .map_err(|e| format!("postMessage failed: {e:?}"))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (ev, payload);
        Ok(())
    }
}

/// Posts `payload` into the content window of the `<iframe>` with DOM id `frame_dom_id`.
///
/// # Errors
///
/// Returns an error when the frame is missing, not yet attached, or the post fails.
pub fn post_message_to_frame<T: Serialize>(frame_dom_id: &str, payload: &T) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        let frame = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(frame_dom_id))
            .and_then(|el| el.dyn_into::<web_sys::HtmlIFrameElement>().ok())
            .ok_or_else(|| format!("frame `{frame_dom_id}` not found"))?;
        let target = frame
            .content_window()
            .ok_or_else(|| format!("frame `{frame_dom_id}` has no content window"))?;
        target
            .post_message(&to_js(payload)?, "*")
            .map_err(|e| format!("postMessage failed: {e:?}"))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (frame_dom_id, payload);
        Ok(())
    }
}
