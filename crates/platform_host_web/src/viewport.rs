//! Viewport size queries.

/// Inner window size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportSize {
    /// Width in CSS pixels.
    pub width: i32,
    /// Height in CSS pixels.
    pub height: i32,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
        }
    }
}

/// Returns the current inner window size, or [`ViewportSize::default`] off-browser.
pub fn viewport_size() -> ViewportSize {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return ViewportSize::default();
        };
        let read = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>, fallback: i32| {
            value
                .ok()
                .and_then(|v| v.as_f64())
                .map(|v| v as i32)
                .unwrap_or(fallback)
        };
        let fallback = ViewportSize::default();
        ViewportSize {
            width: read(window.inner_width(), fallback.width),
            height: read(window.inner_height(), fallback.height),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        ViewportSize::default()
    }
}
