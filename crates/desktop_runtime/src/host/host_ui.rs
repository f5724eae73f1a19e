use leptos::logging;

/// Shows a blocking browser alert; logs off-browser.
pub(super) fn alert(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let shown = web_sys::window()
            .map(|window| window.alert_with_message(message).is_ok())
            .unwrap_or(false);
        if shown {
            return;
        }
    }
    logging::log!("{message}");
}
