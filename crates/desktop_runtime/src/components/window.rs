use desktop_app_contract::{ready_message, EmbeddedAppInfo};
use leptos::{html, *};
use platform_host_web::{message_event_payload, post_message_to_frame, reply_to_message_source};
use system_ui::WindowPanel;
use web_sys::MessageEvent;

use super::{settings::SettingsView, widgets::WidgetBody};
use crate::{
    model::{ActiveWindow, InternalView, ItemTarget},
    reducer::DesktopAction,
    runtime_context::use_desktop_runtime,
};

const FRAME_DOM_ID: &str = "bentodesk-frame";
/// No `allow-same-origin`: embedded pages only reach the shell through the message bridge.
const FRAME_SANDBOX: &str = "allow-scripts allow-forms allow-popups";

fn embedded_app(window: &ActiveWindow, url: &str) -> EmbeddedAppInfo {
    EmbeddedAppInfo {
        app_id: window.item_id.to_string(),
        name: window.title.clone(),
        url: url.to_string(),
    }
}

fn is_from_frame(ev: &MessageEvent, frame: &web_sys::HtmlIFrameElement) -> bool {
    match (ev.source(), frame.content_window()) {
        (Some(source), Some(content)) => js_sys::Object::is(source.as_ref(), content.as_ref()),
        _ => false,
    }
}

#[component]
fn EmbeddedFrame(app: EmbeddedAppInfo) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let frame_ref = create_node_ref::<html::Iframe>();
    let ready = ready_message(&app);
    let bridge_app = app.clone();

    let message_listener = window_event_listener(ev::message, move |ev| {
        let Some(frame) = frame_ref.get_untracked() else {
            return;
        };
        if !is_from_frame(&ev, &frame) {
            return;
        }
        let Some(payload) = message_event_payload(&ev) else {
            return;
        };
        let response = runtime
            .host
            .get_value()
            .handle_frame_message(&bridge_app, &payload);
        if let Some(response) = response {
            if let Err(err) = reply_to_message_source(&ev, &response) {
                logging::warn!("bridge reply to `{}` failed: {err}", bridge_app.app_id);
            }
        }
    });
    on_cleanup(move || message_listener.remove());

    let app_id = app.app_id.clone();
    view! {
        <iframe
            id=FRAME_DOM_ID
            class="bento-frame"
            node_ref=frame_ref
            src=app.url
            title=app.name
            sandbox=FRAME_SANDBOX
            referrerpolicy="no-referrer"
            on:load=move |_| {
                if let Err(err) = post_message_to_frame(FRAME_DOM_ID, &ready) {
                    logging::warn!("READY handshake to `{app_id}` failed: {err}");
                }
            }
        ></iframe>
    }
}

#[component]
/// The single full-surface window over the grid, keyed by the active item.
pub(super) fn ActiveWindowLayer() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let active = create_memo(move |_| runtime.state.with(|desktop| desktop.active_window.clone()));
    let title = Signal::derive(move || {
        active.with(|window| {
            window
                .as_ref()
                .map(|window| window.title.clone())
                .unwrap_or_default()
        })
    });
    let on_close = Callback::new(move |_| runtime.dispatch_action(DesktopAction::CloseWindow));

    let escape_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" && active.with_untracked(Option::is_some) {
            runtime.dispatch_action(DesktopAction::CloseWindow);
        }
    });
    on_cleanup(move || escape_listener.remove());

    // Re-render the body only when the active item or its target changes, not on title edits.
    let body_key = create_memo(move |_| {
        active.with(|window| {
            window
                .as_ref()
                .map(|window| (window.item_id.clone(), window.target.clone()))
        })
    });

    view! {
        <Show when=move || body_key.with(Option::is_some) fallback=|| ()>
            <WindowPanel title on_close>
                {move || {
                    let Some((_, target)) = body_key.get() else {
                        return ().into_view();
                    };
                    match target {
                        ItemTarget::Internal(InternalView::Settings) => {
                            view! { <SettingsView /> }.into_view()
                        }
                        ItemTarget::Internal(InternalView::Widget(widget_id)) => view! {
                            <div class="bento-widget-detail">
                                <WidgetBody widget_id />
                            </div>
                        }
                        .into_view(),
                        ItemTarget::External { url } => {
                            let app = active.with_untracked(|window| {
                                window.as_ref().map(|window| embedded_app(window, &url))
                            });
                            app.map(|app| view! { <EmbeddedFrame app /> }.into_view())
                                .unwrap_or_else(|| ().into_view())
                        }
                    }
                }}
            </WindowPanel>
        </Show>
    }
}
