use leptos::{ev::PointerEvent, *};
use system_ui::{Dock, DockButton, IconName};

use crate::{
    config::SYSTEM_SETTINGS_ID,
    model::{DockPosition, ItemId, PointerPosition},
    reducer::{settings_open, DesktopAction},
    runtime_context::use_desktop_runtime,
};

fn dock_style(position: DockPosition) -> String {
    format!("left: {}px; top: {}px;", position.x, position.y)
}

fn pointer_position(ev: &PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

#[component]
/// Floating dock with Home and Settings; dragging its body moves it.
pub(super) fn DesktopDock() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let style = Signal::derive(move || runtime.state.with(|desktop| dock_style(desktop.dock)));
    let dragging = Signal::derive(move || runtime.interaction.with(|ui| ui.dock_drag.is_some()));
    let home_selected = Signal::derive(move || {
        runtime
            .state
            .with(|desktop| desktop.active_window.is_none())
    });
    let settings_selected = Signal::derive(move || runtime.state.with(settings_open));

    let move_listener = window_event_listener(ev::pointermove, move |ev| {
        if !runtime.interaction.with_untracked(|ui| ui.dock_drag.is_some()) {
            return;
        }
        let viewport = runtime.host.get_value().viewport();
        runtime.dispatch_action(DesktopAction::UpdateDockMove {
            pointer: pointer_position(&ev),
            viewport_w: viewport.width,
            viewport_h: viewport.height,
        });
    });
    on_cleanup(move || move_listener.remove());

    let up_listener = window_event_listener(ev::pointerup, move |_| {
        if runtime.interaction.with_untracked(|ui| ui.dock_drag.is_some()) {
            runtime.dispatch_action(DesktopAction::EndDockMove);
        }
    });
    on_cleanup(move || up_listener.remove());

    let on_pointerdown = Callback::new(move |ev: PointerEvent| {
        if ev.button() != 0 {
            return;
        }
        ev.prevent_default();
        runtime.dispatch_action(DesktopAction::BeginDockMove {
            pointer: pointer_position(&ev),
        });
    });

    view! {
        <Dock style dragging on_pointerdown>
            <DockButton
                icon=IconName::Home
                label="Home"
                selected=home_selected
                on_click=Callback::new(move |_| runtime.dispatch_action(DesktopAction::CloseWindow))
            />
            <DockButton
                icon=IconName::Settings
                label="Settings"
                selected=settings_selected
                on_click=Callback::new(move |_| {
                    runtime.dispatch_action(DesktopAction::OpenItem {
                        item_id: ItemId::from(SYSTEM_SETTINGS_ID),
                    })
                })
            />
        </Dock>
    }
}
