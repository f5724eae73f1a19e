use super::*;

fn call_drag(handler: Option<&Callback<DragEvent>>, ev: DragEvent) {
    if let Some(handler) = handler {
        handler.call(ev);
    }
}

#[component]
/// Root desktop shell primitive.
pub fn DesktopRoot(
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional)] layout_class: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            id=id
            class=merge_layout_class("desktop-shell", layout_class)
            data-ui-primitive="true"
            data-ui-kind="desktop-root"
        >
            {children()}
        </div>
    }
}

#[component]
/// Desktop backdrop host.
pub fn DesktopBackdrop(
    #[prop(optional)] layout_class: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            class=merge_layout_class("desktop-backdrop", layout_class)
            data-ui-primitive="true"
            data-ui-kind="desktop-backdrop"
        >
            {children()}
        </div>
    }
}

#[component]
/// CSS grid host for bento tiles. Children position themselves with `grid-area`.
pub fn BentoGridSurface(
    #[prop(into)] cols: Signal<usize>,
    #[prop(into)] rows: Signal<usize>,
    #[prop(optional, into)] dragging: MaybeSignal<bool>,
    #[prop(optional)] on_drag_leave: Option<Callback<DragEvent>>,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            class="ui-bento-grid"
            role="grid"
            style=move || {
                format!(
                    "grid-template-columns: repeat({}, minmax(0, 1fr)); grid-template-rows: repeat({}, var(--bento-row, 120px));",
                    cols.get().max(1),
                    rows.get().max(1),
                )
            }
            data-ui-primitive="true"
            data-ui-kind="bento-grid"
            data-ui-cols=move || cols.get().to_string()
            data-ui-dragging=move || bool_token(dragging.get())
            on:dragleave=move |ev| call_drag(on_drag_leave.as_ref(), ev)
        >
            {children()}
        </div>
    }
}

#[component]
/// Positioned, optionally draggable tile.
pub fn BentoTileFrame(
    #[prop(into)] grid_area: Signal<String>,
    kind: TileKind,
    #[prop(into)] accent: String,
    #[prop(into)] aria_label: String,
    #[prop(optional)] draggable: bool,
    #[prop(optional, into)] tone: MaybeSignal<SlotTone>,
    #[prop(optional, into)] lifted: MaybeSignal<bool>,
    #[prop(optional)] on_activate: Option<Callback<MouseEvent>>,
    #[prop(optional)] on_drag_start: Option<Callback<DragEvent>>,
    #[prop(optional)] on_drag_over: Option<Callback<DragEvent>>,
    #[prop(optional)] on_drop: Option<Callback<DragEvent>>,
    #[prop(optional)] on_drag_end: Option<Callback<DragEvent>>,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            class="ui-bento-tile"
            role="gridcell"
            tabindex=0
            aria-label=aria_label
            draggable=bool_token(draggable)
            style=move || format!("grid-area: {}; --tile-accent: {accent};", grid_area.get())
            data-ui-primitive="true"
            data-ui-kind="bento-tile"
            data-ui-variant=kind.token()
            data-ui-tone=move || tone.get().token()
            data-ui-lifted=move || bool_token(lifted.get())
            data-ui-draggable=bool_token(draggable)
            on:click=move |ev| {
                if let Some(on_activate) = on_activate.as_ref() {
                    on_activate.call(ev);
                }
            }
            on:dragstart=move |ev| call_drag(on_drag_start.as_ref(), ev)
            on:dragover=move |ev| call_drag(on_drag_over.as_ref(), ev)
            on:drop=move |ev| call_drag(on_drop.as_ref(), ev)
            on:dragend=move |ev| call_drag(on_drag_end.as_ref(), ev)
        >
            {children()}
        </div>
    }
}

#[component]
/// Placeholder for an uncovered grid slot; a drop target while dragging.
pub fn EmptySlot(
    #[prop(into)] grid_area: String,
    #[prop(optional, into)] tone: MaybeSignal<SlotTone>,
    #[prop(optional)] on_drag_over: Option<Callback<DragEvent>>,
    #[prop(optional)] on_drop: Option<Callback<DragEvent>>,
) -> impl IntoView {
    view! {
        <div
            class="ui-bento-empty"
            aria-hidden="true"
            style=format!("grid-area: {grid_area};")
            data-ui-primitive="true"
            data-ui-kind="bento-empty-slot"
            data-ui-tone=move || tone.get().token()
            on:dragover=move |ev| call_drag(on_drag_over.as_ref(), ev)
            on:drop=move |ev| call_drag(on_drop.as_ref(), ev)
        ></div>
    }
}

#[component]
/// Floating, pointer-draggable dock.
pub fn Dock(
    #[prop(into)] style: Signal<String>,
    #[prop(optional, into)] dragging: MaybeSignal<bool>,
    #[prop(optional)] on_pointerdown: Option<Callback<PointerEvent>>,
    children: Children,
) -> impl IntoView {
    view! {
        <nav
            class="ui-dock"
            aria-label="Dock"
            style=move || style.get()
            data-ui-primitive="true"
            data-ui-kind="dock"
            data-ui-dragging=move || bool_token(dragging.get())
            on:pointerdown=move |ev| {
                if let Some(on_pointerdown) = on_pointerdown.as_ref() {
                    on_pointerdown.call(ev);
                }
            }
        >
            {children()}
        </nav>
    }
}

#[component]
/// Icon-only dock button.
pub fn DockButton(
    icon: IconName,
    #[prop(into)] label: String,
    #[prop(optional, into)] selected: MaybeSignal<bool>,
    on_click: Callback<MouseEvent>,
) -> impl IntoView {
    view! {
        <button
            type="button"
            class="ui-dock-button"
            title=label.clone()
            aria-label=label
            data-ui-primitive="true"
            data-ui-kind="dock-button"
            data-ui-selected=move || bool_token(selected.get())
            on:pointerdown=|ev: PointerEvent| ev.stop_propagation()
            on:click=move |ev| on_click.call(ev)
        >
            <Icon icon size=IconSize::Md />
        </button>
    }
}

#[component]
/// The single full-surface window panel.
pub fn WindowPanel(
    #[prop(into)] title: Signal<String>,
    on_close: Callback<MouseEvent>,
    children: Children,
) -> impl IntoView {
    view! {
        <section
            class="ui-window-panel"
            role="dialog"
            aria-label=move || title.get()
            data-ui-primitive="true"
            data-ui-kind="window-panel"
        >
            <header class="ui-window-titlebar" data-ui-kind="window-titlebar">
                <h2 class="ui-window-title">{move || title.get()}</h2>
                <button
                    type="button"
                    class="ui-window-close"
                    aria-label="Close"
                    data-ui-kind="window-close"
                    on:click=move |ev| on_close.call(ev)
                >
                    <Icon icon=IconName::Close size=IconSize::Sm />
                </button>
            </header>
            <div class="ui-window-body" data-ui-kind="window-body">
                {children()}
            </div>
        </section>
    }
}
