//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived reducer container, runtime effect queue, viewport tracking,
//! and host bootstrap wiring. UI composition stays in [`crate::components`].

use leptos::*;
use platform_host_web::{viewport_size, ViewportSize};

use crate::{
    effect_executor,
    grid::columns_for_viewport,
    host::DesktopHostContext,
    model::{DesktopState, InteractionState, ItemId},
    reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop runtime state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Host service bundle for executing runtime side effects and environment queries.
    pub host: StoredValue<DesktopHostContext>,
    /// Reactive desktop state signal.
    pub state: RwSignal<DesktopState>,
    /// Reactive tile-drag and dock-drag state.
    pub interaction: RwSignal<InteractionState>,
    /// Queue of runtime effects emitted by the reducer and processed by the executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Last observed viewport size.
    pub viewport: RwSignal<ViewportSize>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }

    /// Dispatches `action` and returns the reducer error instead of logging it.
    ///
    /// Forms use this to show validation messages inline.
    pub fn try_dispatch(&self, action: DesktopAction) -> Result<(), ReducerError> {
        apply_action(self.state, self.interaction, self.effects, action)
    }

    /// Reactive column count for the current viewport.
    pub fn cols(&self) -> usize {
        columns_for_viewport(self.viewport.get().width)
    }

    /// Column count re-read from the window, for event handlers that may run before the resize
    /// listener has caught up.
    pub fn live_cols(&self) -> usize {
        let viewport = viewport_size();
        if viewport != self.viewport.get_untracked() {
            self.viewport.set(viewport);
        }
        columns_for_viewport(viewport.width)
    }
}

fn apply_action(
    state: RwSignal<DesktopState>,
    interaction: RwSignal<InteractionState>,
    effects: RwSignal<Vec<RuntimeEffect>>,
    action: DesktopAction,
) -> Result<(), ReducerError> {
    let mut desktop = state.get_untracked();
    let mut ui = interaction.get_untracked();

    let new_effects = reduce_desktop(&mut desktop, &mut ui, action)?;
    if desktop != state.get_untracked() {
        state.set(desktop);
    }
    if ui != interaction.get_untracked() {
        interaction.set(ui);
    }
    if !new_effects.is_empty() {
        let mut queue = effects.get_untracked();
        queue.extend(new_effects);
        effects.set(queue);
    }
    Ok(())
}

fn install_viewport_tracking(viewport: RwSignal<ViewportSize>) {
    let handle = window_event_listener(ev::resize, move |_| {
        let next = viewport_size();
        if next != viewport.get_untracked() {
            viewport.set(next);
        }
    });
    on_cleanup(move || handle.remove());
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and boots persisted state.
pub fn DesktopProvider(
    /// Item to open once hydration finishes, from the `?open=` query parameter.
    #[prop(default = None)]
    deep_link: Option<String>,
    children: Children,
) -> impl IntoView {
    let host = store_value(DesktopHostContext::default());
    let state = create_rw_signal(DesktopState::default());
    let interaction = create_rw_signal(InteractionState::default());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());
    let viewport = create_rw_signal(viewport_size());

    let dispatch = Callback::new(move |action: DesktopAction| {
        if let Err(err) = apply_action(state, interaction, effects, action) {
            logging::warn!("desktop reducer error: {err}");
        }
    });

    let runtime = DesktopRuntimeContext {
        host,
        state,
        interaction,
        effects,
        viewport,
        dispatch,
    };

    provide_context(runtime);

    install_viewport_tracking(viewport);
    effect_executor::install(runtime);
    let deep_link = deep_link
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(ItemId::new);
    host.get_value().install_boot_hydration(dispatch, deep_link);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
