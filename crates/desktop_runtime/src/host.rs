//! Host-side runtime helpers for executing reducer effects and answering embedded frames.
//!
//! Reducer semantics stay pure; everything that touches storage, the viewport, or browser
//! dialogs goes through [`DesktopHostContext`], which can be constructed over any
//! [`PrefsStore`] for tests.

mod boot;
mod bridge;
mod effects;
mod host_ui;

use std::rc::Rc;

use desktop_app_contract::{BridgeResponse, EmbeddedAppInfo};
use leptos::Callback;
use platform_host::PrefsStore;
use platform_host_web::{host_strategy_name, prefs_store, viewport_size, ViewportSize};
use serde_json::Value;

use crate::{
    model::{DesktopState, ItemId, PersistedConfig},
    persistence,
    reducer::{DesktopAction, RuntimeEffect},
};

#[derive(Clone)]
/// Host service bundle for desktop runtime side effects.
pub struct DesktopHostContext {
    prefs: Rc<dyn PrefsStore>,
    host_strategy_name: &'static str,
}

impl Default for DesktopHostContext {
    fn default() -> Self {
        Self {
            prefs: Rc::new(prefs_store()),
            host_strategy_name: host_strategy_name(),
        }
    }
}

impl DesktopHostContext {
    /// Builds a host over an explicit preference store.
    pub fn new(prefs: Rc<dyn PrefsStore>, host_strategy_name: &'static str) -> Self {
        Self {
            prefs,
            host_strategy_name,
        }
    }

    /// Returns the configured lightweight preference service.
    pub fn prefs_store(&self) -> Rc<dyn PrefsStore> {
        self.prefs.clone()
    }

    /// Returns the stable name of the selected host strategy.
    pub fn host_strategy_name(&self) -> &'static str {
        self.host_strategy_name
    }

    /// Current inner window size.
    pub fn viewport(&self) -> ViewportSize {
        viewport_size()
    }

    /// Reads every persisted configuration key, with the dock clamped to the current viewport.
    pub fn load_config(&self) -> PersistedConfig {
        let viewport = self.viewport();
        persistence::load_persisted_config(self.prefs.as_ref(), viewport.width, viewport.height)
    }

    /// Installs boot hydration, followed by the `?open=` deep link when one was supplied.
    pub fn install_boot_hydration(
        &self,
        dispatch: Callback<DesktopAction>,
        deep_link: Option<ItemId>,
    ) {
        boot::install_boot_hydration(self.clone(), dispatch, deep_link);
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer against `state`.
    pub fn run_runtime_effect(&self, state: &DesktopState, effect: RuntimeEffect) {
        effects::run_runtime_effect(self, state, effect);
    }

    /// Answers a message posted by the frame hosting `app`.
    ///
    /// Returns `None` for messages outside the bridge protocol and for response tags.
    pub fn handle_frame_message(
        &self,
        app: &EmbeddedAppInfo,
        message: &Value,
    ) -> Option<BridgeResponse> {
        bridge::respond(self.prefs.as_ref(), app, message)
    }
}
