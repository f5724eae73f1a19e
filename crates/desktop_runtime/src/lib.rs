pub mod backup;
pub mod bento;
pub mod clock;
pub mod components;
pub mod config;
pub mod drag;
mod effect_executor;
pub mod grid;
pub mod host;
pub mod layout_order;
pub mod model;
pub mod persistence;
pub mod reducer;
pub mod runtime_context;
pub mod shortcuts;

pub use components::{DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use model::*;
pub use persistence::{load_persisted_config, persist_effect};
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect, SlotTarget};
