//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate is the concrete browser-side wiring layer for preference storage, viewport
//! queries, and the `postMessage` transport used by embedded frame apps. Every browser call is
//! guarded so the crate still builds and answers with inert defaults on host targets.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod frame_messages;
pub mod storage;
pub mod viewport;

pub use adapters::{
    host_strategy_name, prefs_store, selected_host_strategy, HostStrategy, PrefsStoreAdapter,
};
pub use frame_messages::{
    message_event_payload, post_message_to_frame, reply_target_origin, reply_to_message_source,
};
pub use storage::local_prefs::WebPrefsStore;
pub use viewport::{viewport_size, ViewportSize};
