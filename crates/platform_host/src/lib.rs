//! Typed host-domain contracts shared by the desktop runtime and browser adapters.
//!
//! This crate is the API-first boundary for platform services. It owns the preference storage
//! contract, the namespaced storage key catalog, and time helpers, while concrete browser adapters
//! live in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod storage;
pub mod time;

pub use storage::keys::{
    app_data_key, APPS_KEY, APP_DATA_PREFIX, CLOCK_KEY, DOCK_KEY, LAYOUT_ORDER_KEY, WIDGETS_KEY,
};
pub use storage::prefs::{
    load_pref_with, save_pref_with, MemoryPrefsStore, NoopPrefsStore, PrefsStore,
};
pub use time::unix_time_ms_now;
