//! Persisted storage keys.
//!
//! Every concern owns exactly one key so a corrupt value under one key never invalidates the
//! others.

/// User shortcut list.
pub const APPS_KEY: &str = "bentodesk.apps.v1";
/// Enabled widget id list.
pub const WIDGETS_KEY: &str = "bentodesk.widgets.v1";
/// Persisted desktop arrangement (ordered item ids).
pub const LAYOUT_ORDER_KEY: &str = "bentodesk.layout.v1";
/// Clock widget display settings.
pub const CLOCK_KEY: &str = "bentodesk.clock.v1";
/// Floating dock pixel offset.
pub const DOCK_KEY: &str = "bentodesk.dock.v1";
/// Prefix for data saved by embedded apps through the frame bridge.
pub const APP_DATA_PREFIX: &str = "bentodesk.appdata";

/// Escapes the segment separator so `.` inside an id or key cannot shift segment boundaries.
fn escape_segment(raw: &str) -> String {
    raw.replace('%', "%25").replace('.', "%2E")
}

/// Returns the storage key for an embedded app's private value.
///
/// The app id is part of the key, so two apps saving the same `key` never collide. Both segments
/// are escaped, so dotted ids and keys map to distinct slots.
pub fn app_data_key(app_id: &str, key: &str) -> String {
    format!(
        "{APP_DATA_PREFIX}.{}.{}",
        escape_segment(app_id),
        escape_segment(key)
    )
}
