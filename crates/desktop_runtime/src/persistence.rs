//! Boot hydration and per-key persistence of desktop configuration.
//!
//! Each concern lives under its own storage key so a corrupt value in one never invalidates the
//! others. Loads degrade to defaults and log; saves return the store error for the caller to log.

use std::collections::HashSet;

use leptos::logging;
use platform_host::{
    load_pref_with, save_pref_with, PrefsStore, APPS_KEY, CLOCK_KEY, DOCK_KEY, LAYOUT_ORDER_KEY,
    WIDGETS_KEY,
};
use serde_json::Value;

use crate::{
    config::DEFAULT_ENABLED_WIDGETS,
    model::{ClockConfig, DesktopState, DockPosition, ItemId, PersistedConfig, ShortcutRecord},
    reducer::RuntimeEffect,
};

/// Shortcuts written on a first run, before the shortcut key exists.
pub fn seeded_shortcuts() -> Vec<ShortcutRecord> {
    vec![
        ShortcutRecord {
            id: "seed-docs".to_string(),
            name: "Docs.rs".to_string(),
            url: "https://docs.rs".to_string(),
            color: "#f97316".to_string(),
            description: "Rust crate documentation".to_string(),
            icon_name: Some("book".to_string()),
            ..Default::default()
        },
        ShortcutRecord {
            id: "seed-wikipedia".to_string(),
            name: "Wikipedia".to_string(),
            url: "https://en.wikipedia.org".to_string(),
            color: "#64748b".to_string(),
            description: "The free encyclopedia".to_string(),
            icon_name: Some("globe".to_string()),
            widget_style: Some("horizontal".to_string()),
            hero_icon_name: Some("globe".to_string()),
            ..Default::default()
        },
    ]
}

pub fn default_enabled_widgets() -> Vec<String> {
    DEFAULT_ENABLED_WIDGETS
        .iter()
        .map(|id| id.to_string())
        .collect()
}

/// Parses a shortcut list one record at a time.
///
/// Returns `None` when `raw` is not an array. Records that fail to parse are skipped and logged.
/// Ids are unique in the result: the first record with a given id wins.
pub fn parse_shortcut_list(raw: &Value) -> Option<Vec<ShortcutRecord>> {
    let entries = raw.as_array()?;
    let mut seen = HashSet::new();
    let records = entries
        .iter()
        .enumerate()
        .filter_map(
            |(position, entry)| match serde_json::from_value::<ShortcutRecord>(entry.clone()) {
                Ok(record) => Some((position, record)),
                Err(err) => {
                    logging::warn!("skipping malformed shortcut record #{position}: {err}");
                    None
                }
            },
        )
        .filter(|(position, record)| {
            if record.id.is_empty() || seen.insert(record.id.clone()) {
                return true;
            }
            logging::warn!(
                "skipping shortcut record #{position}: duplicate id `{}`",
                record.id
            );
            false
        })
        .map(|(_, record)| record)
        .collect();
    Some(records)
}

/// Keeps the string entries of a JSON list; `None` when `raw` is not an array.
pub fn parse_id_list(raw: &Value) -> Option<Vec<String>> {
    let entries = raw.as_array()?;
    Some(
        entries
            .iter()
            .filter_map(|entry| entry.as_str().map(str::to_string))
            .collect(),
    )
}

fn load_value<S: PrefsStore + ?Sized>(store: &S, key: &str) -> Option<Value> {
    match load_pref_with::<S, Value>(store, key) {
        Ok(value) => value,
        Err(err) => {
            logging::warn!("load `{key}` failed, using defaults: {err}");
            None
        }
    }
}

fn load_list<S, T>(store: &S, key: &str, parse: fn(&Value) -> Option<T>) -> Option<T>
where
    S: PrefsStore + ?Sized,
{
    let raw = load_value(store, key)?;
    let parsed = parse(&raw);
    if parsed.is_none() {
        logging::warn!("stored `{key}` is not a list, using defaults");
    }
    parsed
}

fn load_typed<S, T>(store: &S, key: &str) -> Option<T>
where
    S: PrefsStore + ?Sized,
    T: serde::de::DeserializeOwned,
{
    let raw = load_value(store, key)?;
    match serde_json::from_value(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            logging::warn!("stored `{key}` has the wrong shape, using defaults: {err}");
            None
        }
    }
}

/// Reads every configuration key independently, substituting defaults for missing or corrupt
/// values. The dock is clamped to a `viewport_w` x `viewport_h` viewport.
pub fn load_persisted_config<S: PrefsStore + ?Sized>(
    store: &S,
    viewport_w: i32,
    viewport_h: i32,
) -> PersistedConfig {
    let shortcuts = load_list(store, APPS_KEY, parse_shortcut_list).unwrap_or_else(seeded_shortcuts);
    let enabled_widgets =
        load_list(store, WIDGETS_KEY, parse_id_list).unwrap_or_else(default_enabled_widgets);
    let layout_order = load_list(store, LAYOUT_ORDER_KEY, parse_id_list)
        .map(|ids| ids.into_iter().map(ItemId::new).collect());
    let clock = load_typed::<S, ClockConfig>(store, CLOCK_KEY).unwrap_or_default();
    let dock = load_typed::<S, DockPosition>(store, DOCK_KEY)
        .unwrap_or_default()
        .clamped(viewport_w, viewport_h);

    PersistedConfig {
        shortcuts,
        enabled_widgets,
        layout_order,
        clock,
        dock,
    }
}

pub fn persist_shortcuts<S: PrefsStore + ?Sized>(
    store: &S,
    shortcuts: &[ShortcutRecord],
) -> Result<(), String> {
    save_pref_with(store, APPS_KEY, &shortcuts)
}

pub fn persist_enabled_widgets<S: PrefsStore + ?Sized>(
    store: &S,
    widgets: &[String],
) -> Result<(), String> {
    save_pref_with(store, WIDGETS_KEY, &widgets)
}

pub fn persist_layout_order<S: PrefsStore + ?Sized>(
    store: &S,
    order: &[ItemId],
) -> Result<(), String> {
    save_pref_with(store, LAYOUT_ORDER_KEY, &order)
}

pub fn persist_clock<S: PrefsStore + ?Sized>(store: &S, clock: &ClockConfig) -> Result<(), String> {
    save_pref_with(store, CLOCK_KEY, clock)
}

pub fn persist_dock<S: PrefsStore + ?Sized>(store: &S, dock: &DockPosition) -> Result<(), String> {
    save_pref_with(store, DOCK_KEY, dock)
}

/// Writes the key a persistence effect names from `state`. Non-persistence effects are no-ops.
pub fn persist_effect<S: PrefsStore + ?Sized>(
    store: &S,
    state: &DesktopState,
    effect: &RuntimeEffect,
) -> Result<(), String> {
    match effect {
        RuntimeEffect::PersistShortcuts => persist_shortcuts(store, &state.shortcuts),
        RuntimeEffect::PersistEnabledWidgets => {
            persist_enabled_widgets(store, &state.enabled_widgets)
        }
        RuntimeEffect::PersistLayoutOrder => persist_layout_order(store, state.layout.order()),
        RuntimeEffect::PersistClock => persist_clock(store, &state.clock),
        RuntimeEffect::PersistDock => persist_dock(store, &state.dock),
        RuntimeEffect::Alert(_) => Ok(()),
    }
}
