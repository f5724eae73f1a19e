//! Preference storage contracts and the persisted key catalog.

pub mod keys;
pub mod prefs;
