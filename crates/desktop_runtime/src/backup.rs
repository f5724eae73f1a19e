//! Backup export and import.
//!
//! Exports are one JSON document `{apps, widgets, layout, timestamp}`. Imports also accept the
//! legacy bare array of shortcuts, which restores apps only and resets the arrangement.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::{
    model::{ItemId, ShortcutRecord},
    persistence::{parse_id_list, parse_shortcut_list},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackupBundle {
    pub apps: Vec<ShortcutRecord>,
    pub widgets: Vec<String>,
    pub layout: Vec<ItemId>,
    /// Unix milliseconds at export time.
    pub timestamp: u64,
}

/// A parsed, not yet applied, import.
#[derive(Debug, Clone, PartialEq)]
pub enum BackupImport {
    /// Bare shortcut array from older exports.
    Legacy { apps: Vec<ShortcutRecord> },
    /// Full bundle. Missing sections leave the current value alone.
    Full {
        apps: Vec<ShortcutRecord>,
        widgets: Option<Vec<String>>,
        layout: Option<Vec<ItemId>>,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackupImportError {
    #[error("Invalid backup format")]
    InvalidFormat,
    #[error("Failed to parse backup file: {0}")]
    Parse(String),
}

pub fn export_backup(
    apps: &[ShortcutRecord],
    widgets: &[String],
    layout: &[ItemId],
    timestamp: u64,
) -> Result<String, String> {
    let bundle = BackupBundle {
        apps: apps.to_vec(),
        widgets: widgets.to_vec(),
        layout: layout.to_vec(),
        timestamp,
    };
    serde_json::to_string_pretty(&bundle).map_err(|err| err.to_string())
}

/// Parses an import document.
///
/// # Errors
///
/// [`BackupImportError::Parse`] for text that is not JSON, [`BackupImportError::InvalidFormat`]
/// for JSON of any other shape than a shortcut array or a bundle object with an `apps` array.
pub fn parse_backup(raw: &str) -> Result<BackupImport, BackupImportError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|err| BackupImportError::Parse(err.to_string()))?;

    if value.is_array() {
        let apps = parse_shortcut_list(&value).ok_or(BackupImportError::InvalidFormat)?;
        return Ok(BackupImport::Legacy { apps });
    }

    let bundle = value.as_object().ok_or(BackupImportError::InvalidFormat)?;
    let apps = bundle
        .get("apps")
        .and_then(parse_shortcut_list)
        .ok_or(BackupImportError::InvalidFormat)?;
    let widgets = match bundle.get("widgets") {
        None | Some(Value::Null) => None,
        Some(raw) => Some(parse_id_list(raw).ok_or(BackupImportError::InvalidFormat)?),
    };
    let layout = match bundle.get("layout") {
        None | Some(Value::Null) => None,
        Some(raw) => Some(
            parse_id_list(raw)
                .ok_or(BackupImportError::InvalidFormat)?
                .into_iter()
                .map(ItemId::new)
                .collect(),
        ),
    };
    Ok(BackupImport::Full {
        apps,
        widgets,
        layout,
    })
}
