//! Shortcut editor input validation.

use thiserror::Error;

use crate::model::{ItemSize, ShortcutRecord, WidgetStyle};

/// Raw editor form contents.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShortcutDraft {
    pub name: String,
    pub url: String,
    pub color: String,
    pub description: String,
    pub icon_name: String,
    pub icon_url: String,
    pub grid_size: Option<ItemSize>,
    pub widget_style: WidgetStyle,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Blocking editor errors; nothing is saved while one is present.
pub enum ShortcutValidationError {
    #[error("shortcut name is required")]
    MissingName,
    #[error("shortcut URL is required")]
    MissingUrl,
    #[error("URL `{0}` is not a web address")]
    InvalidUrl(String),
}

/// Adds `https://` to bare host names and rejects URLs with whitespace or an empty host.
pub fn normalize_url(raw: &str) -> Result<String, ShortcutValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ShortcutValidationError::MissingUrl);
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(ShortcutValidationError::InvalidUrl(trimmed.to_string()));
    }
    let url = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    let host = url
        .split_once("://")
        .map(|(_, rest)| rest.split(['/', '?', '#']).next().unwrap_or_default())
        .unwrap_or_default();
    if host.is_empty() {
        return Err(ShortcutValidationError::InvalidUrl(trimmed.to_string()));
    }
    Ok(url)
}

fn optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl ShortcutDraft {
    /// Draft pre-filled from an existing record, for editing.
    pub fn from_record(record: &ShortcutRecord) -> Self {
        Self {
            name: record.name.clone(),
            url: record.url.clone(),
            color: record.color.clone(),
            description: record.description.clone(),
            icon_name: record.icon_name.clone().unwrap_or_default(),
            icon_url: record.icon_url.clone().unwrap_or_default(),
            grid_size: record.grid_size.as_deref().and_then(ItemSize::from_token),
            widget_style: WidgetStyle::from_token(record.widget_style.as_deref().unwrap_or_default()),
        }
    }

    /// Validates the draft and produces the record to store under `id`.
    ///
    /// Fields the editor does not expose (hero overlay settings) are carried over from `base`.
    pub fn into_record(
        self,
        id: String,
        base: Option<&ShortcutRecord>,
    ) -> Result<ShortcutRecord, ShortcutValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ShortcutValidationError::MissingName);
        }
        let url = normalize_url(&self.url)?;

        let mut record = base.cloned().unwrap_or_default();
        record.id = id;
        record.name = name.to_string();
        record.url = url;
        record.color = self.color.trim().to_string();
        record.description = self.description.trim().to_string();
        record.icon_name = optional(&self.icon_name);
        record.icon_url = optional(&self.icon_url);
        record.grid_size = self.grid_size.map(|size| size.token().to_string());
        record.widget_style = match self.widget_style {
            WidgetStyle::Standard => None,
            style => Some(style.token().to_string()),
        };
        Ok(record)
    }
}

/// Fresh shortcut id; ids are never reused after deletion.
pub fn next_shortcut_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
