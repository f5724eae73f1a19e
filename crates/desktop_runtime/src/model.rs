use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};

use crate::{drag::DragReorderController, layout_order::LayoutOrderStore};

pub const DOCK_WIDTH_PX: i32 = 184;
pub const DOCK_HEIGHT_PX: i32 = 56;

/// Stable identifier of a placeable desktop item.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// Grid footprint of an item, written `<width>x<height>` in persisted data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemSize {
    /// 1x1
    Small,
    /// 2x1
    Wide,
    /// 1x2
    Tall,
    /// 2x2
    Large,
    /// 4x2, only produced by older editors.
    Banner,
}

impl ItemSize {
    pub const ALL: [ItemSize; 5] = [
        Self::Small,
        Self::Wide,
        Self::Tall,
        Self::Large,
        Self::Banner,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Self::Small => "1x1",
            Self::Wide => "2x1",
            Self::Tall => "1x2",
            Self::Large => "2x2",
            Self::Banner => "4x2",
        }
    }

    pub fn from_token(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|size| size.token() == raw.trim())
    }

    /// Parses a persisted size, falling back to 1x1 for anything unrecognized.
    pub fn from_token_or_default(raw: &str) -> Self {
        Self::from_token(raw).unwrap_or_default()
    }

    pub fn is_small(self) -> bool {
        matches!(self, Self::Small)
    }
}

impl Default for ItemSize {
    fn default() -> Self {
        Self::Small
    }
}

impl Serialize for ItemSize {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.token())
    }
}

impl<'de> Deserialize<'de> for ItemSize {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_token_or_default(&raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    System,
    Widget,
    Shortcut,
}

impl ItemKind {
    pub fn is_draggable(self) -> bool {
        !matches!(self, Self::System)
    }

    pub fn is_deletable(self) -> bool {
        !matches!(self, Self::System)
    }
}

/// Shortcut presentation style chosen in the shortcut editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetStyle {
    #[default]
    Standard,
    Vertical,
    Horizontal,
    Status,
    /// Retired drop-zone tile; still found in old backups.
    Dropzone,
}

impl WidgetStyle {
    pub fn token(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
            Self::Status => "status",
            Self::Dropzone => "dropzone",
        }
    }

    pub fn from_token(raw: &str) -> Self {
        match raw.trim() {
            "vertical" => Self::Vertical,
            "horizontal" => Self::Horizontal,
            "status" => Self::Status,
            "dropzone" => Self::Dropzone,
            _ => Self::Standard,
        }
    }

    pub fn default_size(self) -> ItemSize {
        match self {
            Self::Standard => ItemSize::Small,
            Self::Vertical => ItemSize::Tall,
            Self::Horizontal | Self::Status | Self::Dropzone => ItemSize::Wide,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeroEffect {
    #[default]
    None,
    Glow,
    Shadow,
    Blur,
    Float,
}

impl HeroEffect {
    pub fn token(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Glow => "glow",
            Self::Shadow => "shadow",
            Self::Blur => "blur",
            Self::Float => "float",
        }
    }

    pub fn from_token(raw: &str) -> Self {
        match raw.trim() {
            "glow" => Self::Glow,
            "shadow" => Self::Shadow,
            "blur" => Self::Blur,
            "float" => Self::Float,
            _ => Self::None,
        }
    }
}

/// Decorative oversized icon drawn behind wide, tall, and large tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroOverlay {
    pub icon_name: String,
    pub scale: f64,
    pub opacity: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub rotation: f64,
    pub effect: HeroEffect,
    pub effect_intensity: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconRef {
    Symbolic(String),
    Remote(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemVisual {
    pub icon: IconRef,
    pub color: String,
    pub hero: Option<HeroOverlay>,
}

/// Views rendered by the shell itself inside the active window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalView {
    Settings,
    Widget(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemTarget {
    Internal(InternalView),
    /// Opened full-surface in a sandboxed frame.
    External { url: String },
}

/// A placeable unit on the desktop, merged from persisted config and static registries.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub size: ItemSize,
    pub kind: ItemKind,
    pub style: WidgetStyle,
    pub title: String,
    pub description: String,
    pub visual: ItemVisual,
    pub target: ItemTarget,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(raw).ok())
}

/// Persisted user shortcut, in the storage schema's field naming.
///
/// Every field is optional on read; unknown fields are ignored. An optional field holding the
/// wrong JSON type reads as absent instead of rejecting the record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShortcutRecord {
    pub id: String,
    pub name: String,
    pub url: String,
    pub color: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub icon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub icon_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub hero_icon_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub hero_scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub hero_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub hero_offset_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub hero_offset_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub hero_rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub hero_effect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub hero_effect_intensity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub grid_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub widget_style: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClockConfig {
    pub timezone: String,
    pub label: String,
    #[serde(rename = "use24Hour")]
    pub use_24_hour: bool,
    pub grid_size: String,
}

impl ClockConfig {
    pub fn size(&self) -> ItemSize {
        ItemSize::from_token_or_default(&self.grid_size)
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            timezone: "local".to_string(),
            label: "Local".to_string(),
            use_24_hour: false,
            grid_size: ItemSize::Large.token().to_string(),
        }
    }
}

/// Pixel offset of the floating dock from the viewport's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockPosition {
    pub x: i32,
    pub y: i32,
}

impl DockPosition {
    /// Keeps the whole dock inside a `viewport_w` x `viewport_h` viewport.
    pub fn clamped(self, viewport_w: i32, viewport_h: i32) -> Self {
        let max_x = (viewport_w - DOCK_WIDTH_PX).max(0);
        let max_y = (viewport_h - DOCK_HEIGHT_PX).max(0);
        Self {
            x: self.x.clamp(0, max_x),
            y: self.y.clamp(0, max_y),
        }
    }
}

impl Default for DockPosition {
    fn default() -> Self {
        Self { x: 24, y: 24 }
    }
}

/// The single panel currently covering the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveWindow {
    pub item_id: ItemId,
    pub title: String,
    pub target: ItemTarget,
}

impl ActiveWindow {
    pub fn for_item(item: &Item) -> Self {
        Self {
            item_id: item.id.clone(),
            title: item.title.clone(),
            target: item.target.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DockDragSession {
    pub pointer_start: PointerPosition,
    pub dock_start: DockPosition,
}

/// Gesture state that is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub tile_drag: DragReorderController,
    pub dock_drag: Option<DockDragSession>,
}

/// Everything loaded from storage at boot, each field from its own key.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedConfig {
    pub shortcuts: Vec<ShortcutRecord>,
    pub enabled_widgets: Vec<String>,
    pub layout_order: Option<Vec<ItemId>>,
    pub clock: ClockConfig,
    pub dock: DockPosition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesktopState {
    pub shortcuts: Vec<ShortcutRecord>,
    pub enabled_widgets: Vec<String>,
    pub clock: ClockConfig,
    pub layout: LayoutOrderStore,
    pub dock: DockPosition,
    pub active_window: Option<ActiveWindow>,
    pub booted: bool,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            shortcuts: Vec::new(),
            enabled_widgets: Vec::new(),
            clock: ClockConfig::default(),
            layout: LayoutOrderStore::default(),
            dock: DockPosition::default(),
            active_window: None,
            booted: false,
        }
    }
}

impl DesktopState {
    pub fn from_persisted(config: PersistedConfig) -> Self {
        Self {
            shortcuts: config.shortcuts,
            enabled_widgets: config.enabled_widgets,
            clock: config.clock,
            layout: LayoutOrderStore::new(config.layout_order),
            dock: config.dock,
            active_window: None,
            booted: true,
        }
    }

    /// Runtime items in their natural (configuration) enumeration order.
    pub fn items(&self) -> Vec<Item> {
        crate::config::build_runtime_items(&self.shortcuts, &self.enabled_widgets, &self.clock)
    }

    /// Runtime items arranged by the layout order.
    pub fn ordered_items(&self) -> Vec<Item> {
        crate::layout_order::arrange(self.items(), self.layout.order())
    }

    pub fn find_item(&self, id: &ItemId) -> Option<Item> {
        self.items().into_iter().find(|item| &item.id == id)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn mistyped_optional_fields_do_not_drop_the_record() {
        let record: ShortcutRecord = serde_json::from_value(json!({
            "id": "a",
            "name": "Alpha",
            "url": "https://a.example",
            "heroScale": "1.5",
            "heroOpacity": 0.4,
            "iconName": 12,
            "gridSize": "2x1"
        }))
        .expect("record");
        assert_eq!(record.id, "a");
        assert_eq!(record.name, "Alpha");
        assert_eq!(record.hero_scale, None);
        assert_eq!(record.hero_opacity, Some(0.4));
        assert_eq!(record.icon_name, None);
        assert_eq!(record.grid_size.as_deref(), Some("2x1"));
    }

    #[test]
    fn size_tokens_fail_closed_to_small() {
        assert_eq!(ItemSize::from_token("2x1"), Some(ItemSize::Wide));
        assert_eq!(ItemSize::from_token("3x3"), None);
        assert_eq!(ItemSize::from_token_or_default("huge"), ItemSize::Small);
        let parsed: ItemSize = serde_json::from_value(json!("9x9")).expect("lenient size");
        assert_eq!(parsed, ItemSize::Small);
    }

    #[test]
    fn widget_style_defaults_map_to_sizes() {
        assert_eq!(WidgetStyle::Standard.default_size(), ItemSize::Small);
        assert_eq!(WidgetStyle::Vertical.default_size(), ItemSize::Tall);
        assert_eq!(WidgetStyle::Horizontal.default_size(), ItemSize::Wide);
        assert_eq!(WidgetStyle::Status.default_size(), ItemSize::Wide);
        assert_eq!(WidgetStyle::Dropzone.default_size(), ItemSize::Wide);
        assert_eq!(WidgetStyle::from_token("sparkly"), WidgetStyle::Standard);
    }

    #[test]
    fn only_system_items_are_pinned() {
        assert!(!ItemKind::System.is_draggable());
        assert!(!ItemKind::System.is_deletable());
        assert!(ItemKind::Widget.is_draggable());
        assert!(ItemKind::Shortcut.is_deletable());
    }

    #[test]
    fn shortcut_records_tolerate_missing_and_unknown_fields() {
        let record: ShortcutRecord = serde_json::from_value(json!({
            "id": "a1",
            "name": "Docs",
            "url": "https://docs.rs",
            "gridSize": "1x2",
            "heroScale": 1.5,
            "futureField": true
        }))
        .expect("lenient record");
        assert_eq!(record.id, "a1");
        assert_eq!(record.color, "");
        assert_eq!(record.grid_size.as_deref(), Some("1x2"));
        assert_eq!(record.hero_scale, Some(1.5));

        let written = serde_json::to_value(&record).expect("serialize");
        assert_eq!(written.get("heroOpacity"), None);
        assert_eq!(written["gridSize"], json!("1x2"));
    }

    #[test]
    fn clock_config_uses_storage_field_names() {
        let clock: ClockConfig = serde_json::from_value(json!({
            "timezone": "UTC", "label": "HQ", "use24Hour": true, "gridSize": "1x1"
        }))
        .expect("clock config");
        assert!(clock.use_24_hour);
        assert_eq!(clock.size(), ItemSize::Small);
        assert_eq!(
            serde_json::to_value(ClockConfig::default()).expect("serialize")["use24Hour"],
            json!(false)
        );
    }

    #[test]
    fn dock_position_clamps_into_viewport() {
        let dock = DockPosition { x: 5000, y: -40 }.clamped(1000, 700);
        assert_eq!(dock, DockPosition { x: 1000 - DOCK_WIDTH_PX, y: 0 });

        let tiny = DockPosition { x: 30, y: 30 }.clamped(100, 20);
        assert_eq!(tiny, DockPosition { x: 0, y: 0 });
    }
}
