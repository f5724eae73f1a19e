//! Merges persisted shortcuts, enabled widget ids, and clock settings into one runtime item list.
//!
//! The static registries for widgets and system items live here too; persisted data only ever
//! references them by id.

use std::collections::HashSet;

use crate::model::{
    ClockConfig, HeroEffect, HeroOverlay, IconRef, InternalView, Item, ItemId, ItemKind,
    ItemSize, ItemTarget, ItemVisual, ShortcutRecord, WidgetStyle,
};

pub const SYSTEM_SETTINGS_ID: &str = "system.settings";
pub const CLOCK_WIDGET_ID: &str = "clock";
pub const CALENDAR_WIDGET_ID: &str = "calendar";
pub const STATUS_WIDGET_ID: &str = "system-status";

const DEFAULT_SHORTCUT_COLOR: &str = "#3b82f6";
const DEFAULT_SHORTCUT_ICON: &str = "globe";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetDescriptor {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub default_size: ItemSize,
}

const WIDGET_REGISTRY: [WidgetDescriptor; 3] = [
    WidgetDescriptor {
        id: CLOCK_WIDGET_ID,
        title: "Clock",
        description: "Current time",
        icon: "clock",
        color: "#0f172a",
        default_size: ItemSize::Large,
    },
    WidgetDescriptor {
        id: CALENDAR_WIDGET_ID,
        title: "Calendar",
        description: "Today's date",
        icon: "calendar",
        color: "#7c2d12",
        default_size: ItemSize::Wide,
    },
    WidgetDescriptor {
        id: STATUS_WIDGET_ID,
        title: "System Status",
        description: "Desktop summary",
        icon: "activity",
        color: "#14532d",
        default_size: ItemSize::Wide,
    },
];

/// Widgets enabled on a first run.
pub const DEFAULT_ENABLED_WIDGETS: [&str; 2] = [CLOCK_WIDGET_ID, CALENDAR_WIDGET_ID];

pub fn widget_registry() -> &'static [WidgetDescriptor] {
    &WIDGET_REGISTRY
}

pub fn widget_descriptor(id: &str) -> Option<&'static WidgetDescriptor> {
    widget_registry().iter().find(|widget| widget.id == id)
}

pub fn system_items() -> Vec<Item> {
    vec![Item {
        id: ItemId::from(SYSTEM_SETTINGS_ID),
        size: ItemSize::Small,
        kind: ItemKind::System,
        style: WidgetStyle::Standard,
        title: "Settings".to_string(),
        description: "Apps, widgets, and backups".to_string(),
        visual: ItemVisual {
            icon: IconRef::Symbolic("settings".to_string()),
            color: "#475569".to_string(),
            hero: None,
        },
        target: ItemTarget::Internal(InternalView::Settings),
    }]
}

/// Runtime item for a registry widget. The clock's size comes from its own settings.
pub fn widget_item(widget: &WidgetDescriptor, clock: &ClockConfig) -> Item {
    let size = if widget.id == CLOCK_WIDGET_ID {
        clock.size()
    } else {
        widget.default_size
    };
    Item {
        id: ItemId::from(widget.id),
        size,
        kind: ItemKind::Widget,
        style: WidgetStyle::Standard,
        title: widget.title.to_string(),
        description: widget.description.to_string(),
        visual: ItemVisual {
            icon: IconRef::Symbolic(widget.icon.to_string()),
            color: widget.color.to_string(),
            hero: None,
        },
        target: ItemTarget::Internal(InternalView::Widget(widget.id.to_string())),
    }
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

fn hero_overlay(record: &ShortcutRecord) -> Option<HeroOverlay> {
    let icon_name = non_empty(record.hero_icon_name.as_deref())?;
    Some(HeroOverlay {
        icon_name: icon_name.to_string(),
        scale: record.hero_scale.unwrap_or(1.0),
        opacity: record.hero_opacity.unwrap_or(0.15).clamp(0.0, 1.0),
        offset_x: record.hero_offset_x.unwrap_or(0.0),
        offset_y: record.hero_offset_y.unwrap_or(0.0),
        rotation: record.hero_rotation.unwrap_or(0.0),
        effect: record
            .hero_effect
            .as_deref()
            .map(HeroEffect::from_token)
            .unwrap_or_default(),
        effect_intensity: record.hero_effect_intensity.unwrap_or(0.5),
    })
}

/// Size for a shortcut: its explicit grid size when present, else the default of its style.
///
/// An explicit but unrecognized size fails closed to 1x1.
pub fn shortcut_size(record: &ShortcutRecord) -> ItemSize {
    let style = WidgetStyle::from_token(record.widget_style.as_deref().unwrap_or_default());
    match non_empty(record.grid_size.as_deref()) {
        Some(raw) => ItemSize::from_token_or_default(raw),
        None => style.default_size(),
    }
}

pub fn shortcut_item(record: &ShortcutRecord) -> Item {
    let style = WidgetStyle::from_token(record.widget_style.as_deref().unwrap_or_default());
    let icon = match (
        non_empty(record.icon_url.as_deref()),
        non_empty(record.icon_name.as_deref()),
    ) {
        (Some(url), _) => IconRef::Remote(url.to_string()),
        (None, Some(name)) => IconRef::Symbolic(name.to_string()),
        (None, None) => IconRef::Symbolic(DEFAULT_SHORTCUT_ICON.to_string()),
    };
    let color = non_empty(Some(record.color.as_str()))
        .unwrap_or(DEFAULT_SHORTCUT_COLOR)
        .to_string();

    Item {
        id: ItemId::new(record.id.clone()),
        size: shortcut_size(record),
        kind: ItemKind::Shortcut,
        style,
        title: record.name.clone(),
        description: record.description.clone(),
        visual: ItemVisual {
            icon,
            color,
            hero: hero_overlay(record),
        },
        target: ItemTarget::External {
            url: record.url.clone(),
        },
    }
}

/// Flat runtime item list: system items, enabled widgets in their stored order, then shortcuts.
///
/// Unknown or repeated widget ids are skipped, as are shortcuts whose id is empty or already
/// taken.
pub fn build_runtime_items(
    shortcuts: &[ShortcutRecord],
    enabled_widgets: &[String],
    clock: &ClockConfig,
) -> Vec<Item> {
    let mut items = system_items();
    let mut seen: HashSet<String> = items.iter().map(|item| item.id.to_string()).collect();

    for widget_id in enabled_widgets {
        let Some(widget) = widget_descriptor(widget_id) else {
            continue;
        };
        if seen.insert(widget.id.to_string()) {
            items.push(widget_item(widget, clock));
        }
    }

    for record in shortcuts {
        if record.id.trim().is_empty() || !seen.insert(record.id.clone()) {
            continue;
        }
        items.push(shortcut_item(record));
    }
    items
}

pub fn current_item_ids(items: &[Item]) -> Vec<ItemId> {
    items.iter().map(|item| item.id.clone()).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(id: &str) -> ShortcutRecord {
        ShortcutRecord {
            id: id.to_string(),
            name: id.to_uppercase(),
            url: format!("https://{id}.example"),
            ..Default::default()
        }
    }

    #[test]
    fn shortcut_size_falls_back_to_widget_style() {
        let mut r = record("a");
        assert_eq!(shortcut_size(&r), ItemSize::Small);
        r.widget_style = Some("vertical".into());
        assert_eq!(shortcut_size(&r), ItemSize::Tall);
        r.widget_style = Some("horizontal".into());
        assert_eq!(shortcut_size(&r), ItemSize::Wide);
        r.widget_style = Some("status".into());
        assert_eq!(shortcut_size(&r), ItemSize::Wide);
        r.widget_style = Some("dropzone".into());
        assert_eq!(shortcut_size(&r), ItemSize::Wide);
        r.grid_size = Some("2x2".into());
        assert_eq!(shortcut_size(&r), ItemSize::Large);
        r.grid_size = Some("7x7".into());
        assert_eq!(shortcut_size(&r), ItemSize::Small);
        r.grid_size = Some("  ".into());
        assert_eq!(shortcut_size(&r), ItemSize::Wide);
    }

    #[test]
    fn clock_size_comes_from_clock_settings() {
        let mut clock = ClockConfig::default();
        let items = build_runtime_items(&[], &[CLOCK_WIDGET_ID.to_string()], &clock);
        assert_eq!(items[1].size, ItemSize::Large);

        clock.grid_size = "1x1".into();
        let items = build_runtime_items(&[], &[CLOCK_WIDGET_ID.to_string()], &clock);
        assert_eq!(items[1].id.as_str(), CLOCK_WIDGET_ID);
        assert_eq!(items[1].size, ItemSize::Small);
    }

    #[test]
    fn merge_orders_system_widgets_then_shortcuts_and_skips_junk() {
        let widgets = vec![
            STATUS_WIDGET_ID.to_string(),
            "weather-from-the-future".to_string(),
            CLOCK_WIDGET_ID.to_string(),
            STATUS_WIDGET_ID.to_string(),
        ];
        let shortcuts = vec![record("a"), record(""), record("b"), record("a")];
        let items = build_runtime_items(&shortcuts, &widgets, &ClockConfig::default());
        let ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![SYSTEM_SETTINGS_ID, STATUS_WIDGET_ID, CLOCK_WIDGET_ID, "a", "b"]
        );
        assert_eq!(items[0].kind, ItemKind::System);
        assert_eq!(items[1].kind, ItemKind::Widget);
        assert_eq!(items[3].kind, ItemKind::Shortcut);
    }

    #[test]
    fn shortcut_visuals_prefer_remote_icons_and_fill_defaults() {
        let mut r = record("a");
        let item = shortcut_item(&r);
        assert_eq!(item.visual.icon, IconRef::Symbolic(DEFAULT_SHORTCUT_ICON.into()));
        assert_eq!(item.visual.color, DEFAULT_SHORTCUT_COLOR);
        assert_eq!(item.visual.hero, None);

        r.icon_name = Some("music".into());
        r.icon_url = Some("https://cdn.example/icon.png".into());
        r.hero_icon_name = Some("rocket".into());
        r.hero_opacity = Some(4.0);
        r.hero_effect = Some("glow".into());
        let item = shortcut_item(&r);
        assert_eq!(
            item.visual.icon,
            IconRef::Remote("https://cdn.example/icon.png".into())
        );
        let hero = item.visual.hero.expect("hero overlay");
        assert_eq!(hero.opacity, 1.0);
        assert_eq!(hero.effect, HeroEffect::Glow);
        assert_eq!(
            item.target,
            ItemTarget::External {
                url: "https://a.example".into()
            }
        );
    }
}
