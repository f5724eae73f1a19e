//! Shared shell and control primitives.

use leptos::ev::{DragEvent, MouseEvent, PointerEvent};
use leptos::*;

use crate::{Icon, IconName, IconSize};

mod controls;
mod shell;

pub use controls::{Button, FieldGroup, SelectField, Switch, TextArea, TextField};
pub use shell::{
    BentoGridSurface, BentoTileFrame, DesktopBackdrop, DesktopRoot, Dock, DockButton, EmptySlot,
    WindowPanel,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Semantic button variants.
pub enum ButtonVariant {
    /// Neutral action.
    #[default]
    Standard,
    /// Main action of a form.
    Primary,
    /// Destructive action.
    Danger,
    /// Chrome-less action.
    Quiet,
}

impl ButtonVariant {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Primary => "primary",
            Self::Danger => "danger",
            Self::Quiet => "quiet",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Drag feedback tone for a grid slot.
pub enum SlotTone {
    /// No drag in progress.
    #[default]
    Idle,
    /// A drag is in progress elsewhere.
    Subdued,
    /// Part of a valid hovered drop footprint.
    Strong,
}

impl SlotTone {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Subdued => "subdued",
            Self::Strong => "strong",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Tile body layouts understood by the shell stylesheet.
pub enum TileKind {
    /// Icon and caption.
    Icon,
    /// Wide status card.
    Status,
    /// Card with a decorative oversized icon.
    Hero,
    /// Widget-rendered body.
    Widget,
}

impl TileKind {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Icon => "icon",
            Self::Status => "status",
            Self::Hero => "hero",
            Self::Widget => "widget",
        }
    }
}

pub(crate) fn merge_layout_class(base: &'static str, layout_class: Option<&'static str>) -> String {
    match layout_class {
        Some(layout_class) if !layout_class.is_empty() => format!("{base} {layout_class}"),
        _ => base.to_string(),
    }
}

pub(crate) fn bool_token(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
