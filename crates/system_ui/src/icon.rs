//! Centralized symbolic icon set.
//!
//! Persisted shortcuts name icons by string; [`IconName::from_token`] maps unknown names to
//! [`IconName::Globe`] so stale data still renders.

use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Symbolic icons available to tiles, the dock, and settings controls.
pub enum IconName {
    /// Gear.
    Settings,
    /// Globe, also the fallback for unknown names.
    Globe,
    /// Clock face.
    Clock,
    /// Calendar page.
    Calendar,
    /// Pulse line.
    Activity,
    /// Open book.
    Book,
    /// Music note.
    Music,
    /// Rocket.
    Rocket,
    /// House.
    Home,
    /// Cross.
    Close,
    /// Plus sign.
    Plus,
    /// Trash can.
    Trash,
    /// Pencil.
    Edit,
    /// Arrow into a tray.
    Download,
    /// Arrow out of a tray.
    Upload,
    /// Six-dot drag handle.
    Grip,
}

impl IconName {
    /// Every icon, in picker order.
    pub const ALL: [IconName; 16] = [
        Self::Settings,
        Self::Globe,
        Self::Clock,
        Self::Calendar,
        Self::Activity,
        Self::Book,
        Self::Music,
        Self::Rocket,
        Self::Home,
        Self::Close,
        Self::Plus,
        Self::Trash,
        Self::Edit,
        Self::Download,
        Self::Upload,
        Self::Grip,
    ];

    /// Stable persisted token.
    pub fn token(self) -> &'static str {
        match self {
            Self::Settings => "settings",
            Self::Globe => "globe",
            Self::Clock => "clock",
            Self::Calendar => "calendar",
            Self::Activity => "activity",
            Self::Book => "book",
            Self::Music => "music",
            Self::Rocket => "rocket",
            Self::Home => "home",
            Self::Close => "close",
            Self::Plus => "plus",
            Self::Trash => "trash",
            Self::Edit => "edit",
            Self::Download => "download",
            Self::Upload => "upload",
            Self::Grip => "grip",
        }
    }

    /// Parses a persisted token, falling back to [`IconName::Globe`].
    pub fn from_token(raw: &str) -> Self {
        let raw = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|icon| icon.token() == raw)
            .unwrap_or(Self::Globe)
    }

    fn path(self) -> &'static str {
        match self {
            Self::Settings => "M12 8a4 4 0 1 0 0 8a4 4 0 1 0 0-8zM12 2v3M12 19v3M2 12h3M19 12h3M4.9 4.9l2.1 2.1M17 17l2.1 2.1M4.9 19.1L7 17M17 7l2.1-2.1",
            Self::Globe => "M12 2a10 10 0 1 0 0 20a10 10 0 1 0 0-20zM2 12h20M12 2c3 3 3 17 0 20M12 2c-3 3-3 17 0 20",
            Self::Clock => "M12 2a10 10 0 1 0 0 20a10 10 0 1 0 0-20zM12 6v6l4 2",
            Self::Calendar => "M4 5h16v15H4zM4 10h16M8 3v4M16 3v4",
            Self::Activity => "M2 12h4l3-8l6 16l3-8h4",
            Self::Book => "M4 4h6a2 2 0 0 1 2 2v14a2 2 0 0 0-2-2H4zM20 4h-6a2 2 0 0 0-2 2v14a2 2 0 0 1 2-2h6z",
            Self::Music => "M9 18V5l12-2v13M9 18a3 3 0 1 1-6 0a3 3 0 1 1 6 0M21 16a3 3 0 1 1-6 0a3 3 0 1 1 6 0",
            Self::Rocket => "M12 2c4 3 5 8 4 13h-8C7 10 8 5 12 2zM8 15l-3 4h4M16 15l3 4h-4M12 8v2",
            Self::Home => "M3 11l9-8l9 8M5 10v10h14V10M10 20v-6h4v6",
            Self::Close => "M6 6l12 12M18 6L6 18",
            Self::Plus => "M12 5v14M5 12h14",
            Self::Trash => "M4 7h16M9 7V4h6v3M6 7l1 13h10l1-13",
            Self::Edit => "M4 20h4L19 9l-4-4L4 16zM14 6l4 4",
            Self::Download => "M12 3v12M7 10l5 5l5-5M4 19h16",
            Self::Upload => "M12 15V3M7 8l5-5l5 5M4 19h16",
            Self::Grip => "M9 6h.01M15 6h.01M9 12h.01M15 12h.01M9 18h.01M15 18h.01",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Rendered icon sizes.
pub enum IconSize {
    /// 16px.
    Sm,
    /// 24px.
    #[default]
    Md,
    /// 40px.
    Lg,
    /// 96px, used by hero overlays.
    Xl,
}

impl IconSize {
    /// Edge length in CSS pixels.
    pub fn px(self) -> u32 {
        match self {
            Self::Sm => 16,
            Self::Md => 24,
            Self::Lg => 40,
            Self::Xl => 96,
        }
    }

    fn token(self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
        }
    }
}

#[component]
/// Inline SVG icon.
pub fn Icon(
    icon: IconName,
    #[prop(optional)] size: IconSize,
    #[prop(optional, into)] style: Option<String>,
) -> impl IntoView {
    let px = size.px();
    view! {
        <svg
            class="ui-icon"
            width=px
            height=px
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            aria-hidden="true"
            style=style
            data-ui-primitive="true"
            data-ui-kind="icon"
            data-ui-icon=icon.token()
            data-ui-size=size.token()
        >
            <path d=icon.path()></path>
        </svg>
    }
}
