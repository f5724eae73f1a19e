//! Shared UI primitive library for the bento desktop shell.
//!
//! The crate owns reusable Leptos primitives, a centralized icon API, and the
//! stable `data-ui-*` DOM contract consumed by the desktop shell CSS layers.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod icon;
mod primitives;

pub use icon::{Icon, IconName, IconSize};
pub use primitives::{
    BentoGridSurface, BentoTileFrame, Button, ButtonVariant, DesktopBackdrop, DesktopRoot, Dock,
    DockButton, EmptySlot, FieldGroup, SelectField, SlotTone, Switch, TextArea, TextField,
    TileKind, WindowPanel,
};

/// Convenience imports for crates consuming the shared primitive set.
pub mod prelude {
    pub use crate::{
        BentoGridSurface, BentoTileFrame, Button, ButtonVariant, DesktopBackdrop, DesktopRoot,
        Dock, DockButton, EmptySlot, FieldGroup, Icon, IconName, IconSize, SelectField, SlotTone,
        Switch, TextArea, TextField, TileKind, WindowPanel,
    };
}
