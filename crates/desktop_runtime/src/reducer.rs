//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use thiserror::Error;

use crate::{
    backup::{parse_backup, BackupImport},
    bento::{compute_layout, GridLayout},
    config::widget_descriptor,
    model::{
        ActiveWindow, ClockConfig, DesktopState, DockDragSession, InteractionState, ItemId,
        ItemTarget, InternalView, PersistedConfig, PointerPosition,
    },
    shortcuts::{next_shortcut_id, ShortcutDraft, ShortcutValidationError},
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Replace runtime state with configuration read from storage.
    Hydrate {
        /// Every persisted key, already defaulted.
        config: PersistedConfig,
    },
    /// Validate a shortcut editor draft and append it under a fresh id.
    AddShortcut {
        /// Editor contents.
        draft: ShortcutDraft,
    },
    /// Replace an existing shortcut, keeping its id and position.
    UpdateShortcut {
        /// Shortcut to replace.
        id: String,
        /// Editor contents.
        draft: ShortcutDraft,
    },
    /// Remove a shortcut and its arrangement entry together.
    DeleteShortcut {
        /// Shortcut to delete.
        id: String,
    },
    /// Toggle a registry widget.
    SetWidgetEnabled {
        /// Registry id.
        widget_id: String,
        /// Whether the widget should be on the desktop.
        enabled: bool,
    },
    /// Replace the clock widget settings.
    SetClockConfig {
        /// New settings.
        clock: ClockConfig,
    },
    /// Show an item in the single active window, replacing whatever was open.
    OpenItem {
        /// Item to open.
        item_id: ItemId,
    },
    /// Close the active window.
    CloseWindow,
    /// Start dragging a tile.
    BeginTileDrag {
        /// Tile under the pointer.
        item_id: ItemId,
    },
    /// The dragged tile is over a slot.
    HoverSlot {
        /// Slot under the pointer.
        target: SlotTarget,
        /// Column count at the time of the event.
        cols: usize,
    },
    /// The dragged tile was released over a slot.
    DropOnSlot {
        /// Slot under the pointer.
        target: SlotTarget,
        /// Column count at the time of the event.
        cols: usize,
    },
    /// The drag ended without a drop.
    CancelTileDrag,
    /// Start dragging the dock.
    BeginDockMove {
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Update an in-progress dock drag.
    UpdateDockMove {
        /// Current pointer position.
        pointer: PointerPosition,
        /// Viewport width in pixels.
        viewport_w: i32,
        /// Viewport height in pixels.
        viewport_h: i32,
    },
    /// End the dock drag and persist its position.
    EndDockMove,
    /// Restore a backup document.
    ImportBackup {
        /// Raw file or pasted text.
        raw: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Grid position named by a drag event, resolved against a layout packed at the event's column
/// count rather than whatever layout the view last rendered.
pub enum SlotTarget {
    /// An empty grid cell.
    Cell {
        /// Grid row.
        row: usize,
        /// Grid column, clamped to the last column.
        col: usize,
    },
    /// A cell of a rendered tile, as row and column offsets from its anchor.
    Tile {
        /// Tile under the pointer.
        item_id: ItemId,
        /// Rows below the anchor.
        row: usize,
        /// Columns right of the anchor.
        col: usize,
    },
}

impl SlotTarget {
    /// The anchor cell of `item_id`.
    pub fn anchor(item_id: ItemId) -> Self {
        Self::Tile {
            item_id,
            row: 0,
            col: 0,
        }
    }

    /// Slot index in `layout`, or `None` when the tile is no longer placed.
    pub fn resolve(&self, layout: &GridLayout) -> Option<usize> {
        match self {
            Self::Cell { row, col } => {
                Some(row * layout.cols + (*col).min(layout.cols.saturating_sub(1)))
            }
            Self::Tile { item_id, row, col } => {
                let placement = layout.placement_for(item_id)?;
                let row = (*row).min(placement.row_span.saturating_sub(1));
                let col = (*col).min(placement.col_span.saturating_sub(1));
                Some(placement.index + row * layout.cols + col)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the host to execute.
pub enum RuntimeEffect {
    PersistShortcuts,
    PersistEnabledWidgets,
    PersistLayoutOrder,
    PersistClock,
    PersistDock,
    /// Show a blocking message to the user.
    Alert(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions that reference missing items or carry invalid input.
pub enum ReducerError {
    #[error("shortcut `{0}` not found")]
    ShortcutNotFound(String),
    #[error("desktop item `{0}` not found")]
    ItemNotFound(String),
    #[error("unknown widget `{0}`")]
    UnknownWidget(String),
    #[error(transparent)]
    InvalidShortcut(#[from] ShortcutValidationError),
}

fn push_effect(effects: &mut Vec<RuntimeEffect>, effect: RuntimeEffect) {
    if !effects.contains(&effect) {
        effects.push(effect);
    }
}

/// Reconciles the arrangement with the current item set and schedules a write on change.
fn sync_layout(state: &mut DesktopState, effects: &mut Vec<RuntimeEffect>) {
    if !state.booted {
        return;
    }
    let items = state.items();
    if state.layout.sync(&items) {
        push_effect(effects, RuntimeEffect::PersistLayoutOrder);
    }
}

fn close_window_for(state: &mut DesktopState, id: &ItemId) {
    if state
        .active_window
        .as_ref()
        .is_some_and(|window| &window.item_id == id)
    {
        state.active_window = None;
    }
}

/// Applies a [`DesktopAction`] to the desktop runtime state and collects resulting side effects.
///
/// Every action ends with a layout reconciliation, so item additions and removals reach the
/// arrangement in the same transition that caused them.
///
/// # Errors
///
/// Returns a [`ReducerError`] when the action references a missing item or carries an invalid
/// shortcut draft. State is left untouched in that case.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::Hydrate { config } => {
            *state = DesktopState::from_persisted(config);
            *interaction = InteractionState::default();
        }
        DesktopAction::AddShortcut { draft } => {
            let record = draft.into_record(next_shortcut_id(), None)?;
            state.shortcuts.push(record);
            push_effect(&mut effects, RuntimeEffect::PersistShortcuts);
        }
        DesktopAction::UpdateShortcut { id, draft } => {
            let position = state
                .shortcuts
                .iter()
                .position(|record| record.id == id)
                .ok_or_else(|| ReducerError::ShortcutNotFound(id.clone()))?;
            let record = draft.into_record(id, Some(&state.shortcuts[position]))?;
            if let Some(window) = state.active_window.as_mut() {
                if window.item_id.as_str() == record.id {
                    window.title = record.name.clone();
                    window.target = ItemTarget::External {
                        url: record.url.clone(),
                    };
                }
            }
            state.shortcuts[position] = record;
            push_effect(&mut effects, RuntimeEffect::PersistShortcuts);
        }
        DesktopAction::DeleteShortcut { id } => {
            let before = state.shortcuts.len();
            state.shortcuts.retain(|record| record.id != id);
            if state.shortcuts.len() == before {
                return Err(ReducerError::ShortcutNotFound(id));
            }
            let item_id = ItemId::new(id);
            state.layout.remove(&item_id);
            close_window_for(state, &item_id);
            if interaction
                .tile_drag
                .session()
                .is_some_and(|session| session.source_id == item_id)
            {
                interaction.tile_drag.cancel();
            }
            push_effect(&mut effects, RuntimeEffect::PersistShortcuts);
            push_effect(&mut effects, RuntimeEffect::PersistLayoutOrder);
        }
        DesktopAction::SetWidgetEnabled { widget_id, enabled } => {
            let widget = widget_descriptor(&widget_id)
                .ok_or_else(|| ReducerError::UnknownWidget(widget_id.clone()))?;
            let is_enabled = state.enabled_widgets.iter().any(|id| id == widget.id);
            if enabled && !is_enabled {
                state.enabled_widgets.push(widget.id.to_string());
                push_effect(&mut effects, RuntimeEffect::PersistEnabledWidgets);
            } else if !enabled && is_enabled {
                state.enabled_widgets.retain(|id| id != widget.id);
                close_window_for(state, &ItemId::from(widget.id));
                push_effect(&mut effects, RuntimeEffect::PersistEnabledWidgets);
            }
        }
        DesktopAction::SetClockConfig { clock } => {
            if state.clock != clock {
                state.clock = clock;
                push_effect(&mut effects, RuntimeEffect::PersistClock);
            }
        }
        DesktopAction::OpenItem { item_id } => {
            let item = state
                .find_item(&item_id)
                .ok_or_else(|| ReducerError::ItemNotFound(item_id.to_string()))?;
            state.active_window = Some(ActiveWindow::for_item(&item));
        }
        DesktopAction::CloseWindow => {
            state.active_window = None;
        }
        DesktopAction::BeginTileDrag { item_id } => {
            let item = state
                .find_item(&item_id)
                .ok_or_else(|| ReducerError::ItemNotFound(item_id.to_string()))?;
            interaction.tile_drag.begin(&item);
        }
        DesktopAction::HoverSlot { target, cols } => {
            if interaction.tile_drag.is_active() {
                let layout = compute_layout(&state.ordered_items(), cols);
                if let Some(index) = target.resolve(&layout) {
                    interaction.tile_drag.hover(index, &layout);
                }
            }
        }
        DesktopAction::DropOnSlot { target, cols } => {
            let layout = compute_layout(&state.ordered_items(), cols);
            let instruction = match target.resolve(&layout) {
                Some(index) => interaction.tile_drag.drop_at(index, &layout),
                None => {
                    interaction.tile_drag.cancel();
                    None
                }
            };
            if let Some(instruction) = instruction {
                if state.layout.apply(&instruction) {
                    push_effect(&mut effects, RuntimeEffect::PersistLayoutOrder);
                }
            }
        }
        DesktopAction::CancelTileDrag => {
            interaction.tile_drag.cancel();
        }
        DesktopAction::BeginDockMove { pointer } => {
            interaction.dock_drag = Some(DockDragSession {
                pointer_start: pointer,
                dock_start: state.dock,
            });
        }
        DesktopAction::UpdateDockMove {
            pointer,
            viewport_w,
            viewport_h,
        } => {
            if let Some(session) = interaction.dock_drag {
                let dx = pointer.x - session.pointer_start.x;
                let dy = pointer.y - session.pointer_start.y;
                let mut next = session.dock_start;
                next.x += dx;
                next.y += dy;
                state.dock = next.clamped(viewport_w, viewport_h);
            }
        }
        DesktopAction::EndDockMove => {
            if interaction.dock_drag.take().is_some() {
                push_effect(&mut effects, RuntimeEffect::PersistDock);
            }
        }
        DesktopAction::ImportBackup { raw } => {
            let import = match parse_backup(&raw) {
                Ok(import) => import,
                Err(err) => {
                    effects.push(RuntimeEffect::Alert(err.to_string()));
                    return Ok(effects);
                }
            };
            interaction.tile_drag.cancel();
            state.active_window = None;
            match import {
                BackupImport::Legacy { apps } => {
                    state.shortcuts = apps;
                    state.layout.reset();
                }
                BackupImport::Full {
                    apps,
                    widgets,
                    layout,
                } => {
                    state.shortcuts = apps;
                    if let Some(widgets) = widgets {
                        state.enabled_widgets = widgets;
                        push_effect(&mut effects, RuntimeEffect::PersistEnabledWidgets);
                    }
                    if let Some(layout) = layout {
                        state.layout.replace(layout);
                        push_effect(&mut effects, RuntimeEffect::PersistLayoutOrder);
                    }
                }
            }
            push_effect(&mut effects, RuntimeEffect::PersistShortcuts);
            sync_layout(state, &mut effects);
            effects.push(RuntimeEffect::Alert("Backup restored".to_string()));
            return Ok(effects);
        }
    }

    sync_layout(state, &mut effects);
    Ok(effects)
}

/// Whether the active window shows the internal settings view.
pub fn settings_open(state: &DesktopState) -> bool {
    matches!(
        state.active_window.as_ref().map(|window| &window.target),
        Some(ItemTarget::Internal(InternalView::Settings))
    )
}

#[cfg(test)]
mod tests {
    use platform_host::{MemoryPrefsStore, APPS_KEY, LAYOUT_ORDER_KEY};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::{
        config::{CLOCK_WIDGET_ID, SYSTEM_SETTINGS_ID},
        drag::DragPhase,
        grid::dimensions,
        model::{DockPosition, ItemSize, ShortcutRecord},
        persistence::{load_persisted_config, persist_effect},
    };

    fn record(id: &str) -> ShortcutRecord {
        ShortcutRecord {
            id: id.to_string(),
            name: id.to_uppercase(),
            url: format!("https://{id}.example"),
            ..Default::default()
        }
    }

    fn config(shortcuts: Vec<ShortcutRecord>, widgets: &[&str]) -> PersistedConfig {
        PersistedConfig {
            shortcuts,
            enabled_widgets: widgets.iter().map(|id| id.to_string()).collect(),
            layout_order: None,
            clock: ClockConfig::default(),
            dock: DockPosition::default(),
        }
    }

    fn booted(shortcuts: Vec<ShortcutRecord>, widgets: &[&str]) -> (DesktopState, InteractionState) {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::Hydrate {
                config: config(shortcuts, widgets),
            },
        )
        .expect("hydrate");
        (state, interaction)
    }

    fn ids(order: &[ItemId]) -> Vec<&str> {
        order.iter().map(ItemId::as_str).collect()
    }

    fn run_effects(store: &MemoryPrefsStore, state: &DesktopState, effects: &[RuntimeEffect]) {
        for effect in effects {
            persist_effect(store, state, effect).expect("persist");
        }
    }

    #[test]
    fn first_hydrate_materializes_an_initial_order() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::Hydrate {
                config: config(vec![record("a")], &["calendar", CLOCK_WIDGET_ID]),
            },
        )
        .expect("hydrate");
        assert_eq!(effects, vec![RuntimeEffect::PersistLayoutOrder]);
        assert_eq!(
            ids(state.layout.order()),
            vec![SYSTEM_SETTINGS_ID, CLOCK_WIDGET_ID, "calendar", "a"]
        );
    }

    #[test]
    fn hydrate_with_a_current_order_writes_nothing() {
        let mut cfg = config(vec![record("a")], &[]);
        cfg.layout_order = Some(vec!["a".into(), SYSTEM_SETTINGS_ID.into()]);
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::Hydrate { config: cfg },
        )
        .expect("hydrate");
        assert!(effects.is_empty());
        assert_eq!(ids(state.layout.order()), vec!["a", SYSTEM_SETTINGS_ID]);
    }

    #[test]
    fn actions_before_boot_do_not_materialize_an_order() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let effects = reduce_desktop(&mut state, &mut interaction, DesktopAction::CloseWindow)
            .expect("close");
        assert!(effects.is_empty());
        assert!(!state.layout.is_materialized());
    }

    #[test]
    fn added_shortcuts_are_appended_to_the_arrangement() {
        let (mut state, mut interaction) = booted(vec![record("a")], &[]);
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::AddShortcut {
                draft: ShortcutDraft {
                    name: "Docs".into(),
                    url: "docs.rs".into(),
                    ..Default::default()
                },
            },
        )
        .expect("add");
        assert_eq!(
            effects,
            vec![RuntimeEffect::PersistShortcuts, RuntimeEffect::PersistLayoutOrder]
        );
        let added = state.shortcuts.last().expect("new shortcut");
        assert_eq!(added.url, "https://docs.rs");
        assert_eq!(state.layout.order().last().map(ItemId::as_str), Some(added.id.as_str()));
    }

    #[test]
    fn invalid_drafts_are_rejected_without_partial_saves() {
        let (mut state, mut interaction) = booted(vec![record("a")], &[]);
        let before = state.clone();
        let err = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::AddShortcut {
                draft: ShortcutDraft {
                    name: "No url".into(),
                    ..Default::default()
                },
            },
        )
        .expect_err("missing url");
        assert_eq!(
            err,
            ReducerError::InvalidShortcut(ShortcutValidationError::MissingUrl)
        );
        assert_eq!(state, before);
    }

    #[test]
    fn deleting_a_shortcut_removes_it_from_shortcuts_and_persisted_order() {
        let store = MemoryPrefsStore::default();
        let (mut state, mut interaction) = booted(vec![record("a"), record("b")], &[]);
        run_effects(&store, &state, &[
            RuntimeEffect::PersistShortcuts,
            RuntimeEffect::PersistLayoutOrder,
        ]);
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::OpenItem { item_id: "a".into() },
        )
        .expect("open");

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::DeleteShortcut { id: "a".into() },
        )
        .expect("delete");
        assert_eq!(
            effects,
            vec![RuntimeEffect::PersistShortcuts, RuntimeEffect::PersistLayoutOrder]
        );
        run_effects(&store, &state, &effects);

        assert_eq!(state.active_window, None);
        assert_eq!(ids(state.layout.order()), vec![SYSTEM_SETTINGS_ID, "b"]);
        let reloaded = load_persisted_config(&store, 1280, 800);
        assert_eq!(reloaded.shortcuts, vec![record("b")]);
        assert_eq!(
            reloaded.layout_order,
            Some(vec![ItemId::from(SYSTEM_SETTINGS_ID), ItemId::from("b")])
        );
    }

    #[test]
    fn deleting_a_shortcut_removes_every_record_with_that_id() {
        let (mut state, mut interaction) = booted(vec![record("a"), record("b"), record("a")], &[]);
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::DeleteShortcut { id: "a".into() },
        )
        .expect("delete");
        assert_eq!(state.shortcuts, vec![record("b")]);
        assert_eq!(ids(state.layout.order()), vec![SYSTEM_SETTINGS_ID, "b"]);
    }

    #[test]
    fn imported_duplicate_ids_do_not_resurface_after_delete() {
        let (mut state, mut interaction) = booted(vec![], &[]);
        let raw = json!([
            {"id": "a", "name": "first", "url": "https://a.example"},
            {"id": "b", "name": "B", "url": "https://b.example"},
            {"id": "a", "name": "second", "url": "https://a2.example"}
        ])
        .to_string();
        reduce_desktop(&mut state, &mut interaction, DesktopAction::ImportBackup { raw })
            .expect("import");
        assert_eq!(state.shortcuts.len(), 2);
        assert_eq!(state.shortcuts[0].name, "first");

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::DeleteShortcut { id: "a".into() },
        )
        .expect("delete");
        assert!(state.shortcuts.iter().all(|record| record.id != "a"));
        assert_eq!(ids(state.layout.order()), vec![SYSTEM_SETTINGS_ID, "b"]);
    }

    #[test]
    fn deleting_an_unknown_shortcut_is_an_error() {
        let (mut state, mut interaction) = booted(vec![record("a")], &[]);
        assert_eq!(
            reduce_desktop(
                &mut state,
                &mut interaction,
                DesktopAction::DeleteShortcut { id: "zzz".into() },
            ),
            Err(ReducerError::ShortcutNotFound("zzz".into()))
        );
    }

    #[test]
    fn widget_toggles_reconcile_the_arrangement() {
        let (mut state, mut interaction) = booted(vec![record("a")], &[]);
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::SetWidgetEnabled {
                widget_id: "calendar".into(),
                enabled: true,
            },
        )
        .expect("enable");
        assert_eq!(
            effects,
            vec![RuntimeEffect::PersistEnabledWidgets, RuntimeEffect::PersistLayoutOrder]
        );
        assert_eq!(ids(state.layout.order()), vec![SYSTEM_SETTINGS_ID, "a", "calendar"]);

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::SetWidgetEnabled {
                widget_id: "calendar".into(),
                enabled: true,
            },
        )
        .expect("enable again");
        assert!(effects.is_empty());

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::SetWidgetEnabled {
                widget_id: "calendar".into(),
                enabled: false,
            },
        )
        .expect("disable");
        assert_eq!(ids(state.layout.order()), vec![SYSTEM_SETTINGS_ID, "a"]);

        assert_eq!(
            reduce_desktop(
                &mut state,
                &mut interaction,
                DesktopAction::SetWidgetEnabled {
                    widget_id: "stocks".into(),
                    enabled: true,
                },
            ),
            Err(ReducerError::UnknownWidget("stocks".into()))
        );
    }

    #[test]
    fn shrinking_the_clock_shrinks_its_footprint_without_reordering() {
        let (mut state, mut interaction) = booted(Vec::new(), &[CLOCK_WIDGET_ID]);
        let order_before = state.layout.order().to_vec();
        let clock_cells = |state: &DesktopState| {
            let layout = compute_layout(&state.ordered_items(), 4);
            let placement = layout
                .placement_for(&CLOCK_WIDGET_ID.into())
                .expect("clock placed")
                .clone();
            placement.row_span * placement.col_span
        };
        assert_eq!(clock_cells(&state), 4);

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::SetClockConfig {
                clock: ClockConfig {
                    grid_size: "1x1".into(),
                    ..ClockConfig::default()
                },
            },
        )
        .expect("resize clock");
        assert_eq!(effects, vec![RuntimeEffect::PersistClock]);
        assert_eq!(clock_cells(&state), 1);
        assert_eq!(state.layout.order(), order_before.as_slice());
        assert_eq!(dimensions(state.clock.size()), (1, 1));
    }

    #[test]
    fn tile_drag_flows_through_the_reducer() {
        let mut wide = record("b");
        wide.grid_size = Some(ItemSize::Wide.token().into());
        let (mut state, mut interaction) = booted(vec![record("a"), wide, record("c")], &[]);
        state.layout.replace(vec![
            SYSTEM_SETTINGS_ID.into(),
            "a".into(),
            "b".into(),
            "c".into(),
        ]);
        // settings(0) a(1) b(2..3) / c(4)
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginTileDrag { item_id: "c".into() },
        )
        .expect("begin");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::HoverSlot {
                target: SlotTarget::Cell { row: 0, col: 1 },
                cols: 4,
            },
        )
        .expect("hover");
        assert_eq!(interaction.tile_drag.phase(), DragPhase::Hovering { index: 1 });

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::DropOnSlot {
                target: SlotTarget::Cell { row: 0, col: 1 },
                cols: 4,
            },
        )
        .expect("drop");
        assert_eq!(effects, vec![RuntimeEffect::PersistLayoutOrder]);
        assert_eq!(ids(state.layout.order()), vec![SYSTEM_SETTINGS_ID, "c", "a", "b"]);
        assert!(!interaction.tile_drag.is_active());
    }

    #[test]
    fn tile_targets_resolve_against_the_event_column_count() {
        let mut wide = record("b");
        wide.grid_size = Some(ItemSize::Wide.token().into());
        let (mut state, mut interaction) = booted(vec![record("a"), wide, record("c")], &[]);
        state.layout.replace(vec![
            SYSTEM_SETTINGS_ID.into(),
            "a".into(),
            "b".into(),
            "c".into(),
        ]);
        // 4 cols: settings(0) a(1) b(2..3) / c(4)
        // 3 cols: settings(0) a(1) _ / b(3..4) c(5)
        let items = state.ordered_items();
        let four = compute_layout(&items, 4);
        let three = compute_layout(&items, 3);
        let c = SlotTarget::anchor("c".into());
        assert_eq!(c.resolve(&four), Some(4));
        assert_eq!(c.resolve(&three), Some(5));
        let b_right = SlotTarget::Tile {
            item_id: "b".into(),
            row: 0,
            col: 1,
        };
        assert_eq!(b_right.resolve(&three), Some(4));
        let clamped = SlotTarget::Tile {
            item_id: "b".into(),
            row: 3,
            col: 7,
        };
        assert_eq!(clamped.resolve(&three), Some(4));
        assert_eq!(SlotTarget::anchor("gone".into()).resolve(&three), None);
        assert_eq!(SlotTarget::Cell { row: 1, col: 3 }.resolve(&three), Some(5));

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginTileDrag { item_id: "a".into() },
        )
        .expect("begin");
        // The view last rendered at 4 columns; the viewport is now 3 wide.
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::HoverSlot { target: c, cols: 3 },
        )
        .expect("hover");
        assert_eq!(interaction.tile_drag.phase(), DragPhase::Hovering { index: 5 });
    }

    #[test]
    fn dropping_on_a_removed_tile_cancels_the_drag() {
        let (mut state, mut interaction) = booted(vec![record("a"), record("b")], &[]);
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginTileDrag { item_id: "a".into() },
        )
        .expect("begin");
        let order_before = state.layout.order().to_vec();
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::DropOnSlot {
                target: SlotTarget::anchor("gone".into()),
                cols: 4,
            },
        )
        .expect("drop");
        assert!(effects.is_empty());
        assert!(!interaction.tile_drag.is_active());
        assert_eq!(state.layout.order(), order_before.as_slice());
    }

    #[test]
    fn system_tiles_cannot_be_dragged_or_targeted() {
        let (mut state, mut interaction) = booted(vec![record("a")], &[]);
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginTileDrag {
                item_id: SYSTEM_SETTINGS_ID.into(),
            },
        )
        .expect("begin");
        assert!(!interaction.tile_drag.is_active());

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginTileDrag { item_id: "a".into() },
        )
        .expect("begin");
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::DropOnSlot {
                target: SlotTarget::Cell { row: 0, col: 0 },
                cols: 4,
            },
        )
        .expect("drop");
        assert!(effects.is_empty());
        assert_eq!(ids(state.layout.order()), vec![SYSTEM_SETTINGS_ID, "a"]);
    }

    #[test]
    fn dock_moves_are_clamped_and_persisted_once() {
        let (mut state, mut interaction) = booted(Vec::new(), &[]);
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginDockMove {
                pointer: PointerPosition { x: 30, y: 30 },
            },
        )
        .expect("begin");
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateDockMove {
                pointer: PointerPosition { x: 5000, y: 60 },
                viewport_w: 1000,
                viewport_h: 700,
            },
        )
        .expect("update");
        assert!(effects.is_empty());
        assert_eq!(state.dock.x, 1000 - crate::model::DOCK_WIDTH_PX);
        assert_eq!(state.dock.y, 54);

        let effects = reduce_desktop(&mut state, &mut interaction, DesktopAction::EndDockMove)
            .expect("end");
        assert_eq!(effects, vec![RuntimeEffect::PersistDock]);
        let effects = reduce_desktop(&mut state, &mut interaction, DesktopAction::EndDockMove)
            .expect("end again");
        assert!(effects.is_empty());
    }

    #[test]
    fn opening_items_replaces_the_single_active_window() {
        let (mut state, mut interaction) = booted(vec![record("a")], &[]);
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::OpenItem { item_id: "a".into() },
        )
        .expect("open a");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::OpenItem {
                item_id: SYSTEM_SETTINGS_ID.into(),
            },
        )
        .expect("open settings");
        assert!(settings_open(&state));
        assert_eq!(
            reduce_desktop(
                &mut state,
                &mut interaction,
                DesktopAction::OpenItem { item_id: "gone".into() },
            ),
            Err(ReducerError::ItemNotFound("gone".into()))
        );
        reduce_desktop(&mut state, &mut interaction, DesktopAction::CloseWindow).expect("close");
        assert_eq!(state.active_window, None);
    }

    #[test]
    fn legacy_import_resets_the_arrangement() {
        let mut cfg = config(vec![record("old1"), record("old2")], &[CLOCK_WIDGET_ID]);
        cfg.layout_order = Some(vec![
            "old2".into(),
            CLOCK_WIDGET_ID.into(),
            "old1".into(),
            SYSTEM_SETTINGS_ID.into(),
        ]);
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        reduce_desktop(&mut state, &mut interaction, DesktopAction::Hydrate { config: cfg })
            .expect("hydrate");

        let raw = json!([
            {"id": "new1", "name": "One", "url": "https://one.example"},
            {"id": "new2", "name": "Two", "url": "https://two.example", "gridSize": "2x2"}
        ])
        .to_string();
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ImportBackup { raw },
        )
        .expect("import");
        assert_eq!(
            effects,
            vec![
                RuntimeEffect::PersistShortcuts,
                RuntimeEffect::PersistLayoutOrder,
                RuntimeEffect::Alert("Backup restored".into()),
            ]
        );
        for old in ["old1", "old2"] {
            assert!(!state.layout.order().contains(&ItemId::from(old)));
        }
        // Fresh priority order rather than the old arrangement.
        assert_eq!(
            ids(state.layout.order()),
            vec![SYSTEM_SETTINGS_ID, CLOCK_WIDGET_ID, "new2", "new1"]
        );
    }

    #[test]
    fn full_import_restores_apps_widgets_and_layout_together() {
        let (mut state, mut interaction) = booted(vec![record("a")], &[]);
        let raw = json!({
            "apps": [record("x"), record("y")],
            "widgets": ["calendar"],
            "layout": ["y", "calendar", SYSTEM_SETTINGS_ID, "x"],
            "timestamp": 1
        })
        .to_string();
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ImportBackup { raw },
        )
        .expect("import");
        assert_eq!(
            effects,
            vec![
                RuntimeEffect::PersistEnabledWidgets,
                RuntimeEffect::PersistLayoutOrder,
                RuntimeEffect::PersistShortcuts,
                RuntimeEffect::Alert("Backup restored".into()),
            ]
        );
        assert_eq!(state.enabled_widgets, vec!["calendar"]);
        assert_eq!(
            ids(state.layout.order()),
            vec!["y", "calendar", SYSTEM_SETTINGS_ID, "x"]
        );
    }

    #[test]
    fn failed_imports_leave_state_and_storage_untouched() {
        let store = MemoryPrefsStore::default();
        let (mut state, mut interaction) = booted(vec![record("a")], &["calendar"]);
        run_effects(&store, &state, &[
            RuntimeEffect::PersistShortcuts,
            RuntimeEffect::PersistEnabledWidgets,
            RuntimeEffect::PersistLayoutOrder,
        ]);
        let state_before = state.clone();
        let storage_before = store.snapshot();

        for (raw, message) in [
            ("{\"apps\": [", "Failed to parse backup file"),
            ("{\"widgets\": []}", "Invalid backup format"),
        ] {
            let effects = reduce_desktop(
                &mut state,
                &mut interaction,
                DesktopAction::ImportBackup { raw: raw.into() },
            )
            .expect("import never errors");
            assert_eq!(effects.len(), 1);
            let RuntimeEffect::Alert(alert) = &effects[0] else {
                panic!("expected an alert, got {effects:?}");
            };
            assert!(alert.starts_with(message), "{alert}");
            run_effects(&store, &state, &effects);
        }

        assert_eq!(state, state_before);
        assert_eq!(store.snapshot(), storage_before);
        assert!(store.snapshot().contains_key(APPS_KEY));
        assert!(store.snapshot().contains_key(LAYOUT_ORDER_KEY));
    }

    #[test]
    fn updating_a_shortcut_keeps_its_position_and_refreshes_the_open_window() {
        let (mut state, mut interaction) = booted(vec![record("a"), record("b")], &[]);
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::OpenItem { item_id: "a".into() },
        )
        .expect("open");
        let mut draft = ShortcutDraft::from_record(&state.shortcuts[0]);
        draft.name = "Renamed".into();
        draft.grid_size = Some(ItemSize::Large);
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateShortcut {
                id: "a".into(),
                draft,
            },
        )
        .expect("update");
        assert_eq!(effects, vec![RuntimeEffect::PersistShortcuts]);
        assert_eq!(state.shortcuts[0].id, "a");
        assert_eq!(state.shortcuts[0].name, "Renamed");
        assert_eq!(
            state.active_window.as_ref().map(|window| window.title.as_str()),
            Some("Renamed")
        );
        let item = state.find_item(&"a".into()).expect("item");
        assert_eq!(item.size, ItemSize::Large);
    }
}
