use leptos::{ev::DragEvent, *};
use system_ui::{BentoGridSurface, BentoTileFrame, EmptySlot, SlotTone, TileKind};
use wasm_bindgen::JsCast;

use super::tiles::TileBody;
use crate::{
    bento::{compute_layout, tile_layout, GridCell, GridLayout, Placement, TileLayout},
    drag::SlotHighlight,
    model::Item,
    reducer::{DesktopAction, SlotTarget},
    runtime_context::{use_desktop_runtime, DesktopRuntimeContext},
};

const DRAG_MIME: &str = "text/plain";

fn slot_tone(highlight: SlotHighlight) -> SlotTone {
    match highlight {
        SlotHighlight::None => SlotTone::Idle,
        SlotHighlight::Subdued => SlotTone::Subdued,
        SlotHighlight::Strong => SlotTone::Strong,
    }
}

fn tile_kind(layout: &TileLayout) -> TileKind {
    match layout {
        TileLayout::IconTile => TileKind::Icon,
        TileLayout::StatusCard => TileKind::Status,
        TileLayout::HeroCard => TileKind::Hero,
        TileLayout::Custom(_) => TileKind::Widget,
    }
}

/// Which of `span` equal cells along an `extent`-long edge contains `offset`.
fn cell_along(offset: f64, extent: f64, span: usize) -> usize {
    if span <= 1 || !extent.is_finite() || extent <= 0.0 {
        return 0;
    }
    let cell = (offset / extent * span as f64).floor();
    cell.clamp(0.0, (span - 1) as f64) as usize
}

/// Cell of `placement` under the pointer, as row and column offsets from its anchor.
fn cell_under_pointer(placement: &Placement, ev: &DragEvent) -> (usize, usize) {
    let Some(element) = ev
        .current_target()
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
    else {
        return (0, 0);
    };
    let rect = element.get_bounding_client_rect();
    let row = cell_along(
        f64::from(ev.client_y()) - rect.top(),
        rect.height(),
        placement.row_span,
    );
    let col = cell_along(
        f64::from(ev.client_x()) - rect.left(),
        rect.width(),
        placement.col_span,
    );
    (row, col)
}

/// Drop target for a drag over a tile: the anchor of another tile, or the exact cell when the
/// pointer is over the dragged tile itself.
fn tile_target(
    runtime: DesktopRuntimeContext,
    placement: &Placement,
    ev: &DragEvent,
) -> SlotTarget {
    let over_source = runtime.interaction.with_untracked(|ui| {
        ui.tile_drag
            .session()
            .is_some_and(|session| session.source_id == placement.id)
    });
    if !over_source {
        return SlotTarget::anchor(placement.id.clone());
    }
    let (row, col) = cell_under_pointer(placement, ev);
    SlotTarget::Tile {
        item_id: placement.id.clone(),
        row,
        col,
    }
}

fn hover_slot(
    runtime: DesktopRuntimeContext,
    last_hover: StoredValue<Option<(SlotTarget, usize)>>,
    target: SlotTarget,
) {
    let cols = runtime.live_cols();
    let hovering = runtime.interaction.with_untracked(|ui| {
        ui.tile_drag
            .session()
            .is_some_and(|session| session.hovered_index.is_some())
    });
    let key = (target, cols);
    if hovering && last_hover.with_value(|last| last.as_ref() == Some(&key)) {
        return;
    }
    let target = key.0.clone();
    last_hover.set_value(Some(key));
    runtime.dispatch_action(DesktopAction::HoverSlot { target, cols });
}

fn drop_on_slot(runtime: DesktopRuntimeContext, target: SlotTarget) {
    runtime.dispatch_action(DesktopAction::DropOnSlot {
        target,
        cols: runtime.live_cols(),
    });
}

#[component]
/// Packs the ordered items onto the responsive grid and wires tile drag-reorder.
pub(super) fn BentoGrid() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let interaction = runtime.interaction;

    let items = create_memo(move |_| state.with(|desktop| desktop.ordered_items()));
    let cols = Signal::derive(move || runtime.cols());
    let layout = create_memo(move |_| items.with(|items| compute_layout(items, cols.get())));
    let rows = Signal::derive(move || layout.with(GridLayout::rows));
    let dragging = Signal::derive(move || interaction.with(|ui| ui.tile_drag.is_active()));
    let last_hover = store_value(None::<(SlotTarget, usize)>);

    let tone_at = move |index: usize| {
        Signal::derive(move || {
            interaction.with(|ui| {
                layout.with(|layout| slot_tone(ui.tile_drag.highlight(index, layout)))
            })
        })
    };

    let render_tile = move |placement: Placement, item: Item| {
        let index = placement.index;
        let item_id = item.id.clone();
        let area = placement.grid_area();
        let draggable = item.kind.is_draggable();
        let body_layout = tile_layout(&item);
        let lifted = {
            let item_id = item_id.clone();
            Signal::derive(move || {
                interaction.with(|ui| {
                    ui.tile_drag
                        .session()
                        .is_some_and(|session| session.source_id == item_id)
                })
            })
        };
        let on_activate = {
            let item_id = item_id.clone();
            Callback::new(move |_| {
                runtime.dispatch_action(DesktopAction::OpenItem {
                    item_id: item_id.clone(),
                })
            })
        };
        let on_drag_start = {
            let item_id = item_id.clone();
            Callback::new(move |ev: DragEvent| {
                if let Some(transfer) = ev.data_transfer() {
                    transfer.set_effect_allowed("move");
                    let _ = transfer.set_data(DRAG_MIME, item_id.as_str());
                }
                runtime.dispatch_action(DesktopAction::BeginTileDrag {
                    item_id: item_id.clone(),
                });
            })
        };
        let over_placement = placement.clone();
        let on_drag_over = Callback::new(move |ev: DragEvent| {
            if !runtime.interaction.with_untracked(|ui| ui.tile_drag.is_active()) {
                return;
            }
            ev.prevent_default();
            hover_slot(runtime, last_hover, tile_target(runtime, &over_placement, &ev));
        });
        let drop_placement = placement;
        let on_drop = Callback::new(move |ev: DragEvent| {
            ev.prevent_default();
            drop_on_slot(runtime, tile_target(runtime, &drop_placement, &ev));
        });
        let on_drag_end = Callback::new(move |_| {
            runtime.dispatch_action(DesktopAction::CancelTileDrag);
        });

        view! {
            <BentoTileFrame
                grid_area=Signal::derive(move || area.clone())
                kind=tile_kind(&body_layout)
                accent=item.visual.color.clone()
                aria_label=item.title.clone()
                draggable
                tone=tone_at(index)
                lifted
                on_activate
                on_drag_start
                on_drag_over
                on_drop
                on_drag_end
            >
                <TileBody item=item.clone() layout=body_layout.clone() />
            </BentoTileFrame>
        }
    };

    let render_empty = move |index: usize, row: usize, col: usize| {
        let on_drag_over = Callback::new(move |ev: DragEvent| {
            if !runtime.interaction.with_untracked(|ui| ui.tile_drag.is_active()) {
                return;
            }
            ev.prevent_default();
            hover_slot(runtime, last_hover, SlotTarget::Cell { row, col });
        });
        let on_drop = Callback::new(move |ev: DragEvent| {
            ev.prevent_default();
            drop_on_slot(runtime, SlotTarget::Cell { row, col });
        });
        view! {
            <EmptySlot
                grid_area=format!("{} / {} / span 1 / span 1", row + 1, col + 1)
                tone=tone_at(index)
                on_drag_over
                on_drop
            />
        }
    };

    view! {
        <BentoGridSurface cols rows dragging>
            {move || {
                let cells = layout.with(GridLayout::cells);
                let items = items.get();
                cells
                    .into_iter()
                    .map(|cell| match cell {
                        GridCell::Item(placement) => items
                            .iter()
                            .find(|item| item.id == placement.id)
                            .cloned()
                            .map(|item| render_tile(placement, item).into_view())
                            .unwrap_or_else(|| ().into_view()),
                        GridCell::Empty { index, row, col } => {
                            render_empty(index, row, col).into_view()
                        }
                    })
                    .collect_view()
            }}
        </BentoGridSurface>
    }
}
