//! Tile drag-reorder state machine, independent of the pointer/DOM event transport.
//!
//! `Idle -> Dragging -> Hovering* -> (drop | cancel) -> Idle`. Every hover and drop is evaluated
//! against a [`GridLayout`] the caller builds from the *current* column count, so a viewport
//! resize mid-drag is always honored. A drop re-validates instead of trusting the last hover.

use crate::{
    bento::{GridLayout, SlotOccupant},
    grid::{can_place, dimensions, footprint_indices},
    layout_order::{DropTarget, MoveInstruction},
    model::{Item, ItemId, ItemKind},
};

/// Live drag gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub source_id: ItemId,
    /// Declared `(width, height)` of the source; narrowed to the grid at evaluation time.
    pub footprint: (usize, usize),
    pub hovered_index: Option<usize>,
    pub is_valid_placement: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
    Hovering { index: usize },
}

/// How an empty or occupied slot should be tinted while a drag is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotHighlight {
    None,
    /// Some drag is in progress.
    Subdued,
    /// Part of the hovered footprint, which is a valid drop.
    Strong,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DragReorderController {
    session: Option<DragSession>,
}

impl DragReorderController {
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn phase(&self) -> DragPhase {
        match &self.session {
            None => DragPhase::Idle,
            Some(DragSession {
                hovered_index: Some(index),
                ..
            }) => DragPhase::Hovering { index: *index },
            Some(_) => DragPhase::Dragging,
        }
    }

    /// Starts dragging `item`. System items stay put; returns whether a session started.
    pub fn begin(&mut self, item: &Item) -> bool {
        if !item.kind.is_draggable() {
            return false;
        }
        self.session = Some(DragSession {
            source_id: item.id.clone(),
            footprint: dimensions(item.size),
            hovered_index: None,
            is_valid_placement: false,
        });
        true
    }

    /// Records the slot under the pointer and whether dropping there would be accepted.
    pub fn hover(&mut self, index: usize, layout: &GridLayout) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let valid = evaluate_drop(layout, &session.source_id, session.footprint, index).is_some();
        session.hovered_index = Some(index);
        session.is_valid_placement = valid;
        valid
    }

    /// Ends the session with a drop on `index`.
    ///
    /// Returns the reorder to apply, or `None` for an invalid drop, which is a silent cancel.
    pub fn drop_at(&mut self, index: usize, layout: &GridLayout) -> Option<MoveInstruction> {
        let session = self.session.take()?;
        let target = evaluate_drop(layout, &session.source_id, session.footprint, index)?;
        Some(MoveInstruction {
            source: session.source_id,
            target,
        })
    }

    /// Ends the session without touching the order.
    pub fn cancel(&mut self) {
        self.session = None;
    }

    /// Slots the strong "drop here" highlight covers: the hovered footprint when it is valid.
    pub fn highlighted_slots(&self, layout: &GridLayout) -> Vec<usize> {
        let Some(DragSession {
            source_id,
            footprint,
            hovered_index: Some(index),
            ..
        }) = self.session.as_ref()
        else {
            return Vec::new();
        };
        if evaluate_drop(layout, source_id, *footprint, *index).is_none() {
            return Vec::new();
        }
        let (w, h) = narrowed(*footprint, layout.cols);
        footprint_indices(*index, w, h, layout.cols)
            .into_iter()
            .collect()
    }

    pub fn highlight(&self, index: usize, layout: &GridLayout) -> SlotHighlight {
        if self.session.is_none() {
            SlotHighlight::None
        } else if self.highlighted_slots(layout).contains(&index) {
            SlotHighlight::Strong
        } else {
            SlotHighlight::Subdued
        }
    }
}

fn narrowed((w, h): (usize, usize), cols: usize) -> (usize, usize) {
    (w.min(cols.max(1)), h)
}

/// Decides where `source` would land if dropped on slot `index`; `None` rejects the drop.
///
/// A drop is accepted when the footprint fits the grid, the slot is not the interior of another
/// tile, the tile anchored there (if any) is not a system item, and every covered slot is free
/// or belongs to the source or that anchored tile. Dropping on another tile's anchor inserts
/// before it; dropping anywhere else inserts before the next tile anchored after `index`.
pub fn evaluate_drop(
    layout: &GridLayout,
    source: &ItemId,
    footprint: (usize, usize),
    index: usize,
) -> Option<DropTarget> {
    let (w, h) = narrowed(footprint, layout.cols);
    if !can_place(index, w, h, layout.cols, layout.total_slots) {
        return None;
    }

    let target = match layout.occupant(index) {
        SlotOccupant::Empty => None,
        SlotOccupant::Anchor(p) => {
            let owner = layout.placements.get(p)?;
            if &owner.id == source {
                None
            } else if owner.kind == ItemKind::System {
                return None;
            } else {
                Some(owner.id.clone())
            }
        }
        SlotOccupant::Interior(p) => {
            if &layout.placements.get(p)?.id != source {
                return None;
            }
            None
        }
    };

    let blocked = footprint_indices(index, w, h, layout.cols)
        .into_iter()
        .filter_map(|cell| layout.owner_at(cell))
        .any(|owner| &owner.id != source && Some(&owner.id) != target.as_ref());
    if blocked {
        return None;
    }

    Some(match target {
        Some(target) => DropTarget::Before(target),
        None => layout
            .first_anchor_after(index, source)
            .map(|next| DropTarget::Before(next.id.clone()))
            .unwrap_or(DropTarget::End),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        bento::{compute_layout, tests::tile},
        layout_order::LayoutOrderStore,
        model::ItemSize,
    };

    fn abc() -> Vec<Item> {
        vec![
            tile("a", ItemSize::Small),
            tile("b", ItemSize::Wide),
            tile("c", ItemSize::Small),
        ]
    }

    #[test]
    fn system_items_cannot_be_dragged() {
        let mut settings = tile("system.settings", ItemSize::Small);
        settings.kind = ItemKind::System;
        let mut drag = DragReorderController::default();
        assert!(!drag.begin(&settings));
        assert_eq!(drag.phase(), DragPhase::Idle);
    }

    #[test]
    fn dropping_inside_another_footprint_is_rejected_but_own_slot_is_free() {
        let items = abc();
        let layout = compute_layout(&items, 4);
        let mut drag = DragReorderController::default();

        assert!(drag.begin(&items[2]));
        assert_eq!(drag.phase(), DragPhase::Dragging);
        assert!(!drag.hover(2, &layout));
        assert_eq!(drag.phase(), DragPhase::Hovering { index: 2 });
        assert!(drag.hover(3, &layout));

        let instruction = drag.drop_at(3, &layout).expect("slot 3 accepts c");
        assert_eq!(instruction.target, DropTarget::End);
        assert_eq!(drag.phase(), DragPhase::Idle);

        let mut order = LayoutOrderStore::new(Some(vec!["a".into(), "b".into(), "c".into()]));
        assert!(!order.apply(&instruction));
        assert_eq!(
            order.order(),
            &[ItemId::from("a"), ItemId::from("b"), ItemId::from("c")]
        );
    }

    #[test]
    fn invalid_drop_is_a_silent_cancel() {
        let items = abc();
        let layout = compute_layout(&items, 4);
        let mut drag = DragReorderController::default();
        drag.begin(&items[2]);
        assert_eq!(drag.drop_at(2, &layout), None);
        assert!(!drag.is_active());
    }

    #[test]
    fn drop_revalidates_instead_of_trusting_hover() {
        let items = abc();
        let mut drag = DragReorderController::default();
        drag.begin(&items[1]);
        // Valid on a wide grid...
        let wide = compute_layout(&items, 6);
        assert!(drag.hover(4, &wide));
        // ...but the viewport shrank before the drop landed.
        let narrow = compute_layout(&items, 4);
        assert_eq!(drag.drop_at(3, &narrow), None);
    }

    #[test]
    fn dropping_on_an_anchor_moves_before_that_item() {
        let items = abc();
        let layout = compute_layout(&items, 4);
        let mut drag = DragReorderController::default();
        drag.begin(&items[2]);
        assert_eq!(
            drag.drop_at(0, &layout),
            Some(MoveInstruction {
                source: "c".into(),
                target: DropTarget::Before("a".into()),
            })
        );
    }

    #[test]
    fn wide_source_cannot_cover_a_bystander() {
        let items = abc();
        let layout = compute_layout(&items, 4);
        // Footprint over slots 2..=3 would cover b's interior and c.
        assert_eq!(evaluate_drop(&layout, &"a".into(), (2, 1), 2), None);
        // b onto a's anchor covers a and b itself.
        assert_eq!(
            evaluate_drop(&layout, &"b".into(), (2, 1), 0),
            Some(DropTarget::Before("a".into()))
        );
        // Row edge.
        assert_eq!(evaluate_drop(&layout, &"b".into(), (2, 1), 3), None);
    }

    #[test]
    fn system_tiles_are_never_drop_targets() {
        let mut items = abc();
        items[0].kind = ItemKind::System;
        let layout = compute_layout(&items, 4);
        assert_eq!(evaluate_drop(&layout, &"c".into(), (1, 1), 0), None);
    }

    #[test]
    fn empty_slot_inserts_before_the_next_anchor() {
        let items = vec![
            tile("a", ItemSize::Small),
            tile("b", ItemSize::Small),
            tile("c", ItemSize::Small),
            tile("wide", ItemSize::Wide),
            tile("d", ItemSize::Small),
        ];
        // a b c _ / wide d _
        let layout = compute_layout(&items, 4);
        assert_eq!(
            evaluate_drop(&layout, &"a".into(), (1, 1), 3),
            Some(DropTarget::Before("wide".into()))
        );
        assert_eq!(
            evaluate_drop(&layout, &"a".into(), (1, 1), 7),
            Some(DropTarget::End)
        );
    }

    #[test]
    fn highlights_only_cover_a_valid_hovered_footprint() {
        let items = abc();
        let layout = compute_layout(&items, 4);
        let mut drag = DragReorderController::default();
        assert_eq!(drag.highlight(3, &layout), SlotHighlight::None);

        drag.begin(&items[1]);
        drag.hover(0, &layout);
        assert_eq!(drag.highlighted_slots(&layout), vec![0, 1]);
        assert_eq!(drag.highlight(1, &layout), SlotHighlight::Strong);
        assert_eq!(drag.highlight(3, &layout), SlotHighlight::Subdued);

        drag.hover(3, &layout);
        assert!(drag.highlighted_slots(&layout).is_empty());
        assert_eq!(drag.highlight(3, &layout), SlotHighlight::Subdued);

        drag.cancel();
        assert_eq!(drag.highlight(3, &layout), SlotHighlight::None);
    }
}
