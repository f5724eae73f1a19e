//! Bento grid layout pass: turns ordered items plus a column count into explicit grid positions.
//!
//! Items are packed in order. Each item is anchored at the first slot at or after the previous
//! item's anchor where its footprint fits without wrapping or overlapping, so the visual order
//! always follows the layout order. Slots left uncovered render as empty placeholders.

use crate::{
    grid::{can_place, dimensions, footprint_indices, slot_position},
    model::{Item, ItemId, ItemKind, WidgetStyle},
};

/// One positioned item. Rows and columns are zero-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub id: ItemId,
    pub kind: ItemKind,
    pub index: usize,
    pub row: usize,
    pub col: usize,
    pub row_span: usize,
    pub col_span: usize,
}

impl Placement {
    /// CSS `grid-area` value (`row-start / col-start / span rows / span cols`).
    pub fn grid_area(&self) -> String {
        format!(
            "{} / {} / span {} / span {}",
            self.row + 1,
            self.col + 1,
            self.row_span,
            self.col_span
        )
    }
}

/// What covers a slot. Payloads index into [`GridLayout::placements`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOccupant {
    Empty,
    /// The top-left cell of a placement.
    Anchor(usize),
    /// Any other cell of a placement's footprint.
    Interior(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    pub cols: usize,
    pub total_slots: usize,
    pub placements: Vec<Placement>,
    slots: Vec<SlotOccupant>,
}

/// Render list entry: either a positioned item or an empty placeholder slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCell {
    Item(Placement),
    Empty { index: usize, row: usize, col: usize },
}

impl GridLayout {
    pub fn rows(&self) -> usize {
        self.total_slots / self.cols.max(1)
    }

    pub fn occupant(&self, index: usize) -> SlotOccupant {
        self.slots.get(index).copied().unwrap_or(SlotOccupant::Empty)
    }

    /// Placement covering `index`, anchor or interior.
    pub fn owner_at(&self, index: usize) -> Option<&Placement> {
        match self.occupant(index) {
            SlotOccupant::Empty => None,
            SlotOccupant::Anchor(p) | SlotOccupant::Interior(p) => self.placements.get(p),
        }
    }

    pub fn placement_for(&self, id: &ItemId) -> Option<&Placement> {
        self.placements.iter().find(|placement| &placement.id == id)
    }

    /// First placement anchored after `index`, skipping `exclude`.
    pub fn first_anchor_after(&self, index: usize, exclude: &ItemId) -> Option<&Placement> {
        self.placements
            .iter()
            .filter(|placement| &placement.id != exclude && placement.index > index)
            .min_by_key(|placement| placement.index)
    }

    pub fn empty_slots(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, occupant)| matches!(occupant, SlotOccupant::Empty))
            .map(|(index, _)| index)
            .collect()
    }

    /// Items and empty placeholders in slot order; interior cells are omitted.
    pub fn cells(&self) -> Vec<GridCell> {
        let mut cells = Vec::with_capacity(self.total_slots);
        for (index, occupant) in self.slots.iter().enumerate() {
            match occupant {
                SlotOccupant::Anchor(p) => {
                    if let Some(placement) = self.placements.get(*p) {
                        cells.push(GridCell::Item(placement.clone()));
                    }
                }
                SlotOccupant::Empty => {
                    let (row, col) = slot_position(index, self.cols);
                    cells.push(GridCell::Empty { index, row, col });
                }
                SlotOccupant::Interior(_) => {}
            }
        }
        cells
    }
}

fn cells_free(occupied: &[bool], index: usize, width: usize, height: usize, cols: usize) -> bool {
    footprint_indices(index, width, height, cols)
        .into_iter()
        .all(|cell| !occupied.get(cell).copied().unwrap_or(false))
}

/// Lays out `items` (already in layout order) on a `cols`-wide grid.
///
/// Tiles wider than the grid are narrowed to `cols`. Capacity is at least
/// `ceil(total footprint area / cols)` rows and grows when packing gaps need more.
pub fn compute_layout(items: &[Item], cols: usize) -> GridLayout {
    let cols = cols.max(1);
    let mut occupied: Vec<bool> = Vec::new();
    let mut placements = Vec::with_capacity(items.len());
    let mut cursor = 0usize;
    let mut area = 0usize;

    for item in items {
        let (w, h) = dimensions(item.size);
        let w = w.min(cols);
        area += w * h;

        let mut index = cursor;
        loop {
            let reach = index + (h - 1) * cols + w;
            if occupied.len() < reach {
                occupied.resize(reach, false);
            }
            // Unbounded capacity here; only the row-edge half of the check can fail.
            if can_place(index, w, h, cols, usize::MAX) && cells_free(&occupied, index, w, h, cols)
            {
                break;
            }
            index += 1;
        }

        for cell in footprint_indices(index, w, h, cols) {
            occupied[cell] = true;
        }
        let (row, col) = slot_position(index, cols);
        placements.push(Placement {
            id: item.id.clone(),
            kind: item.kind,
            index,
            row,
            col,
            row_span: h,
            col_span: w,
        });
        cursor = index;
    }

    let used_rows = placements
        .iter()
        .map(|placement| placement.row + placement.row_span)
        .max()
        .unwrap_or(0);
    let rows = area.div_ceil(cols).max(used_rows).max(1);
    let total_slots = rows * cols;

    let mut slots = vec![SlotOccupant::Empty; total_slots];
    for (p, placement) in placements.iter().enumerate() {
        for cell in footprint_indices(placement.index, placement.col_span, placement.row_span, cols)
        {
            if let Some(slot) = slots.get_mut(cell) {
                *slot = if cell == placement.index {
                    SlotOccupant::Anchor(p)
                } else {
                    SlotOccupant::Interior(p)
                };
            }
        }
    }

    GridLayout {
        cols,
        total_slots,
        placements,
        slots,
    }
}

/// Closed set of tile renderings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileLayout {
    IconTile,
    StatusCard,
    HeroCard,
    Custom(String),
}

pub fn tile_layout(item: &Item) -> TileLayout {
    match item.kind {
        ItemKind::Widget => TileLayout::Custom(item.id.as_str().to_string()),
        ItemKind::System => TileLayout::IconTile,
        ItemKind::Shortcut if item.style == WidgetStyle::Status => TileLayout::StatusCard,
        ItemKind::Shortcut if !item.size.is_small() && item.visual.hero.is_some() => {
            TileLayout::HeroCard
        }
        ItemKind::Shortcut => TileLayout::IconTile,
    }
}
