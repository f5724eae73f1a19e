//! Pure bento grid geometry: footprint sizes, placement validity, and occupied slot sets.
//!
//! Slots are numbered in row-major order for a grid of `cols` columns, so slot `index` sits at
//! row `index / cols`, column `index % cols`.

use std::collections::BTreeSet;

use crate::model::ItemSize;

/// Column breakpoints as `(max viewport width exclusive, columns)`.
const COLUMN_BREAKPOINTS: [(i32, usize); 3] = [(640, 4), (1024, 6), (1440, 8)];
const WIDEST_COLUMNS: usize = 10;

/// Footprint of `size` as `(width, height)` in grid cells.
pub const fn dimensions(size: ItemSize) -> (usize, usize) {
    match size {
        ItemSize::Small => (1, 1),
        ItemSize::Wide => (2, 1),
        ItemSize::Tall => (1, 2),
        ItemSize::Large => (2, 2),
        ItemSize::Banner => (4, 2),
    }
}

/// Footprint of a raw persisted size token; unrecognized tokens occupy a single cell.
pub fn dimensions_for_token(raw: &str) -> (usize, usize) {
    ItemSize::from_token(raw).map(dimensions).unwrap_or((1, 1))
}

/// Row and column of slot `index`.
pub fn slot_position(index: usize, cols: usize) -> (usize, usize) {
    let cols = cols.max(1);
    (index / cols, index % cols)
}

/// Whether a `width` x `height` tile anchored at `index` fits a `cols`-wide grid of
/// `total_slots` slots.
///
/// A tile must not wrap past the row edge and must not run off the end of the slot array.
pub fn can_place(
    index: usize,
    width: usize,
    height: usize,
    cols: usize,
    total_slots: usize,
) -> bool {
    if cols == 0 || width == 0 || height == 0 {
        return false;
    }
    let col = index % cols;
    if col + width > cols {
        return false;
    }
    let last = index + (height - 1) * cols + (width - 1);
    last < total_slots
}

/// Every slot a tile anchored at `index` covers.
///
/// Only meaningful after [`can_place`] accepted the placement; see [`placement_footprint`].
pub fn footprint_indices(index: usize, width: usize, height: usize, cols: usize) -> BTreeSet<usize> {
    (0..height)
        .flat_map(|dy| (0..width).map(move |dx| index + dy * cols + dx))
        .collect()
}

/// Footprint of a checked placement; invalid placements cover nothing.
pub fn placement_footprint(
    index: usize,
    width: usize,
    height: usize,
    cols: usize,
    total_slots: usize,
) -> BTreeSet<usize> {
    if can_place(index, width, height, cols, total_slots) {
        footprint_indices(index, width, height, cols)
    } else {
        BTreeSet::new()
    }
}

/// Responsive column count for a viewport `width_px` wide.
pub fn columns_for_viewport(width_px: i32) -> usize {
    COLUMN_BREAKPOINTS
        .iter()
        .find(|(max_width, _)| width_px < *max_width)
        .map(|(_, cols)| *cols)
        .unwrap_or(WIDEST_COLUMNS)
}
