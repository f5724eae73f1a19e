//! Canonical desktop arrangement: an ordered list of item ids reconciled against the live item
//! set.

use std::collections::HashSet;

use crate::{
    config::CLOCK_WIDGET_ID,
    grid::dimensions,
    model::{Item, ItemId, ItemKind},
};

/// Widgets placed right after system items on a first run.
const PINNED_WIDGET_IDS: [&str; 1] = [CLOCK_WIDGET_ID];

/// Where a dragged item lands in the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// Immediately before this item.
    Before(ItemId),
    /// After every other item.
    End,
}

/// Reorder request emitted by a successful drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveInstruction {
    pub source: ItemId,
    pub target: DropTarget,
}

/// Reconciles a persisted `order` against the `current` item ids.
///
/// Ids present in both keep their relative order, ids no longer configured are dropped, and
/// newcomers are appended in `current`'s enumeration order. Duplicates collapse to their first
/// occurrence.
pub fn reconcile(order: &[ItemId], current: &[ItemId]) -> Vec<ItemId> {
    let live: HashSet<&ItemId> = current.iter().collect();
    let mut seen = HashSet::with_capacity(current.len());
    let mut next = Vec::with_capacity(current.len());

    for id in order {
        if live.contains(id) && seen.insert(id) {
            next.push(id.clone());
        }
    }
    for id in current {
        if seen.insert(id) {
            next.push(id.clone());
        }
    }
    next
}

fn initial_rank(item: &Item) -> (u8, std::cmp::Reverse<usize>) {
    let (w, h) = dimensions(item.size);
    let tier = match item.kind {
        ItemKind::System => 0,
        _ if PINNED_WIDGET_IDS.contains(&item.id.as_str()) => 1,
        ItemKind::Widget => 2,
        ItemKind::Shortcut => 3,
    };
    (tier, std::cmp::Reverse(w * h))
}

/// First-run arrangement when nothing is persisted yet.
///
/// System items first, pinned widgets next, then remaining widgets before shortcuts, larger
/// footprints first within each tier. Ties keep enumeration order.
pub fn initial_order(items: &[Item]) -> Vec<ItemId> {
    let mut ranked: Vec<&Item> = items.iter().collect();
    ranked.sort_by_key(|item| initial_rank(item));
    let ids: Vec<ItemId> = ranked.into_iter().map(|item| item.id.clone()).collect();
    reconcile(&ids, &ids)
}

/// Moves `source` to sit immediately before `target`.
///
/// Returns `order` unchanged when the ids are equal or either is missing.
pub fn move_item(order: &[ItemId], source: &ItemId, target: &ItemId) -> Vec<ItemId> {
    if source == target || !order.contains(target) {
        return order.to_vec();
    }
    let Some(from) = order.iter().position(|id| id == source) else {
        return order.to_vec();
    };
    let mut next = order.to_vec();
    let moved = next.remove(from);
    let to = next.iter().position(|id| id == target).unwrap_or(next.len());
    next.insert(to, moved);
    next
}

/// Moves `source` behind every other item; unchanged when `source` is missing.
pub fn move_to_end(order: &[ItemId], source: &ItemId) -> Vec<ItemId> {
    let Some(from) = order.iter().position(|id| id == source) else {
        return order.to_vec();
    };
    let mut next = order.to_vec();
    let moved = next.remove(from);
    next.push(moved);
    next
}

/// Sorts `items` by `order`; items the order does not mention follow in their original order.
pub fn arrange(items: Vec<Item>, order: &[ItemId]) -> Vec<Item> {
    let mut remaining: Vec<Option<Item>> = items.into_iter().map(Some).collect();
    let mut arranged = Vec::with_capacity(remaining.len());
    for id in order {
        if let Some(slot) = remaining
            .iter_mut()
            .find(|slot| slot.as_ref().is_some_and(|item| &item.id == id))
        {
            arranged.extend(slot.take());
        }
    }
    arranged.extend(remaining.into_iter().flatten());
    arranged
}

/// Owner of the persisted arrangement.
///
/// `None` means no order has been materialized yet; the first [`LayoutOrderStore::sync`] then
/// applies [`initial_order`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayoutOrderStore {
    order: Option<Vec<ItemId>>,
}

impl LayoutOrderStore {
    pub fn new(order: Option<Vec<ItemId>>) -> Self {
        Self { order }
    }

    pub fn order(&self) -> &[ItemId] {
        self.order.as_deref().unwrap_or(&[])
    }

    pub fn is_materialized(&self) -> bool {
        self.order.is_some()
    }

    /// Forgets the arrangement so the next sync starts from [`initial_order`].
    pub fn reset(&mut self) {
        self.order = None;
    }

    /// Replaces the arrangement wholesale (backup restore).
    pub fn replace(&mut self, order: Vec<ItemId>) {
        self.order = Some(order);
    }

    /// Reconciles against the live item set. Returns `true` only when the stored order changed,
    /// so callers persist on mismatch alone.
    pub fn sync(&mut self, items: &[Item]) -> bool {
        let current: Vec<ItemId> = items.iter().map(|item| item.id.clone()).collect();
        let next = match self.order.as_deref() {
            Some(order) => reconcile(order, &current),
            None => initial_order(items),
        };
        if self.order.as_deref() == Some(next.as_slice()) {
            return false;
        }
        self.order = Some(next);
        true
    }

    /// Drops `id` from the arrangement. Returns `true` when it was present.
    pub fn remove(&mut self, id: &ItemId) -> bool {
        let Some(order) = self.order.as_mut() else {
            return false;
        };
        let before = order.len();
        order.retain(|existing| existing != id);
        order.len() != before
    }

    /// Applies a drop. Returns `true` when the order changed.
    pub fn apply(&mut self, instruction: &MoveInstruction) -> bool {
        let Some(order) = self.order.as_ref() else {
            return false;
        };
        let next = match &instruction.target {
            DropTarget::Before(target) => move_item(order, &instruction.source, target),
            DropTarget::End => move_to_end(order, &instruction.source),
        };
        if &next == order {
            return false;
        }
        self.order = Some(next);
        true
    }
}
