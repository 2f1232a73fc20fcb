//! Grid slot bindings, mosaic layouts and the global multi-view overlay.

use griffin_common::TabId;
use griffin_tiling::{MosaicNode, GRID_SLOT_COUNT};

use super::TabRegistry;
use crate::record::{GridMode, SlotBindings, SlotView};

impl TabRegistry {
    /// Ids of normal tabs, in strip order.
    pub fn surface_tab_ids(&self) -> Vec<TabId> {
        self.tabs
            .iter()
            .filter(|t| t.owns_surface())
            .map(|t| t.id.clone())
            .collect()
    }

    /// Bind a slot of a grid tab. A tab already bound in another slot of
    /// the same grid moves to the new slot.
    pub fn set_grid_slot(&mut self, grid_id: &TabId, slot: usize, tab: Option<TabId>) -> bool {
        if slot >= GRID_SLOT_COUNT {
            return false;
        }
        let Some(layout) = self.get_mut(grid_id).and_then(|r| r.grid_mut()) else {
            return false;
        };
        bind_slot(&mut layout.slots, slot, tab);
        true
    }

    pub fn set_grid_mode(&mut self, grid_id: &TabId, mode: GridMode) -> bool {
        match self.get_mut(grid_id).and_then(|r| r.grid_mut()) {
            Some(layout) => {
                layout.mode = mode;
                true
            }
            None => false,
        }
    }

    pub fn set_mosaic(&mut self, grid_id: &TabId, mosaic: Option<MosaicNode>) -> bool {
        match self.get_mut(grid_id).and_then(|r| r.grid_mut()) {
            Some(layout) => {
                layout.mosaic = mosaic;
                true
            }
            None => false,
        }
    }

    /// Resolve a binding against the active collection. Trashed or
    /// non-surface tabs resolve to `Unavailable`.
    pub fn resolve_binding(&self, binding: Option<&TabId>) -> SlotView {
        match binding {
            None => SlotView::Empty,
            Some(id) => match self.get(id) {
                Some(record) if record.owns_surface() => SlotView::Bound(id.clone()),
                _ => SlotView::Unavailable(id.clone()),
            },
        }
    }

    pub fn resolve_slots(&self, slots: &SlotBindings) -> [SlotView; GRID_SLOT_COUNT] {
        std::array::from_fn(|i| self.resolve_binding(slots[i].as_ref()))
    }

    pub fn multi_view_open(&self) -> bool {
        self.multi_view.open
    }

    pub fn multi_view_slots(&self) -> &SlotBindings {
        &self.multi_view.slots
    }

    /// Flip the overlay; returns the new state.
    pub fn toggle_multi_view(&mut self) -> bool {
        self.multi_view.open = !self.multi_view.open;
        self.multi_view.open
    }

    pub fn set_multi_view_slot(&mut self, slot: usize, tab: Option<TabId>) -> bool {
        if slot >= GRID_SLOT_COUNT {
            return false;
        }
        bind_slot(&mut self.multi_view.slots, slot, tab);
        true
    }
}

fn bind_slot(slots: &mut SlotBindings, slot: usize, tab: Option<TabId>) {
    if let Some(id) = &tab {
        for (i, bound) in slots.iter_mut().enumerate() {
            if i != slot && bound.as_ref() == Some(id) {
                *bound = None;
            }
        }
    }
    slots[slot] = tab;
}
