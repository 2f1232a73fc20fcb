//! Fixed three-pane split: one large pane on the left, two stacked on the
//! right.

use griffin_common::Rect;

use crate::layout::split_rect;
use crate::tree::Direction;

pub const GRID_SLOT_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotLayout {
    pub gap: u32,
    /// Share of the width given to the primary pane.
    pub primary_ratio: f64,
}

impl Default for SlotLayout {
    fn default() -> Self {
        Self {
            gap: 4,
            primary_ratio: 0.6,
        }
    }
}

impl SlotLayout {
    pub fn compute(&self, region: Rect) -> [Rect; GRID_SLOT_COUNT] {
        let gap = self.gap as f64;
        let ratio = self.primary_ratio.clamp(0.1, 0.9);
        let (primary, side) = split_rect(region, Direction::Horizontal, ratio, gap);
        let (top, bottom) = split_rect(side, Direction::Vertical, 0.5, gap);
        [primary, top, bottom]
    }
}
