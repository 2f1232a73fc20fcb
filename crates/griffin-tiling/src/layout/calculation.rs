//! Recursive tree-to-rect computation.

use crate::tree::{Direction, MosaicNode};
use griffin_common::{Rect, TabId};

use super::LayoutEngine;

impl LayoutEngine {
    pub fn compute(&self, root: &MosaicNode, bounds: Rect) -> Vec<(TabId, Rect)> {
        let mut results = Vec::new();
        self.layout_node(root, bounds, &mut results);
        results
    }

    fn layout_node(&self, node: &MosaicNode, bounds: Rect, out: &mut Vec<(TabId, Rect)>) {
        match node {
            MosaicNode::Leaf { tab_id } => out.push((tab_id.clone(), bounds)),
            MosaicNode::Split {
                direction,
                ratio,
                first,
                second,
            } => {
                let (a, b) = split_rect(bounds, *direction, *ratio, self.gap as f64);
                self.layout_node(first, a, out);
                self.layout_node(second, b, out);
            }
        }
    }
}

/// Divide `bounds` in two along `direction`, leaving `gap` between them.
pub(crate) fn split_rect(bounds: Rect, direction: Direction, ratio: f64, gap: f64) -> (Rect, Rect) {
    match direction {
        Direction::Horizontal => {
            let available = (bounds.width - gap).max(0.0);
            let w1 = available * ratio;
            let w2 = (available - w1).max(0.0);
            (
                Rect::new(bounds.x, bounds.y, w1, bounds.height),
                Rect::new(bounds.x + w1 + gap, bounds.y, w2, bounds.height),
            )
        }
        Direction::Vertical => {
            let available = (bounds.height - gap).max(0.0);
            let h1 = available * ratio;
            let h2 = (available - h1).max(0.0);
            (
                Rect::new(bounds.x, bounds.y, bounds.width, h1),
                Rect::new(bounds.x, bounds.y + h1 + gap, bounds.width, h2),
            )
        }
    }
}
