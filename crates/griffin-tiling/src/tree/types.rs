//! Core types for the mosaic tree: Direction and MosaicNode.

use griffin_common::TabId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Children side by side.
    Horizontal,
    /// Children stacked top to bottom.
    Vertical,
}

/// Binary-split mosaic. Leaves reference tabs by id only; the tab may no
/// longer exist, in which case the leaf renders a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MosaicNode {
    Leaf {
        tab_id: TabId,
    },
    Split {
        direction: Direction,
        ratio: f64,
        first: Box<MosaicNode>,
        second: Box<MosaicNode>,
    },
}

impl MosaicNode {
    pub fn leaf(tab_id: impl Into<TabId>) -> Self {
        MosaicNode::Leaf {
            tab_id: tab_id.into(),
        }
    }

    pub fn split_h(first: MosaicNode, second: MosaicNode) -> Self {
        MosaicNode::Split {
            direction: Direction::Horizontal,
            ratio: 0.5,
            first: Box::new(first),
            second: Box::new(second),
        }
    }

    pub fn split_v(first: MosaicNode, second: MosaicNode) -> Self {
        MosaicNode::Split {
            direction: Direction::Vertical,
            ratio: 0.5,
            first: Box::new(first),
            second: Box::new(second),
        }
    }

    /// Initial layout for a freshly opened grid: nothing, a single leaf,
    /// or the first two candidates side by side.
    pub fn initial(candidates: &[TabId]) -> Option<Self> {
        match candidates {
            [] => None,
            [only] => Some(MosaicNode::leaf(only.clone())),
            [a, b, ..] => Some(MosaicNode::split_h(
                MosaicNode::leaf(a.clone()),
                MosaicNode::leaf(b.clone()),
            )),
        }
    }

    pub fn pane_count(&self) -> usize {
        match self {
            MosaicNode::Leaf { .. } => 1,
            MosaicNode::Split { first, second, .. } => first.pane_count() + second.pane_count(),
        }
    }

    pub fn contains_tab(&self, id: &TabId) -> bool {
        match self {
            MosaicNode::Leaf { tab_id } => tab_id == id,
            MosaicNode::Split { first, second, .. } => {
                first.contains_tab(id) || second.contains_tab(id)
            }
        }
    }

    /// Collect all tab ids in left-to-right (depth-first) order.
    pub fn collect_tab_ids(&self) -> Vec<TabId> {
        let mut ids = Vec::new();
        self.collect_ids_into(&mut ids);
        ids
    }

    fn collect_ids_into(&self, out: &mut Vec<TabId>) {
        match self {
            MosaicNode::Leaf { tab_id } => out.push(tab_id.clone()),
            MosaicNode::Split { first, second, .. } => {
                first.collect_ids_into(out);
                second.collect_ids_into(out);
            }
        }
    }
}
