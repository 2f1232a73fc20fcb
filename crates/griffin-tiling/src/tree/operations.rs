//! Mutating operations on the mosaic: split, remove, replace, swap, ratio.

use griffin_common::TabId;

use super::{Direction, MosaicNode};

impl MosaicNode {
    /// Split the leaf showing `target` into two panes, the existing tab in
    /// `first` and `new_tab` in `second`. Refuses when `new_tab` is already
    /// on screen, since one surface cannot be in two panes.
    pub fn split_at(&mut self, target: &TabId, new_tab: TabId, direction: Direction) -> bool {
        if self.contains_tab(&new_tab) {
            return false;
        }
        self.split_leaf(target, new_tab, direction)
    }

    fn split_leaf(&mut self, target: &TabId, new_tab: TabId, direction: Direction) -> bool {
        match self {
            MosaicNode::Leaf { tab_id } if tab_id == target => {
                *self = MosaicNode::Split {
                    direction,
                    ratio: 0.5,
                    first: Box::new(MosaicNode::leaf(target.clone())),
                    second: Box::new(MosaicNode::leaf(new_tab)),
                };
                true
            }
            MosaicNode::Leaf { .. } => false,
            MosaicNode::Split { first, second, .. } => {
                if first.contains_tab(target) {
                    first.split_leaf(target, new_tab, direction)
                } else {
                    second.split_leaf(target, new_tab, direction)
                }
            }
        }
    }

    /// Remove a pane; its sibling takes the parent's place. The last
    /// remaining leaf cannot be removed this way (the caller drops the
    /// whole tree instead).
    pub fn remove_leaf(&mut self, target: &TabId) -> bool {
        match self {
            MosaicNode::Leaf { .. } => false,
            MosaicNode::Split { first, second, .. } => {
                if matches!(first.as_ref(), MosaicNode::Leaf { tab_id } if tab_id == target) {
                    *self = *second.clone();
                    return true;
                }
                if matches!(second.as_ref(), MosaicNode::Leaf { tab_id } if tab_id == target) {
                    *self = *first.clone();
                    return true;
                }
                first.remove_leaf(target) || second.remove_leaf(target)
            }
        }
    }

    /// Point the pane showing `current` at `replacement` instead. If the
    /// replacement is already in another pane the two panes swap.
    pub fn replace_leaf(&mut self, current: &TabId, replacement: TabId) -> bool {
        if current == &replacement {
            return self.contains_tab(current);
        }
        if self.contains_tab(&replacement) {
            return self.swap_tabs(current, &replacement);
        }
        let mut replaced = false;
        self.for_each_leaf_mut(&mut |id: &mut TabId| {
            if !replaced && id == current {
                *id = replacement.clone();
                replaced = true;
            }
        });
        replaced
    }

    /// Swap two tabs in the tree. Both must exist for the swap to happen.
    pub fn swap_tabs(&mut self, a: &TabId, b: &TabId) -> bool {
        if !(self.contains_tab(a) && self.contains_tab(b)) {
            return false;
        }
        self.for_each_leaf_mut(&mut |id: &mut TabId| {
            if id == a {
                *id = b.clone();
            } else if id == b {
                *id = a.clone();
            }
        });
        true
    }

    fn for_each_leaf_mut(&mut self, f: &mut impl FnMut(&mut TabId)) {
        match self {
            MosaicNode::Leaf { tab_id } => f(tab_id),
            MosaicNode::Split { first, second, .. } => {
                first.for_each_leaf_mut(f);
                second.for_each_leaf_mut(f);
            }
        }
    }

    /// Adjust the split ratio at the parent of `target` by `delta`,
    /// clamped to [0.1, 0.9].
    pub fn adjust_ratio(&mut self, target: &TabId, delta: f64) -> bool {
        match self {
            MosaicNode::Leaf { .. } => false,
            MosaicNode::Split {
                ratio,
                first,
                second,
                ..
            } => {
                if matches!(first.as_ref(), MosaicNode::Leaf { tab_id } if tab_id == target) {
                    *ratio = (*ratio + delta).clamp(0.1, 0.9);
                    return true;
                }
                if matches!(second.as_ref(), MosaicNode::Leaf { tab_id } if tab_id == target) {
                    // Growing the second child shrinks the ratio
                    *ratio = (*ratio - delta).clamp(0.1, 0.9);
                    return true;
                }
                if first.contains_tab(target) {
                    first.adjust_ratio(target, delta)
                } else {
                    second.adjust_ratio(target, delta)
                }
            }
        }
    }
}
