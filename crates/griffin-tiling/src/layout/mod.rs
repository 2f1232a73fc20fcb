mod calculation;
mod types;

pub(crate) use calculation::split_rect;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::MosaicNode;
    use griffin_common::{Rect, TabId};

    #[test]
    fn single_leaf_fills_bounds() {
        let engine = LayoutEngine { gap: 4 };
        let bounds = Rect::new(0.0, 0.0, 800.0, 600.0);
        let rects = engine.compute(&MosaicNode::leaf("a"), bounds);
        assert_eq!(rects, vec![(TabId::from("a"), bounds)]);
    }

    #[test]
    fn horizontal_split_subtracts_gap() {
        let engine = LayoutEngine { gap: 10 };
        let tree = MosaicNode::split_h(MosaicNode::leaf("a"), MosaicNode::leaf("b"));
        let rects = engine.compute(&tree, Rect::new(0.0, 0.0, 810.0, 600.0));
        assert_eq!(rects[0].1, Rect::new(0.0, 0.0, 400.0, 600.0));
        assert_eq!(rects[1].1, Rect::new(410.0, 0.0, 400.0, 600.0));
    }

    #[test]
    fn nested_vertical_split() {
        let engine = LayoutEngine { gap: 0 };
        let tree = MosaicNode::split_h(
            MosaicNode::leaf("a"),
            MosaicNode::split_v(MosaicNode::leaf("b"), MosaicNode::leaf("c")),
        );
        let rects = engine.compute(&tree, Rect::new(0.0, 0.0, 1000.0, 800.0));
        assert_eq!(rects.len(), 3);
        assert_eq!(rects[1].1, Rect::new(500.0, 0.0, 500.0, 400.0));
        assert_eq!(rects[2].1, Rect::new(500.0, 400.0, 500.0, 400.0));
    }

    #[test]
    fn gap_larger_than_bounds_never_goes_negative() {
        let engine = LayoutEngine { gap: 50 };
        let tree = MosaicNode::split_v(MosaicNode::leaf("a"), MosaicNode::leaf("b"));
        let rects = engine.compute(&tree, Rect::new(0.0, 0.0, 100.0, 20.0));
        assert!(rects.iter().all(|(_, r)| r.height >= 0.0));
    }
}
