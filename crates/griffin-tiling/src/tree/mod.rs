mod operations;
mod types;

pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use griffin_common::TabId;

    fn id(s: &str) -> TabId {
        TabId::from(s)
    }

    fn three() -> MosaicNode {
        MosaicNode::split_h(
            MosaicNode::leaf("a"),
            MosaicNode::split_v(MosaicNode::leaf("b"), MosaicNode::leaf("c")),
        )
    }

    #[test]
    fn pane_count_and_contains() {
        let tree = three();
        assert_eq!(tree.pane_count(), 3);
        assert!(tree.contains_tab(&id("c")));
        assert!(!tree.contains_tab(&id("zz")));
    }

    #[test]
    fn collect_ids_depth_first() {
        assert_eq!(three().collect_tab_ids(), vec![id("a"), id("b"), id("c")]);
    }

    #[test]
    fn initial_layouts() {
        assert!(MosaicNode::initial(&[]).is_none());
        assert_eq!(
            MosaicNode::initial(&[id("a")]),
            Some(MosaicNode::leaf("a"))
        );
        let tree = MosaicNode::initial(&[id("a"), id("b"), id("c")]).unwrap();
        assert_eq!(tree.collect_tab_ids(), vec![id("a"), id("b")]);
        assert!(matches!(
            tree,
            MosaicNode::Split {
                direction: Direction::Horizontal,
                ..
            }
        ));
    }

    #[test]
    fn split_at_leaf() {
        let mut tree = MosaicNode::leaf("a");
        assert!(tree.split_at(&id("a"), id("b"), Direction::Vertical));
        assert_eq!(tree.collect_tab_ids(), vec![id("a"), id("b")]);
    }

    #[test]
    fn split_refuses_duplicate_tab() {
        let mut tree = three();
        assert!(!tree.split_at(&id("a"), id("c"), Direction::Vertical));
        assert_eq!(tree.pane_count(), 3);
    }

    #[test]
    fn split_missing_target_is_noop() {
        let mut tree = three();
        assert!(!tree.split_at(&id("zz"), id("d"), Direction::Vertical));
        assert_eq!(tree, three());
    }

    #[test]
    fn remove_promotes_sibling() {
        let mut tree = three();
        assert!(tree.remove_leaf(&id("b")));
        assert_eq!(tree.collect_tab_ids(), vec![id("a"), id("c")]);
        assert!(tree.remove_leaf(&id("a")));
        assert_eq!(tree, MosaicNode::leaf("c"));
    }

    #[test]
    fn cannot_remove_last_leaf() {
        let mut tree = MosaicNode::leaf("a");
        assert!(!tree.remove_leaf(&id("a")));
    }

    #[test]
    fn replace_leaf_points_at_new_tab() {
        let mut tree = three();
        assert!(tree.replace_leaf(&id("b"), id("d")));
        assert_eq!(tree.collect_tab_ids(), vec![id("a"), id("d"), id("c")]);
    }

    #[test]
    fn replace_with_visible_tab_swaps() {
        let mut tree = three();
        assert!(tree.replace_leaf(&id("a"), id("c")));
        assert_eq!(tree.collect_tab_ids(), vec![id("c"), id("b"), id("a")]);
    }

    #[test]
    fn swap_requires_both() {
        let mut tree = three();
        assert!(!tree.swap_tabs(&id("a"), &id("zz")));
        assert!(tree.swap_tabs(&id("a"), &id("b")));
        assert_eq!(tree.collect_tab_ids(), vec![id("b"), id("a"), id("c")]);
    }

    #[test]
    fn adjust_ratio_clamps() {
        let mut tree = MosaicNode::split_h(MosaicNode::leaf("a"), MosaicNode::leaf("b"));
        assert!(tree.adjust_ratio(&id("a"), 0.9));
        if let MosaicNode::Split { ratio, .. } = tree {
            assert!((ratio - 0.9).abs() < f64::EPSILON);
        }
        assert!(tree.adjust_ratio(&id("b"), 0.3));
        if let MosaicNode::Split { ratio, .. } = tree {
            assert!((ratio - 0.6).abs() < 1e-9);
        }
    }

    #[test]
    fn serde_shape() {
        let tree = MosaicNode::split_h(MosaicNode::leaf("a"), MosaicNode::leaf("b"));
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["type"], "split");
        assert_eq!(json["direction"], "horizontal");
        assert_eq!(json["first"]["tab_id"], "a");
        let back: MosaicNode = serde_json::from_value(json).unwrap();
        assert_eq!(back, tree);
    }
}
