//! Lays out grid panes and keeps the pool's slot attachments in step.
//!
//! Both grid flavours (the fixed three-slot split and the mosaic tree)
//! reduce to a list of `Pane`s. `apply` diffs that list against what is
//! currently shown: vacated slots are released, tabs that left every pane
//! are hidden, and bounds are pushed only to panes whose rect changed.

use std::collections::{BTreeMap, HashSet};

use griffin_common::{EngineError, PixelRect, Rect, TabId};
use griffin_config::schema::{BoundsConfig, GridConfig};
use griffin_tabs::SlotView;
use griffin_tiling::{LayoutEngine, MosaicNode, SlotLayout, GRID_SLOT_COUNT};
use griffin_webview::bounds::DEFAULT_MIN_VISIBLE_PX;
use griffin_webview::{RenderEngine, SurfacePool};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pane {
    pub index: usize,
    pub rect: PixelRect,
    pub view: SlotView,
}

impl Pane {
    pub fn tab(&self) -> Option<&TabId> {
        match &self.view {
            SlotView::Bound(id) => Some(id),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct GridCompositor {
    slots: SlotLayout,
    mosaic: LayoutEngine,
    min_visible_px: i32,
    /// Pane index -> (tab, rect) for every pane currently holding a surface.
    shown: BTreeMap<usize, (TabId, PixelRect)>,
    panes: Vec<Pane>,
}

impl Default for GridCompositor {
    fn default() -> Self {
        Self::new(SlotLayout::default(), LayoutEngine::default(), DEFAULT_MIN_VISIBLE_PX)
    }
}

impl GridCompositor {
    pub fn new(slots: SlotLayout, mosaic: LayoutEngine, min_visible_px: i32) -> Self {
        Self {
            slots,
            mosaic,
            min_visible_px,
            shown: BTreeMap::new(),
            panes: Vec::new(),
        }
    }

    pub fn from_config(grid: &GridConfig, bounds: &BoundsConfig) -> Self {
        Self::new(
            SlotLayout {
                gap: grid.gap,
                primary_ratio: grid.primary_ratio,
            },
            LayoutEngine::with_gap(grid.gap),
            i32::try_from(bounds.min_visible_px).unwrap_or(i32::MAX),
        )
    }

    pub fn layout_slots(&self, views: [SlotView; GRID_SLOT_COUNT], region: Rect) -> Vec<Pane> {
        let rects = self.slots.compute(region);
        views
            .into_iter()
            .zip(rects)
            .enumerate()
            .map(|(index, (view, rect))| Pane {
                index,
                rect: PixelRect::from_rect(&rect),
                view,
            })
            .collect()
    }

    /// Leaves are resolved through `resolve`; a leaf naming a tab that is
    /// gone comes back `Unavailable` and gets no surface.
    pub fn layout_mosaic(
        &self,
        tree: Option<&MosaicNode>,
        resolve: impl Fn(&TabId) -> SlotView,
        region: Rect,
    ) -> Vec<Pane> {
        let Some(tree) = tree else {
            return Vec::new();
        };
        self.mosaic
            .compute(tree, region)
            .into_iter()
            .enumerate()
            .map(|(index, (tab, rect))| Pane {
                index,
                rect: PixelRect::from_rect(&rect),
                view: resolve(&tab),
            })
            .collect()
    }

    /// Make the pool show exactly the bound panes of `panes`.
    ///
    /// Surfaces are created on demand through `url_of`. A tab bound into
    /// zero panes is hidden, never destroyed.
    pub async fn apply<E: RenderEngine>(
        &mut self,
        pool: &SurfacePool<E>,
        panes: Vec<Pane>,
        url_of: impl Fn(&TabId) -> Option<String>,
    ) -> Result<(), EngineError> {
        let next: BTreeMap<usize, (TabId, PixelRect)> = panes
            .iter()
            .filter_map(|pane| pane.tab().map(|tab| (pane.index, (tab.clone(), pane.rect))))
            .collect();
        self.panes = panes;

        let previous = std::mem::take(&mut self.shown);
        for (index, (tab, rect)) in &previous {
            if next.get(index).map(|(t, _)| t) == Some(tab) {
                self.shown.insert(*index, (tab.clone(), *rect));
            } else {
                pool.set_slot_active(*index, None);
            }
        }

        let next_tabs: HashSet<&TabId> = next.values().map(|(tab, _)| tab).collect();
        for (tab, _) in previous.values() {
            if !next_tabs.contains(tab) {
                tracing::debug!(tab_id = %tab, "Tab left the grid, hiding");
                pool.hide(tab);
            }
        }

        // `shown` is updated pane by pane so a failed allocation leaves it
        // matching what the pool actually has attached.
        for (index, (tab, rect)) in next {
            let Some(url) = url_of(&tab) else {
                continue;
            };
            pool.ensure(&tab, &url).await?;

            let previous_rect = previous
                .values()
                .find(|(shown, _)| *shown == tab)
                .map(|(_, r)| *r);
            if previous_rect != Some(rect) && rect.is_visible(self.min_visible_px) {
                pool.set_bounds(&tab, rect);
            }
            pool.set_slot_active(index, Some(&tab));
            self.shown.insert(index, (tab, rect));
        }
        Ok(())
    }

    /// Forget what is shown. The caller detaches the pool itself.
    pub fn reset(&mut self) {
        self.shown.clear();
        self.panes.clear();
    }

    pub fn panes(&self) -> &[Pane] {
        &self.panes
    }

    pub fn shown_tabs(&self) -> Vec<TabId> {
        self.shown.values().map(|(tab, _)| tab.clone()).collect()
    }

    pub fn is_showing(&self, tab: &TabId) -> bool {
        self.shown.values().any(|(shown, _)| shown == tab)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use griffin_webview::test_utils::{EngineCall, FakeEngine};
    use griffin_webview::ActiveSet;

    use super::*;

    const REGION: Rect = Rect {
        x: 0.0,
        y: 40.0,
        width: 1004.0,
        height: 804.0,
    };

    fn setup() -> (Arc<FakeEngine>, SurfacePool<FakeEngine>, GridCompositor) {
        let engine = Arc::new(FakeEngine::new());
        let pool = SurfacePool::new(engine.clone());
        let compositor = GridCompositor::new(SlotLayout::default(), LayoutEngine::default(), 10);
        (engine, pool, compositor)
    }

    fn url(tab: &TabId) -> Option<String> {
        Some(format!("https://{}.example", tab.as_str()))
    }

    fn bound(id: &str) -> SlotView {
        SlotView::Bound(TabId::from(id))
    }

    #[test]
    fn slot_panes_follow_the_fixed_split() {
        let (_, _, compositor) = setup();
        let panes = compositor.layout_slots([bound("a"), SlotView::Empty, bound("c")], REGION);
        assert_eq!(panes.len(), 3);
        assert_eq!(panes[0].rect, PixelRect::new(0, 40, 600, 804));
        assert_eq!(panes[1].rect, PixelRect::new(604, 40, 400, 400));
        assert_eq!(panes[2].rect, PixelRect::new(604, 444, 400, 400));
        assert_eq!(panes[1].tab(), None);
    }

    #[test]
    fn empty_mosaic_has_no_panes() {
        let (_, _, compositor) = setup();
        assert!(compositor.layout_mosaic(None, |t| SlotView::Bound(t.clone()), REGION).is_empty());
    }

    #[test]
    fn mosaic_leaves_resolve_through_callback() {
        let (_, _, compositor) = setup();
        let tree = MosaicNode::split_h(MosaicNode::leaf("a"), MosaicNode::leaf("gone"));
        let panes = compositor.layout_mosaic(
            Some(&tree),
            |t| {
                if t.as_str() == "gone" {
                    SlotView::Unavailable(t.clone())
                } else {
                    SlotView::Bound(t.clone())
                }
            },
            REGION,
        );
        assert_eq!(panes[0].view, bound("a"));
        assert_eq!(panes[1].view, SlotView::Unavailable(TabId::from("gone")));
    }

    #[tokio::test]
    async fn bound_slots_get_surfaces_and_bounds() {
        let (engine, pool, mut compositor) = setup();
        let panes = compositor.layout_slots([bound("a"), SlotView::Empty, bound("c")], REGION);
        compositor.apply(&pool, panes, url).await.unwrap();

        let (a, c) = (TabId::from("a"), TabId::from("c"));
        assert_eq!(engine.visible(), vec![a.clone(), c.clone()]);
        assert_eq!(engine.bounds_of(&a), Some(PixelRect::new(0, 40, 600, 804)));
        assert_eq!(engine.bounds_of(&c), Some(PixelRect::new(604, 444, 400, 400)));
        assert_eq!(engine.live_count(), 2);
        assert_eq!(compositor.panes().len(), 3);
    }

    #[tokio::test]
    async fn unavailable_slot_gets_no_surface() {
        let (engine, pool, mut compositor) = setup();
        let panes = compositor.layout_slots(
            [bound("a"), SlotView::Unavailable(TabId::from("x")), SlotView::Empty],
            REGION,
        );
        compositor.apply(&pool, panes, url).await.unwrap();
        assert_eq!(engine.live_count(), 1);
        assert!(!engine.is_live(&TabId::from("x")));
    }

    #[tokio::test]
    async fn unchanged_layout_pushes_no_bounds() {
        let (engine, pool, mut compositor) = setup();
        let views = [bound("a"), bound("b"), SlotView::Empty];
        compositor
            .apply(&pool, compositor.layout_slots(views.clone(), REGION), url)
            .await
            .unwrap();
        let a = TabId::from("a");
        let before = engine.set_bounds_count(&a);

        compositor
            .apply(&pool, compositor.layout_slots(views, REGION), url)
            .await
            .unwrap();
        assert_eq!(engine.set_bounds_count(&a), before);
        assert_eq!(engine.allocations(&a), 1);
    }

    #[tokio::test]
    async fn mosaic_split_only_touches_affected_panes() {
        let (engine, pool, mut compositor) = setup();
        let resolve = |t: &TabId| SlotView::Bound(t.clone());
        let (a, b) = (TabId::from("a"), TabId::from("b"));

        let mut tree = MosaicNode::split_h(MosaicNode::leaf("a"), MosaicNode::leaf("b"));
        let panes = compositor.layout_mosaic(Some(&tree), resolve, REGION);
        compositor.apply(&pool, panes, url).await.unwrap();
        let a_before = engine.set_bounds_count(&a);
        let b_before = engine.set_bounds_count(&b);

        assert!(tree.split_at(&b, TabId::from("c"), griffin_tiling::Direction::Vertical));
        let panes = compositor.layout_mosaic(Some(&tree), resolve, REGION);
        compositor.apply(&pool, panes, url).await.unwrap();

        assert_eq!(engine.set_bounds_count(&a), a_before);
        assert!(engine.set_bounds_count(&b) > b_before);
        assert!(engine.is_visible(&TabId::from("c")));
    }

    #[tokio::test]
    async fn unbound_tab_is_hidden_not_destroyed() {
        let (engine, pool, mut compositor) = setup();
        compositor
            .apply(
                &pool,
                compositor.layout_slots([bound("a"), bound("b"), SlotView::Empty], REGION),
                url,
            )
            .await
            .unwrap();

        compositor
            .apply(
                &pool,
                compositor.layout_slots([bound("a"), SlotView::Empty, SlotView::Empty], REGION),
                url,
            )
            .await
            .unwrap();

        let b = TabId::from("b");
        assert!(pool.contains(&b));
        assert!(engine.is_live(&b));
        assert!(!engine.is_visible(&b));
        assert!(!engine.calls().contains(&EngineCall::Release(b)));
        assert_eq!(compositor.shown_tabs(), vec![TabId::from("a")]);
    }

    #[tokio::test]
    async fn tab_moving_between_slots_stays_attached_once() {
        let (engine, pool, mut compositor) = setup();
        let a = TabId::from("a");
        compositor
            .apply(
                &pool,
                compositor.layout_slots([bound("a"), SlotView::Empty, SlotView::Empty], REGION),
                url,
            )
            .await
            .unwrap();
        compositor
            .apply(
                &pool,
                compositor.layout_slots([SlotView::Empty, bound("a"), SlotView::Empty], REGION),
                url,
            )
            .await
            .unwrap();

        assert_eq!(engine.visible(), vec![a.clone()]);
        assert_eq!(engine.bounds_of(&a), Some(PixelRect::new(604, 40, 400, 400)));
        match pool.active_set() {
            ActiveSet::Grid(slots) => {
                assert_eq!(slots.len(), 1);
                assert_eq!(slots.get(&1), Some(&a));
            }
            other => panic!("expected grid mode, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn allocation_failure_propagates() {
        let (engine, pool, mut compositor) = setup();
        engine.fail_allocation_for("https://a.example");
        let panes = compositor.layout_slots([bound("a"), SlotView::Empty, SlotView::Empty], REGION);
        let err = compositor.apply(&pool, panes, url).await.unwrap_err();
        assert!(matches!(err, EngineError::Allocation(_)));
    }

    #[tokio::test]
    async fn panes_attached_before_a_failure_are_still_released() {
        let (engine, pool, mut compositor) = setup();
        engine.fail_allocation_for("https://b.example");
        let a = TabId::from("a");
        let panes = compositor.layout_slots([bound("a"), bound("b"), SlotView::Empty], REGION);
        assert!(compositor.apply(&pool, panes, url).await.is_err());
        assert_eq!(engine.visible(), vec![a.clone()]);
        assert_eq!(compositor.shown_tabs(), vec![a.clone()]);

        let cleared = [SlotView::Empty, SlotView::Empty, SlotView::Empty];
        compositor
            .apply(&pool, compositor.layout_slots(cleared, REGION), url)
            .await
            .unwrap();
        assert!(engine.visible().is_empty());
        assert!(pool.attached().is_empty());
        assert!(compositor.shown_tabs().is_empty());
        assert!(engine.is_live(&a));
    }

    #[tokio::test]
    async fn reset_forgets_shown_panes() {
        let (_, pool, mut compositor) = setup();
        let panes = compositor.layout_slots([bound("a"), SlotView::Empty, SlotView::Empty], REGION);
        compositor.apply(&pool, panes, url).await.unwrap();
        assert!(compositor.is_showing(&TabId::from("a")));
        compositor.reset();
        assert!(compositor.shown_tabs().is_empty());
        assert!(compositor.panes().is_empty());
    }
}
