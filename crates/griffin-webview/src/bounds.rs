//! Coalescing of host-region geometry changes.
//!
//! Raw changes go through a trailing debounce; mount and active-tab
//! changes flush immediately. Time is passed in explicitly so the event
//! loop decides when to poll (see `next_deadline`).

use std::time::{Duration, Instant};

use griffin_common::{PixelRect, Rect, TabId};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(350);
pub const DEFAULT_MIN_VISIBLE_PX: i32 = 10;

#[derive(Debug, Clone, Copy)]
struct Pending {
    rect: PixelRect,
    deadline: Instant,
}

#[derive(Debug)]
pub struct BoundsSynchronizer {
    debounce: Duration,
    min_visible_px: i32,
    pending: Option<Pending>,
    last_dispatched: Option<PixelRect>,
    /// Most recent visible geometry, dispatched or not.
    latest: Option<PixelRect>,
}

impl Default for BoundsSynchronizer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE, DEFAULT_MIN_VISIBLE_PX)
    }
}

impl BoundsSynchronizer {
    pub fn new(debounce: Duration, min_visible_px: i32) -> Self {
        Self {
            debounce,
            min_visible_px,
            pending: None,
            last_dispatched: None,
            latest: None,
        }
    }

    pub fn set_debounce(&mut self, debounce: Duration) {
        self.debounce = debounce;
    }

    /// Round and filter. Rects under the visibility threshold are
    /// transient resize states and never dispatched.
    fn accept(&self, rect: &Rect) -> Option<PixelRect> {
        let px = PixelRect::from_rect(rect);
        if px.is_visible(self.min_visible_px) {
            Some(px)
        } else {
            tracing::trace!(?px, "Discarding sub-threshold bounds");
            None
        }
    }

    /// Record a raw geometry change. Each call pushes the deadline out by
    /// the debounce window.
    pub fn observe(&mut self, rect: Rect, now: Instant) {
        let Some(px) = self.accept(&rect) else {
            return;
        };
        self.latest = Some(px);
        self.pending = Some(Pending {
            rect: px,
            deadline: now + self.debounce,
        });
    }

    /// Fire the pending update if its window has elapsed. Returns nothing
    /// when the settled geometry equals what was last dispatched.
    pub fn poll(&mut self, now: Instant) -> Option<PixelRect> {
        let pending = self.pending?;
        if now < pending.deadline {
            return None;
        }
        self.pending = None;
        if self.last_dispatched == Some(pending.rect) {
            return None;
        }
        self.dispatch(pending.rect)
    }

    /// First layout of the host region. Bypasses the debounce.
    pub fn mount(&mut self, rect: Rect) -> Option<PixelRect> {
        let px = self.accept(&rect)?;
        self.latest = Some(px);
        self.pending = None;
        self.dispatch(px)
    }

    /// The active tab changed. Flushes the latest known geometry (or
    /// `rect` when given) immediately, even if unchanged, so the newly
    /// shown surface never keeps a stale frame.
    pub fn active_changed(&mut self, tab: Option<&TabId>, rect: Option<Rect>) -> Option<PixelRect> {
        if let Some(px) = rect.as_ref().and_then(|r| self.accept(r)) {
            self.latest = Some(px);
        }
        let px = self.latest?;
        self.pending = None;
        tracing::debug!(tab_id = ?tab.map(TabId::as_str), ?px, "Flushing bounds on activation");
        self.dispatch(px)
    }

    /// When `poll` should next be called.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.deadline)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Most recent visible geometry, whether or not it has been dispatched.
    pub fn latest(&self) -> Option<PixelRect> {
        self.latest
    }

    fn dispatch(&mut self, px: PixelRect) -> Option<PixelRect> {
        self.last_dispatched = Some(px);
        Some(px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn rect(w: f64, h: f64) -> Rect {
        Rect::new(0.0, 40.0, w, h)
    }

    #[test]
    fn fifty_events_in_300ms_dispatch_once_with_final_rect() {
        let mut sync = BoundsSynchronizer::default();
        let start = Instant::now();
        let mut dispatched = Vec::new();

        for i in 0..50u64 {
            let now = start + ms(i * 6);
            sync.observe(rect(600.0 + i as f64 * 3.3, 500.0), now);
            dispatched.extend(sync.poll(now));
        }
        // Drive the clock in 10 ms ticks well past the window
        for tick in 0..100u64 {
            dispatched.extend(sync.poll(start + ms(300 + tick * 10)));
        }

        assert_eq!(dispatched.len(), 1);
        assert_eq!(dispatched[0], PixelRect::new(0, 40, 762, 500));
        assert!(!sync.has_pending());
    }

    #[test]
    fn nothing_fires_inside_window() {
        let mut sync = BoundsSynchronizer::new(ms(350), 10);
        let t = Instant::now();
        sync.observe(rect(800.0, 600.0), t);
        assert_eq!(sync.poll(t + ms(349)), None);
        assert_eq!(sync.next_deadline(), Some(t + ms(350)));
        assert_eq!(sync.poll(t + ms(350)), Some(PixelRect::new(0, 40, 800, 600)));
    }

    #[test]
    fn each_observation_extends_the_window() {
        let mut sync = BoundsSynchronizer::new(ms(100), 10);
        let t = Instant::now();
        sync.observe(rect(800.0, 600.0), t);
        sync.observe(rect(810.0, 600.0), t + ms(90));
        assert_eq!(sync.poll(t + ms(120)), None);
        assert_eq!(sync.poll(t + ms(190)), Some(PixelRect::new(0, 40, 810, 600)));
    }

    #[test]
    fn coordinates_are_rounded() {
        let mut sync = BoundsSynchronizer::default();
        let got = sync.mount(Rect::new(0.4, 39.6, 799.5, 600.2));
        assert_eq!(got, Some(PixelRect::new(0, 40, 800, 600)));
    }

    #[test]
    fn sub_threshold_rects_are_discarded() {
        let mut sync = BoundsSynchronizer::default();
        let t = Instant::now();
        assert_eq!(sync.mount(rect(9.0, 600.0)), None);
        sync.observe(rect(800.0, 4.0), t);
        assert!(!sync.has_pending());
    }

    #[test]
    fn sub_threshold_rect_does_not_disturb_pending() {
        let mut sync = BoundsSynchronizer::new(ms(100), 10);
        let t = Instant::now();
        sync.observe(rect(800.0, 600.0), t);
        sync.observe(rect(2.0, 2.0), t + ms(50));
        assert_eq!(sync.poll(t + ms(100)), Some(PixelRect::new(0, 40, 800, 600)));
    }

    #[test]
    fn mount_bypasses_debounce_and_cancels_pending() {
        let mut sync = BoundsSynchronizer::default();
        let t = Instant::now();
        sync.observe(rect(700.0, 600.0), t);
        assert_eq!(sync.mount(rect(900.0, 600.0)), Some(PixelRect::new(0, 40, 900, 600)));
        assert_eq!(sync.poll(t + ms(1000)), None);
    }

    #[test]
    fn active_change_flushes_latest_even_if_unchanged() {
        let mut sync = BoundsSynchronizer::default();
        let t = Instant::now();
        let tab = TabId::from("a");
        sync.mount(rect(900.0, 600.0));
        assert_eq!(
            sync.active_changed(Some(&tab), None),
            Some(PixelRect::new(0, 40, 900, 600))
        );

        sync.observe(rect(950.0, 600.0), t);
        assert_eq!(
            sync.active_changed(Some(&tab), None),
            Some(PixelRect::new(0, 40, 950, 600))
        );
        assert!(!sync.has_pending());
    }

    #[test]
    fn active_change_before_any_geometry_yields_nothing() {
        let mut sync = BoundsSynchronizer::default();
        assert_eq!(sync.active_changed(None, None), None);
    }

    #[test]
    fn settled_geometry_equal_to_last_dispatch_is_skipped() {
        let mut sync = BoundsSynchronizer::new(ms(100), 10);
        let t = Instant::now();
        sync.mount(rect(900.0, 600.0));
        sync.observe(rect(901.0, 600.0), t);
        sync.observe(rect(900.0, 600.0), t + ms(10));
        assert_eq!(sync.poll(t + ms(200)), None);
    }
}
