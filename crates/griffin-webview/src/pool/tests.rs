use std::sync::Arc;
use std::time::Duration;

use griffin_common::{EngineError, PixelRect, TabId};

use super::*;
use crate::test_utils::{EngineCall, FakeEngine};

const URL: &str = "https://www.tradingview.com/chart/";

fn tab(s: &str) -> TabId {
    TabId::from(s)
}

fn pool_with(engine: FakeEngine) -> (SurfacePool<FakeEngine>, Arc<FakeEngine>) {
    let engine = Arc::new(engine);
    (SurfacePool::new(Arc::clone(&engine)), engine)
}

fn pool() -> (SurfacePool<FakeEngine>, Arc<FakeEngine>) {
    pool_with(FakeEngine::new())
}

fn assert_attach_invariant(pool: &SurfacePool<FakeEngine>, engine: &FakeEngine) {
    let mut members = pool.active_set().members();
    members.sort();
    assert_eq!(pool.attached(), members, "attached set must equal active set");
    assert_eq!(engine.visible(), members, "engine visibility must match");
}

// -- ensure / destroy --

#[tokio::test]
async fn ensure_is_idempotent_and_ignores_url_drift() {
    let (pool, engine) = pool();
    let a = tab("a");
    pool.ensure(&a, URL).await.unwrap();
    pool.ensure(&a, "https://other.example").await.unwrap();
    assert_eq!(engine.allocations(&a), 1);
    assert_eq!(engine.url_of(&a).as_deref(), Some(URL));
    assert_eq!(pool.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn concurrent_ensure_for_same_tab_allocates_once() {
    let (pool, engine) = pool_with(FakeEngine::new().with_create_delay(Duration::from_millis(100)));
    let a = tab("a");
    let (first, second) = tokio::join!(pool.ensure(&a, URL), pool.ensure(&a, URL));
    assert!(first.is_ok() && second.is_ok());
    assert_eq!(engine.allocations(&a), 1);
    assert_eq!(engine.double_allocations(), 0);
}

#[tokio::test(start_paused = true)]
async fn different_tabs_allocate_concurrently() {
    let (pool, engine) = pool_with(FakeEngine::new().with_create_delay(Duration::from_millis(100)));
    let (tab_a, tab_b) = (tab("a"), tab("b"));
    let start = tokio::time::Instant::now();
    let (a, b) = tokio::join!(pool.ensure(&tab_a, URL), pool.ensure(&tab_b, URL));
    assert!(a.is_ok() && b.is_ok());
    assert!(start.elapsed() < Duration::from_millis(150));
    assert_eq!(engine.live_count(), 2);
}

#[tokio::test]
async fn destroy_is_idempotent() {
    let (pool, engine) = pool();
    let a = tab("a");
    pool.ensure(&a, URL).await.unwrap();
    pool.destroy(&a).await;
    pool.destroy(&a).await;
    pool.destroy(&tab("never-created")).await;
    let releases = engine
        .calls()
        .iter()
        .filter(|c| matches!(c, EngineCall::Release(_)))
        .count();
    assert_eq!(releases, 1);
    assert!(!pool.contains(&a));
    assert_eq!(engine.live_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn destroy_waits_for_in_flight_ensure() {
    let (pool, engine) = pool_with(FakeEngine::new().with_create_delay(Duration::from_millis(100)));
    let a = tab("a");
    let (created, ()) = tokio::join!(pool.ensure(&a, URL), pool.destroy(&a));
    assert!(created.is_ok());
    assert!(!pool.contains(&a));
    assert_eq!(engine.live_count(), 0);
    assert_eq!(
        engine.calls(),
        vec![
            EngineCall::Create(a.clone(), URL.into()),
            EngineCall::Stop(a.clone()),
            EngineCall::Release(a.clone()),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn ensure_queued_behind_destroy_creates_a_fresh_surface() {
    let (pool, engine) = pool_with(FakeEngine::new().with_release_delay(Duration::from_millis(50)));
    let a = tab("a");
    pool.ensure(&a, URL).await.unwrap();

    let ((), recreated) = tokio::join!(pool.destroy(&a), pool.ensure(&a, URL));
    assert!(recreated.is_ok());
    assert!(pool.contains(&a));
    assert_eq!(engine.allocations(&a), 2);
    assert_eq!(engine.double_allocations(), 0);
    assert_eq!(engine.live_count(), 1);
}

#[tokio::test]
async fn allocation_failure_is_reported() {
    let (pool, engine) = pool();
    engine.fail_allocation_for("https://broken.example");
    let result = pool.ensure(&tab("a"), "https://broken.example").await;
    assert!(matches!(result, Err(EngineError::Allocation(_))));
    assert!(!pool.contains(&tab("a")));

    // The tab is still usable with a working URL
    assert!(pool.ensure(&tab("a"), URL).await.is_ok());
}

// -- load state --

#[tokio::test]
async fn navigation_failure_is_a_state_not_an_error() {
    let (pool, engine) = pool();
    let a = tab("a");
    let mut handle = pool.ensure(&a, URL).await.unwrap();
    assert!(!pool.is_loaded(&a));
    assert_eq!(handle.load_state(), LoadState::Loading);

    engine.finish_load(&a, LoadState::Failed);
    assert_eq!(handle.settled().await, LoadState::Failed);
    assert!(!pool.is_loaded(&a));

    // Retry by destroy + ensure
    pool.destroy(&a).await;
    let handle = pool.ensure(&a, URL).await.unwrap();
    engine.finish_load(&a, LoadState::Loaded);
    assert!(handle.is_loaded());
    assert!(pool.is_loaded(&a));
}

#[tokio::test]
async fn destroy_of_loaded_surface_skips_stop() {
    let (pool, engine) = pool();
    let a = tab("a");
    pool.ensure(&a, URL).await.unwrap();
    engine.finish_load(&a, LoadState::Loaded);
    engine.clear_calls();
    pool.destroy(&a).await;
    assert_eq!(engine.calls(), vec![EngineCall::Release(a)]);
}

#[tokio::test]
async fn is_loaded_for_unknown_tab_is_false() {
    let (pool, _) = pool();
    assert!(!pool.is_loaded(&tab("ghost")));
    assert_eq!(pool.load_state(&tab("ghost")), None);
}

// -- attachment --

#[tokio::test]
async fn single_active_switches_attachment() {
    let (pool, engine) = pool();
    let (a, b) = (tab("a"), tab("b"));
    pool.ensure(&a, URL).await.unwrap();
    pool.ensure(&b, URL).await.unwrap();

    pool.set_active(Some(&a));
    assert_eq!(engine.visible(), vec![a.clone()]);
    pool.set_active(Some(&b));
    assert_eq!(engine.visible(), vec![b.clone()]);
    assert_eq!(pool.active_set(), ActiveSet::Single(Some(b)));
    assert_attach_invariant(&pool, &engine);
}

#[tokio::test]
async fn set_active_same_tab_is_noop() {
    let (pool, engine) = pool();
    let a = tab("a");
    pool.ensure(&a, URL).await.unwrap();
    pool.set_active(Some(&a));
    engine.clear_calls();
    pool.set_active(Some(&a));
    assert!(engine.calls().is_empty());
}

#[tokio::test]
async fn set_active_without_surface_clears_active() {
    let (pool, engine) = pool();
    let a = tab("a");
    pool.ensure(&a, URL).await.unwrap();
    pool.set_active(Some(&a));
    pool.set_active(Some(&tab("ghost")));
    assert_eq!(pool.active_set(), ActiveSet::Single(None));
    assert!(engine.visible().is_empty());
}

#[tokio::test]
async fn set_active_none_detaches_everything() {
    let (pool, engine) = pool();
    let a = tab("a");
    pool.ensure(&a, URL).await.unwrap();
    pool.set_active(Some(&a));
    pool.set_active(None);
    assert!(engine.visible().is_empty());
    assert!(pool.contains(&a));
    assert_attach_invariant(&pool, &engine);
}

#[tokio::test]
async fn bounds_set_while_detached_apply_on_attach() {
    let (pool, engine) = pool();
    let a = tab("a");
    let r = PixelRect::new(0, 40, 900, 630);
    pool.ensure(&a, URL).await.unwrap();

    pool.set_bounds(&a, r);
    assert_eq!(engine.set_bounds_count(&a), 0);
    assert_eq!(engine.bounds_of(&a), None);

    pool.set_active(Some(&a));
    assert!(engine.calls().contains(&EngineCall::Attach(a.clone(), Some(r))));
    assert_eq!(engine.bounds_of(&a), Some(r));
}

#[tokio::test]
async fn bounds_set_while_attached_apply_immediately() {
    let (pool, engine) = pool();
    let a = tab("a");
    pool.ensure(&a, URL).await.unwrap();
    pool.set_active(Some(&a));
    let r = PixelRect::new(10, 10, 500, 400);
    pool.set_bounds(&a, r);
    pool.set_bounds(&a, r);
    assert_eq!(engine.set_bounds_count(&a), 1);
    assert_eq!(engine.bounds_of(&a), Some(r));
    assert_eq!(pool.bounds_of(&a), Some(r));
}

#[tokio::test]
async fn bounds_for_unknown_tab_are_ignored() {
    let (pool, engine) = pool();
    pool.set_bounds(&tab("ghost"), PixelRect::new(0, 0, 100, 100));
    assert!(engine.calls().is_empty());
}

#[tokio::test]
async fn hide_detaches_but_keeps_surface() {
    let (pool, engine) = pool();
    let a = tab("a");
    pool.ensure(&a, URL).await.unwrap();
    pool.set_active(Some(&a));
    pool.hide(&a);
    assert!(pool.contains(&a));
    assert!(engine.is_live(&a));
    assert!(!engine.is_visible(&a));
    assert_eq!(pool.phase(&a), SurfacePhase::Hidden);
    assert_eq!(pool.active_set(), ActiveSet::Single(None));
}

#[tokio::test]
async fn destroy_detaches_before_release() {
    let (pool, engine) = pool();
    let a = tab("a");
    pool.ensure(&a, URL).await.unwrap();
    pool.set_active(Some(&a));
    engine.finish_load(&a, LoadState::Loaded);
    engine.clear_calls();
    pool.destroy(&a).await;
    assert_eq!(
        engine.calls(),
        vec![EngineCall::Detach(a.clone()), EngineCall::Release(a.clone())]
    );
    assert_eq!(pool.active_set(), ActiveSet::Single(None));
    assert_attach_invariant(&pool, &engine);
}

// -- grid --

#[tokio::test]
async fn slots_attach_several_surfaces() {
    let (pool, engine) = pool();
    let (a, b, c) = (tab("a"), tab("b"), tab("c"));
    for t in [&a, &b, &c] {
        pool.ensure(t, URL).await.unwrap();
    }
    pool.set_active(Some(&c));
    pool.set_slot_active(0, Some(&a));
    pool.set_slot_active(1, Some(&b));
    assert_eq!(engine.visible(), vec![a.clone(), b.clone()]);
    assert_attach_invariant(&pool, &engine);
}

#[tokio::test]
async fn binding_attached_tab_to_another_slot_moves_it() {
    let (pool, engine) = pool();
    let (a, b) = (tab("a"), tab("b"));
    pool.ensure(&a, URL).await.unwrap();
    pool.ensure(&b, URL).await.unwrap();
    pool.set_slot_active(0, Some(&a));
    pool.set_slot_active(1, Some(&b));

    pool.set_slot_active(1, Some(&a));
    match pool.active_set() {
        ActiveSet::Grid(slots) => {
            assert_eq!(slots.len(), 1);
            assert_eq!(slots.get(&1), Some(&a));
        }
        other => panic!("expected grid, got {other:?}"),
    }
    assert_eq!(engine.visible(), vec![a]);
    assert_attach_invariant(&pool, &engine);
}

#[tokio::test]
async fn unbinding_slot_detaches() {
    let (pool, engine) = pool();
    let a = tab("a");
    pool.ensure(&a, URL).await.unwrap();
    pool.set_slot_active(2, Some(&a));
    pool.set_slot_active(2, None);
    assert!(engine.visible().is_empty());
    assert_eq!(pool.active_set(), ActiveSet::Grid(Default::default()));
}

// -- lifecycle --

#[tokio::test]
async fn phase_follows_lifecycle() {
    let (pool, _) = pool();
    let a = tab("a");
    assert_eq!(pool.phase(&a), SurfacePhase::Inactive);
    pool.ensure(&a, URL).await.unwrap();
    assert_eq!(pool.phase(&a), SurfacePhase::Loading);
    pool.set_active(Some(&a));
    assert_eq!(pool.phase(&a), SurfacePhase::Active);
    pool.set_active(None);
    assert_eq!(pool.phase(&a), SurfacePhase::Hidden);
    pool.destroy(&a).await;
    assert_eq!(pool.phase(&a), SurfacePhase::Destroyed);
    pool.ensure(&a, URL).await.unwrap();
    assert_eq!(pool.phase(&a), SurfacePhase::Loading);
}

#[tokio::test]
async fn shutdown_drains_everything() {
    let (pool, engine) = pool();
    for name in ["a", "b", "c"] {
        pool.ensure(&tab(name), URL).await.unwrap();
    }
    pool.set_active(Some(&tab("b")));
    pool.shutdown().await;
    assert!(pool.is_empty());
    assert_eq!(engine.live_count(), 0);
    assert_eq!(pool.active_set(), ActiveSet::Single(None));
}

/// Pseudo-random interleaving of every pool operation; the attach
/// invariant and the one-surface-per-tab rule must hold after each step.
#[tokio::test]
async fn invariants_hold_across_interleavings() {
    let (pool, engine) = pool();
    let tabs: Vec<TabId> = ["a", "b", "c", "d"].into_iter().map(tab).collect();
    let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut next = move || {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        seed
    };

    for _ in 0..400 {
        let t = &tabs[(next() % tabs.len() as u64) as usize];
        match next() % 7 {
            0 | 1 => {
                pool.ensure(t, URL).await.unwrap();
            }
            2 => pool.destroy(t).await,
            3 => pool.set_active(Some(t)),
            4 => pool.set_slot_active((next() % 3) as usize, Some(t)),
            5 => pool.hide(t),
            _ => pool.set_bounds(t, PixelRect::new(0, 0, 300, 200)),
        }
        assert_attach_invariant(&pool, &engine);
        assert_eq!(pool.len(), engine.live_count());
        assert_eq!(engine.double_allocations(), 0);
    }
}
