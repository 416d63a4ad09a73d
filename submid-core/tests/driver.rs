use std::time::Duration;

use chrono::{TimeZone, Utc};
use submid_config::{AutoAdvancePolicy, CarouselSettings};
use submid_core::{CarouselDriver, CarouselError, DriverError};
use submid_model::PromoItem;
use tokio::time::{Instant, sleep, timeout};

const TRANSITION: Duration = Duration::from_millis(700);
const INTERVAL: Duration = Duration::from_secs(6);

fn promos(titles: &[&str]) -> Vec<PromoItem> {
    let start = Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2026, 10, 31, 0, 0, 0).unwrap();
    titles
        .iter()
        .enumerate()
        .map(|(i, title)| PromoItem::new(i as i64 + 1, *title, start, end))
        .collect()
}

fn settings(auto: bool, policy: AutoAdvancePolicy) -> CarouselSettings {
    let mut settings = CarouselSettings::default();
    settings.transition = TRANSITION;
    settings.auto_advance.enabled = auto;
    settings.auto_advance.interval = INTERVAL;
    settings.auto_advance.policy = policy;
    settings
}

#[tokio::test(start_paused = true)]
async fn manual_advance_settles_after_transition() {
    let driver = CarouselDriver::new(settings(false, AutoAdvancePolicy::Free));
    let handle = driver.mount(promos(&["A", "B", "C"]));
    let remote = handle.remote();
    let mut rx = handle.subscribe();

    let started = Instant::now();
    remote.advance().await.expect("mounted");
    // Dropped: the first transition is still animating.
    remote.advance().await.expect("mounted");

    let snap = rx.wait_for(|s| s.in_transition).await.expect("open").clone();
    assert_eq!(snap.active_index, 4);

    let snap = rx.wait_for(|s| !s.in_transition).await.expect("open").clone();
    assert!(started.elapsed() >= TRANSITION);
    assert_eq!(snap.active_index, 4);
    assert_eq!(snap.base_index, Some(1));

    handle.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn wrap_around_folds_after_settle() {
    let driver = CarouselDriver::new(settings(false, AutoAdvancePolicy::Free));
    let handle = driver.mount(promos(&["A", "B", "C"]));
    let remote = handle.remote();
    let mut rx = handle.subscribe();

    remote.jump_to(2).await.expect("mounted");
    rx.wait_for(|s| !s.in_transition && s.active_index == 5)
        .await
        .expect("open");

    remote.advance().await.expect("mounted");
    rx.wait_for(|s| s.in_transition && s.active_index == 6)
        .await
        .expect("open");
    let snap = rx.wait_for(|s| !s.in_transition).await.expect("open").clone();
    assert_eq!(snap.active_index, 3);
    assert_eq!(snap.base_index, Some(0));

    handle.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn auto_advance_ticks_on_interval() {
    let driver = CarouselDriver::new(settings(true, AutoAdvancePolicy::Free));
    let handle = driver.mount(promos(&["A", "B", "C"]));
    let mut rx = handle.subscribe();
    let mounted_at = Instant::now();

    rx.wait_for(|s| s.active_index == 4 && !s.in_transition)
        .await
        .expect("open");
    let elapsed = mounted_at.elapsed();
    assert!(elapsed >= INTERVAL + TRANSITION, "{elapsed:?}");
    assert!(elapsed < INTERVAL * 2, "{elapsed:?}");

    rx.wait_for(|s| s.active_index == 5 && !s.in_transition)
        .await
        .expect("open");
    assert!(mounted_at.elapsed() >= INTERVAL * 2);

    handle.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn restart_on_manual_pushes_back_the_next_tick() {
    let driver =
        CarouselDriver::new(settings(true, AutoAdvancePolicy::RestartOnManual));
    let handle = driver.mount(promos(&["A", "B", "C"]));
    let remote = handle.remote();
    let mut rx = handle.subscribe();
    let mounted_at = Instant::now();

    sleep(Duration::from_secs(5)).await;
    remote.advance().await.expect("mounted");
    rx.wait_for(|s| s.active_index == 4 && !s.in_transition)
        .await
        .expect("open");

    // Without the restart the timer would move again at t=6s.
    rx.wait_for(|s| s.active_index == 5).await.expect("open");
    assert!(mounted_at.elapsed() >= Duration::from_secs(11));

    handle.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn unmount_cancels_pending_settle_and_timer() {
    let driver = CarouselDriver::new(settings(true, AutoAdvancePolicy::Free));
    let handle = driver.mount(promos(&["A", "B", "C"]));
    let remote = handle.remote();
    let mut rx = handle.subscribe();

    remote.retreat().await.expect("mounted");
    rx.wait_for(|s| s.in_transition).await.expect("open");

    handle.unmount().await;

    // The event loop is gone: no settle, no fold, no auto-advance.
    sleep(INTERVAL * 3).await;
    let last = rx.borrow().clone();
    assert!(last.in_transition);
    assert_eq!(last.active_index, 2);
    assert!(rx.changed().await.is_err());

    assert_eq!(remote.advance().await, Err(DriverError::Unmounted));
}

#[tokio::test(start_paused = true)]
async fn selection_and_swipes_go_through_the_loop() {
    let driver = CarouselDriver::new(settings(false, AutoAdvancePolicy::Free));
    let handle = driver.mount(promos(&["A", "B", "C"]));
    let remote = handle.remote();
    let mut rx = handle.subscribe();

    remote.select(4).await.expect("mounted");
    remote.select(3).await.expect("mounted");
    let snap = rx.wait_for(|s| s.selected.is_some()).await.expect("open").clone();
    assert_eq!(snap.selected.map(|p| p.title), Some("A".to_string()));
    assert!(snap.scroll_locked);

    remote.gesture_start(200.0).await.expect("mounted");
    remote.gesture_move(140.0).await.expect("mounted");
    remote.gesture_end().await.expect("mounted");
    let snap = rx
        .wait_for(|s| s.active_index == 4 && !s.in_transition)
        .await
        .expect("open")
        .clone();
    // Navigation leaves the overlay alone.
    assert!(snap.scroll_locked);

    remote.close_detail().await.expect("mounted");
    rx.wait_for(|s| !s.scroll_locked).await.expect("open");

    handle.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn out_of_range_jump_is_rejected_at_the_remote() {
    let driver = CarouselDriver::new(settings(false, AutoAdvancePolicy::Free));
    let handle = driver.mount(promos(&["A", "B"]));

    let err = handle.remote().jump_to(2).await.unwrap_err();
    assert_eq!(
        err,
        DriverError::Carousel(CarouselError::IndexOutOfRange { index: 2, len: 2 })
    );
    assert_eq!(handle.snapshot().active_index, 2);
}

#[tokio::test(start_paused = true)]
async fn empty_carousel_never_changes() {
    let driver = CarouselDriver::new(settings(true, AutoAdvancePolicy::Free));
    let handle = driver.mount(Vec::new());
    let remote = handle.remote();
    let mut rx = handle.subscribe();

    remote.advance().await.expect("mounted");
    remote.select(0).await.expect("mounted");

    let changed = timeout(INTERVAL * 3, rx.changed()).await;
    assert!(changed.is_err(), "empty carousel published a change");
    assert!(handle.snapshot().is_empty());
    assert!(handle.snapshot().selected.is_none());
}

#[tokio::test(start_paused = true)]
async fn reload_mid_transition_lands_idle_and_disarms_settle() {
    let driver = CarouselDriver::new(settings(false, AutoAdvancePolicy::Free));
    let items = promos(&["A", "B", "C"]);
    let handle = driver.mount(items.clone());
    let remote = handle.remote();
    let mut rx = handle.subscribe();

    remote.advance().await.expect("mounted");
    rx.wait_for(|s| s.in_transition && s.active_index == 4)
        .await
        .expect("open");

    remote
        .replace_items(vec![items[1].clone(), items[2].clone()])
        .await
        .expect("mounted");
    let snap = rx.wait_for(|s| s.item_count == 2).await.expect("open").clone();
    assert!(!snap.in_transition);
    assert_eq!(snap.active_index, 3);
    assert_eq!(snap.base_index, Some(1));

    // The settle armed by the first advance must not publish anything.
    let changed = timeout(TRANSITION * 2, rx.changed()).await;
    assert!(changed.is_err(), "stale settle touched the carousel");

    // A fresh transition still settles on its own deadline.
    let started = Instant::now();
    remote.advance().await.expect("mounted");
    let snap = rx.wait_for(|s| s.active_index == 2 && !s.in_transition)
        .await
        .expect("open")
        .clone();
    assert!(started.elapsed() >= TRANSITION);
    assert_eq!(snap.base_index, Some(0));

    handle.unmount().await;
}
