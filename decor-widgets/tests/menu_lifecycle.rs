// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use decor_core::geometry::{Point, Rect, Size, Vec2};
use decor_core::platform::{ComponentId, HeadlessPlatform, WindowId};
use decor_core::timer::ManualTimer;
use decor_widgets::dynamic_menu::{DynamicMenu, DynamicMenuItem, MenuIcon};
use parking_lot::Mutex;

struct Fixture {
    platform: HeadlessPlatform,
    timer: ManualTimer,
    window: WindowId,
    invoker: ComponentId,
    menu: DynamicMenu,
}

fn fixture(items: usize) -> Fixture {
    let platform = HeadlessPlatform::new();
    let timer = ManualTimer::new();
    let window = platform.add_window(Point::new(100.0, 100.0));
    let invoker = platform.add_component(Some(window), Rect::new(100.0, 100.0, 200.0, 150.0));
    let menu = DynamicMenu::new(Arc::new(platform.clone()), Arc::new(timer.clone()));
    for i in 0..items {
        menu.add_item(DynamicMenuItem::new(MenuIcon::square(format!("item-{}", i), 24.0)));
    }
    Fixture {
        platform,
        timer,
        window,
        invoker,
        menu,
    }
}

fn counter() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + Clone + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let inner = count.clone();
    (count, move || {
        inner.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn test_show_creates_centered_overlay() {
    let f = fixture(4);
    f.menu.show(f.invoker, Point::new(50.0, 25.0));

    assert!(f.menu.is_shown());
    assert!(f.menu.is_displaying());
    assert_eq!(f.platform.tap_count(), 1);
    assert_eq!(f.platform.follow_count(), 1);

    // Items are 24px icons with a 6px margin, so the overlay is 2 * 60 + 36.
    let overlay = f.platform.overlay(f.menu.overlay_id().unwrap()).unwrap();
    assert_eq!(overlay.size, Size::new(156.0, 156.0));
    assert_eq!(overlay.position, Point::new(72.0, 47.0));
    assert_eq!(overlay.owner, Some(f.window));
    assert_eq!(overlay.opacity, 0.0);
    assert!(overlay.visible);
}

#[test]
fn test_display_reaches_one_and_opacity_follows() {
    let f = fixture(3);
    f.menu.show(f.invoker, Point::new(50.0, 25.0));
    let id = f.menu.overlay_id().unwrap();

    f.timer.tick_n(5);
    let overlay = f.platform.overlay(id).unwrap();
    assert!((overlay.opacity - f.menu.progress()).abs() < f32::EPSILON);
    assert_eq!(overlay.layout_requests, 5);

    f.timer.run_until_idle(100);
    assert_eq!(f.menu.progress(), 1.0);
    assert!(!f.menu.is_displaying());
    assert!(f.menu.is_shown());
    assert_eq!(f.timer.running(), 0);
    assert_eq!(f.platform.overlay(id).unwrap().opacity, 1.0);
}

#[test]
fn test_progress_is_monotonic() {
    let f = fixture(2);
    f.menu.show(f.invoker, Point::new(50.0, 25.0));

    let mut last = f.menu.progress();
    while f.timer.tick() > 0 {
        let progress = f.menu.progress();
        assert!(progress >= last && progress <= 1.0);
        last = progress;
    }
    assert_eq!(last, 1.0);

    f.menu.hide();
    while f.timer.tick() > 0 {
        let progress = f.menu.progress();
        assert!(progress <= last && progress >= 0.0);
        last = progress;
    }
    assert_eq!(last, 0.0);
}

#[test]
fn test_show_then_immediate_hide_cleans_up() {
    let f = fixture(4);
    let taps_before = f.platform.tap_count();

    f.menu.show(f.invoker, Point::new(50.0, 25.0));
    f.menu.hide();
    assert!(f.menu.is_hiding());
    assert!(!f.menu.is_displaying());

    f.timer.run_until_idle(100);
    assert!(!f.menu.is_shown());
    assert!(!f.menu.is_hiding());
    assert_eq!(f.menu.progress(), 0.0);
    assert_eq!(f.platform.tap_count(), taps_before);
    assert_eq!(f.platform.follow_count(), 0);
    assert_eq!(f.platform.overlay_count(), 0);
    assert_eq!(f.platform.disposed_count(), 1);
    assert_eq!(f.timer.running(), 0);
}

#[test]
fn test_hide_while_hiding_is_noop() {
    let f = fixture(4);
    f.menu.show(f.invoker, Point::new(50.0, 25.0));
    f.timer.run_until_idle(100);

    f.menu.hide_with_cause(Some(2));
    f.timer.tick_n(3);
    let progress = f.menu.progress();

    f.menu.hide();
    f.menu.hide_with_cause(Some(0));
    assert!(f.menu.is_hiding());
    assert_eq!(f.menu.progress(), progress);
    assert_eq!(f.menu.hiding_cause(), Some(2));
    assert_eq!(f.timer.running(), 1);

    f.timer.run_until_idle(100);
    assert_eq!(f.menu.hiding_cause(), None);
}

#[test]
fn test_hide_without_show_is_noop() {
    let f = fixture(2);
    f.menu.hide();
    assert!(!f.menu.is_hiding());
    assert_eq!(f.timer.running(), 0);
}

#[test]
fn test_double_show_is_noop() {
    let f = fixture(2);
    f.menu.show(f.invoker, Point::new(50.0, 25.0));
    f.timer.tick_n(2);
    f.menu.show(f.invoker, Point::new(0.0, 0.0));

    assert_eq!(f.platform.overlay_count(), 1);
    assert_eq!(f.platform.tap_count(), 1);
    assert_eq!(f.timer.running(), 1);

    // A shown menu ignores show even once the display animation is over.
    f.timer.run_until_idle(100);
    f.menu.show(f.invoker, Point::new(0.0, 0.0));
    assert_eq!(f.platform.overlay_count(), 1);
    assert!(!f.menu.is_displaying());
}

#[test]
fn test_hide_during_display_reverses_from_current_progress() {
    let f = fixture(2);
    f.menu.show(f.invoker, Point::new(50.0, 25.0));
    f.timer.tick_n(10);
    let reached = f.menu.progress();
    assert!(reached > 0.0 && reached < 1.0);

    f.menu.hide();
    assert!(!f.menu.is_displaying());
    assert_eq!(f.timer.running(), 1);
    f.timer.tick();
    assert!(f.menu.progress() < reached);
}

#[test]
fn test_full_display_fires_once() {
    let f = fixture(2);
    let (count, action) = counter();
    f.menu.on_full_display(action);

    f.menu.show(f.invoker, Point::new(50.0, 25.0));
    f.timer.tick_n(3);
    assert_eq!(count.load(Ordering::SeqCst), 0);

    f.timer.run_until_idle(100);
    assert_eq!(count.load(Ordering::SeqCst), 1);

    f.menu.hide();
    f.timer.run_until_idle(100);
    f.menu.show(f.invoker, Point::new(50.0, 25.0));
    f.timer.run_until_idle(100);
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_full_display_runs_now_when_shown() {
    let f = fixture(2);
    f.menu.show(f.invoker, Point::new(50.0, 25.0));
    f.timer.run_until_idle(100);

    let (count, action) = counter();
    f.menu.on_full_display(action);
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_full_display_while_hiding_waits_for_next_display() {
    let f = fixture(2);
    f.menu.show(f.invoker, Point::new(50.0, 25.0));
    f.timer.run_until_idle(100);
    f.menu.hide();

    let (count, action) = counter();
    f.menu.on_full_display(action);
    f.timer.run_until_idle(100);
    assert_eq!(count.load(Ordering::SeqCst), 0);

    f.menu.show(f.invoker, Point::new(50.0, 25.0));
    f.timer.run_until_idle(100);
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_full_hide_queues_while_shown() {
    let f = fixture(2);
    let (count, action) = counter();

    // Not shown: runs immediately.
    f.menu.on_full_hide(action.clone());
    assert_eq!(count.load(Ordering::SeqCst), 1);

    f.menu.show(f.invoker, Point::new(50.0, 25.0));
    f.menu.on_full_hide(action);
    f.timer.run_until_idle(100);
    assert_eq!(count.load(Ordering::SeqCst), 1);

    f.menu.hide();
    f.timer.run_until_idle(100);
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn test_callbacks_may_reenter_menu() {
    let f = fixture(2);
    let menu = f.menu.clone();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let inner = seen.clone();
    f.menu.on_full_display(move || {
        inner.lock().push(menu.is_displaying());
        menu.hide();
    });

    f.menu.show(f.invoker, Point::new(50.0, 25.0));
    f.timer.run_until_idle(200);
    assert_eq!(*seen.lock(), vec![false]);
    assert!(!f.menu.is_shown());
}

#[test]
fn test_press_outside_hides() {
    let f = fixture(2);
    f.menu.show(f.invoker, Point::new(50.0, 25.0));
    f.timer.run_until_idle(100);

    let overlay = f.menu.overlay_id().unwrap();
    f.platform.press(Point::new(80.0, 50.0), Some(overlay));
    assert!(!f.menu.is_hiding());

    f.platform.press(Point::new(10.0, 10.0), Some(f.window));
    assert!(f.menu.is_hiding());
    assert_eq!(f.menu.hiding_cause(), None);

    f.timer.run_until_idle(100);
    assert_eq!(f.platform.tap_count(), 0);
}

#[test]
fn test_overlay_follows_invoker_window() {
    let f = fixture(2);
    f.menu.show(f.invoker, Point::new(50.0, 25.0));
    let id = f.menu.overlay_id().unwrap();
    let before = f.platform.overlay(id).unwrap().position;

    f.platform.move_window(f.window, Point::new(130.0, 90.0));
    let after = f.platform.overlay(id).unwrap().position;
    assert_eq!(after, before + Vec2::new(30.0, -10.0));
}

#[test]
fn test_item_press_runs_action_and_hides_with_cause() {
    let f = fixture(0);
    let (count, action) = counter();
    f.menu.add_item(DynamicMenuItem::new(MenuIcon::square("plain", 24.0)));
    f.menu.add_item(DynamicMenuItem::new(MenuIcon::square("enabled", 24.0)).with_action(action));

    f.menu.show(f.invoker, Point::new(50.0, 25.0));
    f.timer.run_until_idle(100);

    let bounds = f.menu.item_bounds();
    assert_eq!(f.menu.handle_press(bounds[1].center()), Some(1));
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert!(f.menu.is_hiding());
    assert_eq!(f.menu.hiding_cause(), Some(1));

    // The pressed item stays at rest while the others animate away.
    f.timer.tick_n(5);
    assert_eq!(f.menu.item_bounds()[1], bounds[1]);
    assert_eq!(f.menu.handle_press(bounds[1].center()), None);
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_press_on_item_without_action_still_hides() {
    let f = fixture(2);
    f.menu.show(f.invoker, Point::new(50.0, 25.0));
    f.timer.run_until_idle(100);

    let bounds = f.menu.item_bounds();
    assert_eq!(f.menu.handle_press(bounds[0].center()), Some(0));
    assert!(f.menu.is_hiding());
    assert_eq!(f.menu.hiding_cause(), Some(0));

    f.timer.run_until_idle(100);
    assert!(!f.menu.is_shown());
    assert_eq!(f.platform.overlay_count(), 0);
}

#[test]
fn test_item_angles() {
    let f = fixture(4);
    let angles: Vec<f64> = (0..4).map(|i| f.menu.item_angle(i)).collect();
    assert_eq!(angles, vec![0.0, 90.0, 180.0, 270.0]);

    f.menu.set_clockwise(false);
    assert_eq!(f.menu.item_angle(1), 270.0);
}

#[test]
fn test_render_paints_bordered_items() {
    let f = fixture(0);
    f.menu.add_item(DynamicMenuItem::new(MenuIcon::square("a", 24.0)));
    f.menu.add_item(DynamicMenuItem::new(MenuIcon::square("b", 24.0)).with_draw_border(false));
    f.menu.add_item(DynamicMenuItem::new(MenuIcon::square("c", 24.0)).with_action(|| {}));

    let mut scene = decor_core::vg::Scene::new();
    assert_eq!(f.menu.render(&mut scene), 2);
}

#[test]
fn test_drop_releases_everything() {
    let f = fixture(3);
    f.menu.show(f.invoker, Point::new(50.0, 25.0));
    f.timer.tick_n(4);
    assert_eq!(f.platform.tap_count(), 1);

    let Fixture {
        platform,
        timer,
        menu,
        ..
    } = f;
    drop(menu);

    assert_eq!(timer.running(), 0);
    assert_eq!(platform.tap_count(), 0);
    assert_eq!(platform.follow_count(), 0);
    assert_eq!(platform.overlay_count(), 0);
    assert_eq!(timer.tick(), 0);
}
